use serde::{Deserialize, Serialize};

/// Squares per board side.
pub const BOARD_SIDE: usize = 8;

/// Squares per board.
pub const SQUARE_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

/// Light/dark coloring of a board square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareParity {
    Light,
    Dark,
}

impl SquareParity {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[inline]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}
