//! Closed label set for square contents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Lowercase letter used in feature files and board notation.
    pub fn code(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == c)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn code(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::White),
            'b' => Some(Self::Black),
            _ => None,
        }
    }
}

/// What a board square holds.
///
/// Text form is two characters, color then kind (`"wp"`, `"bk"`), and
/// `"ee"` for an empty square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SquareLabel {
    Empty,
    Piece { color: PieceColor, kind: PieceKind },
}

/// Output classes of the external piece-recognition network, in index order.
pub const DNN_CLASS_LABELS: [SquareLabel; 12] = [
    SquareLabel::piece(PieceColor::Black, PieceKind::Bishop),
    SquareLabel::piece(PieceColor::Black, PieceKind::King),
    SquareLabel::piece(PieceColor::Black, PieceKind::Knight),
    SquareLabel::piece(PieceColor::Black, PieceKind::Pawn),
    SquareLabel::piece(PieceColor::Black, PieceKind::Queen),
    SquareLabel::piece(PieceColor::Black, PieceKind::Rook),
    SquareLabel::piece(PieceColor::White, PieceKind::Bishop),
    SquareLabel::piece(PieceColor::White, PieceKind::King),
    SquareLabel::piece(PieceColor::White, PieceKind::Knight),
    SquareLabel::piece(PieceColor::White, PieceKind::Pawn),
    SquareLabel::piece(PieceColor::White, PieceKind::Queen),
    SquareLabel::piece(PieceColor::White, PieceKind::Rook),
];

const EMPTY_CODE: char = 'e';

impl SquareLabel {
    pub const fn piece(color: PieceColor, kind: PieceKind) -> Self {
        Self::Piece { color, kind }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// Decode the `(kind, color)` character pair of a feature-file record.
    ///
    /// A kind of `'e'` is an empty square whatever the color character says.
    pub fn from_record_codes(kind: char, color: char) -> Option<Self> {
        if kind == EMPTY_CODE {
            return Some(Self::Empty);
        }
        Some(Self::piece(
            PieceColor::from_code(color)?,
            PieceKind::from_code(kind)?,
        ))
    }

    /// `(kind, color)` characters for a feature-file record.
    pub fn record_codes(self) -> (char, char) {
        match self {
            Self::Empty => (EMPTY_CODE, EMPTY_CODE),
            Self::Piece { color, kind } => (kind.code(), color.code()),
        }
    }

    /// FEN piece letter: uppercase for white, lowercase for black.
    pub fn fen_char(self) -> Option<char> {
        match self {
            Self::Empty => None,
            Self::Piece {
                color: PieceColor::White,
                kind,
            } => Some(kind.code().to_ascii_uppercase()),
            Self::Piece {
                color: PieceColor::Black,
                kind,
            } => Some(kind.code()),
        }
    }

    /// Map a network class index to a label.
    pub fn from_class_index(index: usize) -> Option<Self> {
        DNN_CLASS_LABELS.get(index).copied()
    }
}

impl fmt::Display for SquareLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "{EMPTY_CODE}{EMPTY_CODE}"),
            Self::Piece { color, kind } => write!(f, "{}{}", color.code(), kind.code()),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square label {0:?}")]
pub struct ParseLabelError(pub String);

impl FromStr for SquareLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(color), Some(kind), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseLabelError(s.to_string()));
        };
        if color == EMPTY_CODE && kind == EMPTY_CODE {
            return Ok(Self::Empty);
        }
        match (PieceColor::from_code(color), PieceKind::from_code(kind)) {
            (Some(color), Some(kind)) => Ok(Self::piece(color, kind)),
            _ => Err(ParseLabelError(s.to_string())),
        }
    }
}

impl From<SquareLabel> for String {
    fn from(label: SquareLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for SquareLabel {
    type Error = ParseLabelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
