//! Board notation for the 64 square labels.
//!
//! Square index 0 is `a8` (top-left in the image), index 63 is `h1`.

use boardscan_core::{BOARD_SIDE, SQUARE_COUNT};
use boardscan_pieces::SquareLabel;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("board notation needs {SQUARE_COUNT} squares, got {got}")]
    SquareCount { got: usize },
    #[error("square {index} has no label")]
    Unresolved { index: usize },
}

/// Side to move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Side {
    pub fn code(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }
}

/// FEN string for 64 row-major labels.
///
/// Only piece placement and side to move are known; castling and en passant
/// are written as `-` and both clocks as `0`.
pub fn board_to_fen(labels: &[Option<SquareLabel>], side: Side) -> Result<String, NotationError> {
    if labels.len() != SQUARE_COUNT {
        return Err(NotationError::SquareCount { got: labels.len() });
    }

    let mut fen = String::with_capacity(90);
    for (r, row) in labels.chunks(BOARD_SIDE).enumerate() {
        if r > 0 {
            fen.push('/');
        }
        let mut run = 0u8;
        for (c, label) in row.iter().enumerate() {
            let label = label.ok_or(NotationError::Unresolved {
                index: r * BOARD_SIDE + c,
            })?;
            match label.fen_char() {
                None => run += 1,
                Some(ch) => {
                    if run > 0 {
                        fen.push(char::from(b'0' + run));
                        run = 0;
                    }
                    fen.push(ch);
                }
            }
        }
        if run > 0 {
            fen.push(char::from(b'0' + run));
        }
    }

    fen.push(' ');
    fen.push(side.code());
    fen.push_str(" - - 0 0");
    Ok(fen)
}

/// Algebraic name of a square index (`0 → "a8"`, `63 → "h1"`).
pub fn square_name(index: usize) -> Option<String> {
    if index >= SQUARE_COUNT {
        return None;
    }
    let file = char::from(b'a' + (index % BOARD_SIDE) as u8);
    let rank = BOARD_SIDE - index / BOARD_SIDE;
    Some(format!("{file}{rank}"))
}

/// Square index of an algebraic name (`"a8" → 0`, `"h1" → 63`).
pub fn square_index(name: &str) -> Option<usize> {
    let &[file, rank] = name.as_bytes() else {
        return None;
    };
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    let col = (file - b'a') as usize;
    let row = BOARD_SIDE - (rank - b'0') as usize;
    Some(row * BOARD_SIDE + col)
}

/// Source and target square indices of an engine reply such as
/// `"bestmove e2e4 ponder e7e5"`. Promotion suffixes are ignored.
pub fn parse_best_move(reply: &str) -> Option<(usize, usize)> {
    let mut tokens = reply.split_whitespace();
    if tokens.next()? != "bestmove" {
        return None;
    }
    let mv = tokens.next()?;
    let from = square_index(mv.get(0..2)?)?;
    let to = square_index(mv.get(2..4)?)?;
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardscan_pieces::{PieceColor, PieceKind};

    fn piece(text: &str) -> Option<SquareLabel> {
        Some(text.parse().expect("label"))
    }

    fn start_position() -> Vec<Option<SquareLabel>> {
        let back = ["r", "n", "b", "q", "k", "b", "n", "r"];
        let mut labels = Vec::new();
        labels.extend(back.iter().map(|k| piece(&format!("b{k}"))));
        labels.extend((0..8).map(|_| piece("bp")));
        labels.extend((0..32).map(|_| Some(SquareLabel::Empty)));
        labels.extend((0..8).map(|_| piece("wp")));
        labels.extend(back.iter().map(|k| piece(&format!("w{k}"))));
        labels
    }

    #[test]
    fn start_position_fen() {
        assert_eq!(
            board_to_fen(&start_position(), Side::White).expect("fen"),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 0"
        );
    }

    #[test]
    fn empty_runs_are_flushed_at_row_and_board_end() {
        let mut labels = vec![Some(SquareLabel::Empty); 64];
        labels[3] = Some(SquareLabel::piece(PieceColor::White, PieceKind::King));
        labels[60] = Some(SquareLabel::piece(PieceColor::Black, PieceKind::King));
        assert_eq!(
            board_to_fen(&labels, Side::Black).expect("fen"),
            "3K4/8/8/8/8/8/8/4k3 b - - 0 0"
        );
    }

    #[test]
    fn wrong_count_and_unresolved_squares_fail() {
        assert_eq!(
            board_to_fen(&[Some(SquareLabel::Empty); 63], Side::White),
            Err(NotationError::SquareCount { got: 63 })
        );
        let mut labels = start_position();
        labels[20] = None;
        assert_eq!(
            board_to_fen(&labels, Side::White),
            Err(NotationError::Unresolved { index: 20 })
        );
    }

    #[test]
    fn square_names_round_trip() {
        assert_eq!(square_name(0).as_deref(), Some("a8"));
        assert_eq!(square_name(7).as_deref(), Some("h8"));
        assert_eq!(square_name(63).as_deref(), Some("h1"));
        assert_eq!(square_name(64), None);
        for i in 0..64 {
            let name = square_name(i).expect("name");
            assert_eq!(square_index(&name), Some(i));
        }
        assert_eq!(square_index("e2"), Some(52));
        for bad in ["", "e", "i1", "a9", "a0", "e22"] {
            assert_eq!(square_index(bad), None, "{bad}");
        }
    }

    #[test]
    fn best_move_parsing() {
        assert_eq!(parse_best_move("bestmove e2e4 ponder e7e5"), Some((52, 36)));
        assert_eq!(parse_best_move("bestmove a7a8q"), Some((8, 0)));
        assert_eq!(parse_best_move("bestmove (none)"), None);
        assert_eq!(parse_best_move("info depth 10"), None);
        assert_eq!(parse_best_move("bestmove"), None);
    }
}
