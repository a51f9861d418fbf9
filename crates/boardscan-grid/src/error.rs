/// Errors returned while reconstructing the board lattice.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("no line segments to intersect")]
    NoSegments,
    #[error("lattice needs exactly {expected} points, found {got}")]
    PointCountMismatch { expected: usize, got: usize },
}
