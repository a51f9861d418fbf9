/// Errors returned by histogram and dataset operations.
#[derive(thiserror::Error, Debug)]
pub enum PieceError {
    #[error("histogram shape mismatch (expected {expected} bins, got {got})")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("histogram bin count must be at least 1 (got {0})")]
    InvalidBins(usize),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A feature-file line that could not be turned into a sample.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("line {line}: expected {expected} fields, got {got}")]
    FieldCount {
        line: usize,
        expected: usize,
        got: usize,
    },
    #[error("line {line}: unknown label (kind {kind:?}, color {color:?})")]
    InvalidLabel {
        line: usize,
        kind: String,
        color: String,
    },
    #[error("line {line}: field {field} is not a non-negative number: {value:?}")]
    InvalidValue {
        line: usize,
        field: usize,
        value: String,
    },
    #[error("line {line}: record is not valid UTF-8")]
    InvalidEncoding { line: usize },
}

impl RecordError {
    /// 1-based line number of the offending record.
    pub fn line(&self) -> usize {
        match self {
            Self::FieldCount { line, .. }
            | Self::InvalidLabel { line, .. }
            | Self::InvalidValue { line, .. }
            | Self::InvalidEncoding { line } => *line,
        }
    }
}
