use thiserror::Error;

pub type Result<T> = core::result::Result<T, UtMatrixError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UtMatrixError {
    #[error("Invalid size {size}: must not exceed {max}")]
    InvalidSize { size: usize, max: usize },

    #[error("Invalid start index {start_index}: a container of size {size} would address past usize::MAX")]
    InvalidIndex { start_index: usize, size: usize },

    #[error("Index {index} out of range {start}..{end}")]
    IndexOutOfRange {
        index: usize,
        start: usize,
        end: usize,
    },

    #[error("Size mismatch: {left} != {right}")]
    SizeMismatch { left: usize, right: usize },

    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}
