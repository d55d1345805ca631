use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid cost matrix: {0}")]
    InvalidInput(#[from] InputError),

    #[error("failed to allocate solver buffers: {0}")]
    OutOfMemory(#[from] TryReserveError),

    #[error("solve was cancelled")]
    Cancelled,
}

/// Shape problems detected before anything is allocated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("matrix has no rows")]
    Empty,

    #[error("matrix has a zero dimension ({rows}x{cols})")]
    ZeroDimension { rows: usize, cols: usize },

    #[error("row {row} has {len} entries, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
}
