//! Error types of the queue.
use std::collections::TryReserveError;

/// Queue errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An absent queue handle was passed in.
    #[error("invalid queue handle")]
    InvalidHandle,
    /// The allocator could not provide memory for a node or a string buffer.
    #[error("out of memory: {0}")]
    AllocationError(&'static str),
    /// The operation needs at least one element.
    #[error("queue is empty")]
    EmptyQueue,
}

/// Sugar of error.
pub type Result<T> = std::result::Result<T, Error>;

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::AllocationError("try reserve error")
    }
}
