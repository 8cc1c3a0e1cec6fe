//! The one error type every structure in this crate reports through.

use thiserror::Error;

/// Everything that can go wrong with a single operation. None of these are
/// sticky: the structure that returned one is left exactly as it was before
/// the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The operation needs at least one element and there are none.
    #[error("container is empty")]
    EmptyContainer,

    /// A fixed-capacity structure is already holding as much as it can.
    #[error("container is full (capacity {capacity})")]
    FullContainer { capacity: usize },

    /// The key, value, vertex, edge or position asked for isn't there.
    #[error("no such element")]
    NotFound,

    /// A checked precondition on the input didn't hold.
    #[error("precondition violated: {0}")]
    PreconditionViolation(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
