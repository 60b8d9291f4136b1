use super::ArenaPtr;
use thiserror::Error;

/// Errors returned by the allocation API.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// No free chunk is large enough, or the used list has no slot left.
    #[error("allocation of {requested} bytes failed")]
    AllocationFailed { requested: usize },

    /// The pointer is not a live allocation of this arena.
    #[error("pointer {0} is not tracked by this arena")]
    InvalidPointer(ArenaPtr),

    #[error("size overflow: {count} * {elem_size} does not fit in usize")]
    SizeOverflow { count: usize, elem_size: usize },
}

/// A chunk list has no room for another entry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("chunk list capacity of {capacity} entries exceeded")]
pub struct CapacityExceeded {
    pub capacity: usize,
}
