//! Error types for [`DynamicArray`](crate::dynamic_array::DynamicArray) operations.

use thiserror::Error;

/// Result type for array operations.
pub type Result<T> = std::result::Result<T, ArrayError>;

/// Errors returned by array operations.
///
/// Every failing operation leaves the array exactly as it was before the call.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// An index outside `[0, length)` was requested.
    #[error("index {index} out of range for array of length {length}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The array length at the time of the call.
        length: usize,
    },

    /// `pop` was called on an array with no elements.
    #[error("pop from empty array")]
    EmptyContainer,

    /// A backing block of the requested slot count could not be obtained.
    #[error("failed to allocate backing block of {requested} slots")]
    AllocationFailure {
        /// Number of slots requested. `usize::MAX` when the size itself overflowed.
        requested: usize,
    },
}
