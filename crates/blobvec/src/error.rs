//! Error types for vector operations.
//!
//! Every fallible operation reports exactly one of three conditions. All of
//! them are raised before the vector is touched, so a failed call leaves
//! length, capacity and contents as they were.

use std::error::Error;
use std::fmt;

/// Errors that can occur during vector operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VecError {
    /// A required argument is absent or malformed (zero element size,
    /// item of the wrong width, zero initial capacity).
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },
    /// An index falls outside the logical range of the vector.
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// The exclusive upper bound the index was checked against.
        bound: usize,
    },
    /// An allocation failed: initial buffer, growth step, owned copy or
    /// swap scratch. Also raised when a configured byte ceiling would be
    /// exceeded.
    OutOfMemory {
        /// Number of bytes the failed allocation asked for.
        requested: usize,
    },
}

impl VecError {
    pub(crate) fn invalid(reason: &'static str) -> Self {
        Self::InvalidArgument { reason }
    }

    pub(crate) fn out_of_range(index: usize, bound: usize) -> Self {
        Self::OutOfRange { index, bound }
    }

    pub(crate) fn out_of_memory(requested: usize) -> Self {
        Self::OutOfMemory { requested }
    }
}

impl fmt::Display for VecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::OutOfRange { index, bound } => {
                write!(f, "index {index} out of range (bound {bound})")
            }
            Self::OutOfMemory { requested } => {
                write!(f, "allocation of {requested} bytes failed")
            }
        }
    }
}

impl Error for VecError {}
