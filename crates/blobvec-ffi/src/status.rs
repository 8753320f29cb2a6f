//! C-compatible status codes.
//!
//! [`BlobvecStatus`] is a `repr(i32)` enum covering every condition the
//! C ABI can report. Conversions from [`VecError`] are provided.

use blobvec::VecError;

/// C-compatible status code returned or recorded by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlobvecStatus {
    /// Success.
    Ok = 0,
    /// Handle is stale (vector already freed) or was never issued.
    InvalidHandle = -1,
    /// A required argument is null or malformed, including the null handle
    /// `0` and a zero element size.
    InvalidArgument = -2,
    /// Index outside the vector's logical range, or `pop_back` on an empty
    /// vector.
    OutOfRange = -3,
    /// Allocation failed or a configured byte ceiling would be exceeded.
    OutOfMemory = -4,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -5,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&VecError> for BlobvecStatus {
    fn from(e: &VecError) -> Self {
        match e {
            VecError::InvalidArgument { .. } => BlobvecStatus::InvalidArgument,
            VecError::OutOfRange { .. } => BlobvecStatus::OutOfRange,
            VecError::OutOfMemory { .. } => BlobvecStatus::OutOfMemory,
        }
    }
}

/// Collapse a handle-level result into a raw status code.
pub(crate) fn code(result: Result<(), BlobvecStatus>) -> i32 {
    match result {
        Ok(()) => BlobvecStatus::Ok as i32,
        Err(status) => status as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_values_are_stable() {
        assert_eq!(BlobvecStatus::Ok as i32, 0);
        assert_eq!(BlobvecStatus::InvalidHandle as i32, -1);
        assert_eq!(BlobvecStatus::InvalidArgument as i32, -2);
        assert_eq!(BlobvecStatus::OutOfRange as i32, -3);
        assert_eq!(BlobvecStatus::OutOfMemory as i32, -4);
        assert_eq!(BlobvecStatus::InternalError as i32, -5);
        assert_eq!(BlobvecStatus::Panicked as i32, -128);
    }

    #[test]
    fn vec_error_to_status() {
        assert_eq!(
            BlobvecStatus::from(&VecError::InvalidArgument { reason: "x" }),
            BlobvecStatus::InvalidArgument
        );
        assert_eq!(
            BlobvecStatus::from(&VecError::OutOfRange { index: 3, bound: 1 }),
            BlobvecStatus::OutOfRange
        );
        assert_eq!(
            BlobvecStatus::from(&VecError::OutOfMemory { requested: 64 }),
            BlobvecStatus::OutOfMemory
        );
    }

    #[test]
    fn code_maps_results() {
        assert_eq!(code(Ok(())), 0);
        assert_eq!(code(Err(BlobvecStatus::OutOfMemory)), -4);
    }
}
