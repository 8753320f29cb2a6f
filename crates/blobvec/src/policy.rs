//! Growth decision and index arithmetic shared by [`ByteVec`](crate::ByteVec)
//! and [`TypedVec`](crate::TypedVec).
//!
//! Both containers funnel every operation through these helpers, so the
//! byte-erased and element-typed vectors grow at the same points and reject
//! the same indices.

use crate::error::VecError;

/// Whether inserting one more element requires a growth step.
///
/// The byte offset of the slot after the new element,
/// `(len + 1) * element_size`, is compared against the buffer size
/// `capacity * element_size`; growth happens when it would reach or exceed
/// it. Element size is positive, so it cancels out.
pub(crate) fn needs_growth(len: usize, capacity: usize) -> bool {
    len.saturating_add(1) >= capacity
}

/// Capacity after one growth step (doubling).
pub(crate) fn grown_capacity(capacity: usize) -> Option<usize> {
    capacity.checked_mul(2)
}

/// Reject `index` unless it is strictly below `bound`.
pub(crate) fn check_index(index: usize, bound: usize) -> Result<(), VecError> {
    if index >= bound {
        return Err(VecError::out_of_range(index, bound));
    }
    Ok(())
}

/// Byte size of `capacity` slots of `element_size` bytes, enforcing the
/// optional ceiling.
///
/// Overflow and sizes beyond `isize::MAX` are reported as allocation
/// failures, since no allocator could satisfy them.
pub(crate) fn budget_bytes(
    element_size: usize,
    capacity: usize,
    max_bytes: Option<usize>,
) -> Result<usize, VecError> {
    let bytes = element_size
        .checked_mul(capacity)
        .filter(|&b| b <= isize::MAX as usize)
        .ok_or_else(|| VecError::out_of_memory(element_size.saturating_mul(capacity)))?;
    if max_bytes.is_some_and(|limit| bytes > limit) {
        return Err(VecError::out_of_memory(bytes));
    }
    Ok(bytes)
}
