//! Exclusively owned byte storage addressed in fixed-size slots.
//!
//! [`RawBuffer`] holds `capacity * element_size` bytes in a single `Vec<u8>`.
//! Reallocation goes through `try_reserve_exact`, which leaves the existing
//! allocation untouched when it fails, so a refused growth step never loses
//! or frees live data.

use std::ops::Range;

use crate::error::VecError;
use crate::policy;

/// Slot-addressed backing store of a [`ByteVec`](crate::ByteVec).
///
/// Slot accessors panic on indices at or beyond capacity; callers check
/// indices against the logical length first.
#[derive(Clone, Debug)]
pub(crate) struct RawBuffer {
    /// Always exactly `capacity * element_size` bytes long.
    bytes: Vec<u8>,
    element_size: usize,
    capacity: usize,
    max_bytes: Option<usize>,
}

impl RawBuffer {
    /// Allocate a zero-filled buffer of `capacity` slots.
    pub(crate) fn allocate(
        element_size: usize,
        capacity: usize,
        max_bytes: Option<usize>,
    ) -> Result<Self, VecError> {
        let requested = policy::budget_bytes(element_size, capacity, max_bytes)?;
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(requested)
            .map_err(|_| VecError::out_of_memory(requested))?;
        bytes.resize(requested, 0);
        Ok(Self {
            bytes,
            element_size,
            capacity,
            max_bytes,
        })
    }

    /// Reallocate to exactly `capacity` slots.
    ///
    /// Bytes up to the smaller of the old and new sizes are preserved. On
    /// failure nothing changes.
    pub(crate) fn resize_to(&mut self, capacity: usize) -> Result<(), VecError> {
        let requested = policy::budget_bytes(self.element_size, capacity, self.max_bytes)?;
        if requested > self.bytes.len() {
            self.bytes
                .try_reserve_exact(requested - self.bytes.len())
                .map_err(|_| VecError::out_of_memory(requested))?;
        }
        self.bytes.resize(requested, 0);
        self.capacity = capacity;
        Ok(())
    }

    pub(crate) fn element_size(&self) -> usize {
        self.element_size
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn memory_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Byte range of slot `index`.
    fn span(&self, index: usize) -> Range<usize> {
        let start = index * self.element_size;
        start..start + self.element_size
    }

    pub(crate) fn slot(&self, index: usize) -> &[u8] {
        let span = self.span(index);
        &self.bytes[span]
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut [u8] {
        let span = self.span(index);
        &mut self.bytes[span]
    }

    /// The first `count` slots as one contiguous slice.
    pub(crate) fn prefix(&self, count: usize) -> &[u8] {
        &self.bytes[..count * self.element_size]
    }

    /// Move slots `[from, end)` to start at slot `to`.
    ///
    /// Source and destination may overlap; `copy_within` has memmove
    /// semantics, so shifting toward the tail never reads a slot it has
    /// already overwritten.
    pub(crate) fn move_slots(&mut self, from: usize, end: usize, to: usize) {
        let es = self.element_size;
        self.bytes.copy_within(from * es..end * es, to * es);
    }

    /// Copy slot `src` over slot `dst`.
    pub(crate) fn copy_slot(&mut self, src: usize, dst: usize) {
        self.move_slots(src, src + 1, dst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(slots: &[u8]) -> RawBuffer {
        let mut buf = RawBuffer::allocate(1, 8, None).unwrap();
        for (i, &b) in slots.iter().enumerate() {
            buf.slot_mut(i)[0] = b;
        }
        buf
    }

    #[test]
    fn allocate_sizes_buffer_in_bytes() {
        let buf = RawBuffer::allocate(4, 256, None).unwrap();
        assert_eq!(buf.capacity(), 256);
        assert_eq!(buf.memory_bytes(), 1024);
        assert_eq!(buf.slot(255).len(), 4);
    }

    #[test]
    fn allocate_over_ceiling_fails() {
        let result = RawBuffer::allocate(4, 256, Some(1023));
        assert_eq!(result.unwrap_err(), VecError::out_of_memory(1024));
    }

    #[test]
    fn resize_preserves_contents() {
        let mut buf = buffer_with(&[1, 2, 3]);
        buf.resize_to(16).unwrap();
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.prefix(3), &[1u8, 2, 3]);
    }

    #[test]
    fn failed_resize_leaves_buffer_unchanged() {
        let mut buf = RawBuffer::allocate(1, 4, Some(4)).unwrap();
        buf.slot_mut(0)[0] = 9;
        let err = buf.resize_to(8).unwrap_err();
        assert_eq!(err, VecError::out_of_memory(8));
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.memory_bytes(), 4);
        assert_eq!(buf.slot(0), &[9u8]);
    }

    #[test]
    fn move_slots_toward_tail_overlapping() {
        let mut buf = buffer_with(&[1, 2, 3, 4]);
        buf.move_slots(1, 4, 2);
        assert_eq!(buf.prefix(5), &[1u8, 2, 2, 3, 4]);
    }

    #[test]
    fn move_slots_toward_head_overlapping() {
        let mut buf = buffer_with(&[1, 2, 3, 4]);
        buf.move_slots(2, 4, 1);
        assert_eq!(buf.prefix(3), &[1u8, 3, 4]);
    }

    #[test]
    fn copy_slot_overwrites_destination() {
        let mut buf = buffer_with(&[5, 6]);
        buf.copy_slot(1, 0);
        assert_eq!(buf.prefix(2), &[6u8, 6]);
    }
}
