//! The type-erased vector.
//!
//! A [`ByteVec`] stores elements as opaque blocks of `element_size` bytes.
//! Items go in and come out as byte slices; nothing is constructed, moved
//! or dropped beyond a bitwise copy.

use smallvec::SmallVec;

use crate::config::VecConfig;
use crate::error::VecError;
use crate::policy;
use crate::raw::RawBuffer;

/// Swap scratch that stays on the stack for elements up to this size.
type Scratch = SmallVec<[u8; 64]>;

/// Growable contiguous array of fixed-size, type-erased elements.
///
/// Capacity starts at [`VecConfig::initial_capacity`] slots and doubles
/// whenever an insertion would fill the buffer. It never shrinks.
///
/// All index checks are against the logical length: slots between length
/// and capacity are allocated but not addressable.
#[derive(Clone, Debug)]
pub struct ByteVec {
    buf: RawBuffer,
    len: usize,
    config: VecConfig,
}

impl ByteVec {
    /// Create an empty vector for elements of `element_size` bytes, with
    /// the default configuration (256 initial slots, no byte ceiling).
    ///
    /// # Errors
    ///
    /// [`VecError::InvalidArgument`] if `element_size` is zero,
    /// [`VecError::OutOfMemory`] if the initial buffer cannot be allocated.
    pub fn new(element_size: usize) -> Result<Self, VecError> {
        Self::with_config(element_size, VecConfig::default())
    }

    /// Create an empty vector with an explicit configuration.
    pub fn with_config(element_size: usize, config: VecConfig) -> Result<Self, VecError> {
        if element_size == 0 {
            return Err(VecError::invalid("element size must be non-zero"));
        }
        config.validate()?;
        let buf = RawBuffer::allocate(element_size, config.initial_capacity, config.max_bytes)?;
        Ok(Self {
            buf,
            len: 0,
            config,
        })
    }

    /// Number of logically valid elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the vector holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of element slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Bytes per element, fixed at construction.
    pub fn element_size(&self) -> usize {
        self.buf.element_size()
    }

    /// Size of the backing buffer in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.buf.memory_bytes()
    }

    /// The configuration this vector was built with.
    pub fn config(&self) -> &VecConfig {
        &self.config
    }

    /// All live elements as one contiguous byte slice of
    /// `len() * element_size()` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.prefix(self.len)
    }

    /// Borrow the bytes of the element at `index`.
    ///
    /// The borrow ends before any further mutation of the vector.
    pub fn get(&self, index: usize) -> Result<&[u8], VecError> {
        policy::check_index(index, self.len)?;
        Ok(self.buf.slot(index))
    }

    /// Mutably borrow the bytes of the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut [u8], VecError> {
        policy::check_index(index, self.len)?;
        Ok(self.buf.slot_mut(index))
    }

    /// Copy the element at `index` into a freshly allocated buffer owned by
    /// the caller.
    ///
    /// # Errors
    ///
    /// [`VecError::OutOfRange`] as for [`get`](Self::get);
    /// [`VecError::OutOfMemory`] if the copy cannot be allocated.
    pub fn get_copy(&self, index: usize) -> Result<Box<[u8]>, VecError> {
        let item = self.get(index)?;
        let mut copy = Vec::new();
        copy.try_reserve_exact(item.len())
            .map_err(|_| VecError::out_of_memory(item.len()))?;
        copy.extend_from_slice(item);
        Ok(copy.into_boxed_slice())
    }

    /// Overwrite the element at `index` with `item`. Never extends the
    /// length.
    pub fn set(&mut self, index: usize, item: &[u8]) -> Result<(), VecError> {
        self.check_item(item)?;
        policy::check_index(index, self.len)?;
        self.buf.slot_mut(index).copy_from_slice(item);
        Ok(())
    }

    /// Insert a copy of `item` at `index`, shifting the elements at and
    /// after `index` one slot toward the tail.
    ///
    /// `index == len()` appends.
    ///
    /// # Errors
    ///
    /// [`VecError::InvalidArgument`] if `item` is not exactly
    /// `element_size()` bytes, [`VecError::OutOfRange`] if `index > len()`,
    /// [`VecError::OutOfMemory`] if the growth step fails. The vector is
    /// unchanged on every error.
    pub fn insert(&mut self, index: usize, item: &[u8]) -> Result<(), VecError> {
        self.check_item(item)?;
        policy::check_index(index, self.len + 1)?;
        self.reserve_one()?;
        if index < self.len {
            self.buf.move_slots(index, self.len, index + 1);
        }
        self.buf.slot_mut(index).copy_from_slice(item);
        self.len += 1;
        Ok(())
    }

    /// Remove the element at `index`, shifting later elements one slot
    /// toward the head.
    pub fn delete(&mut self, index: usize) -> Result<(), VecError> {
        policy::check_index(index, self.len)?;
        self.buf.move_slots(index + 1, self.len, index);
        self.len -= 1;
        Ok(())
    }

    /// Append a copy of `item`.
    pub fn push_back(&mut self, item: &[u8]) -> Result<(), VecError> {
        self.insert(self.len, item)
    }

    /// Remove the last element.
    ///
    /// # Errors
    ///
    /// [`VecError::OutOfRange`] if the vector is empty.
    pub fn pop_back(&mut self) -> Result<(), VecError> {
        match self.len.checked_sub(1) {
            Some(last) => self.delete(last),
            None => Err(VecError::out_of_range(0, 0)),
        }
    }

    /// Exchange the elements at `index1` and `index2` through a temporary
    /// copy of one element.
    ///
    /// Both indices are checked before any byte moves. Swapping an index
    /// with itself is a no-op.
    pub fn swap(&mut self, index1: usize, index2: usize) -> Result<(), VecError> {
        policy::check_index(index1, self.len)?;
        policy::check_index(index2, self.len)?;
        if index1 == index2 {
            return Ok(());
        }

        let es = self.element_size();
        let mut tmp = Scratch::new();
        tmp.try_reserve(es)
            .map_err(|_| VecError::out_of_memory(es))?;
        tmp.extend_from_slice(self.buf.slot(index2));

        self.buf.copy_slot(index1, index2);
        self.buf.slot_mut(index1).copy_from_slice(&tmp);
        Ok(())
    }

    fn check_item(&self, item: &[u8]) -> Result<(), VecError> {
        if item.len() != self.element_size() {
            return Err(VecError::invalid("item width does not match element size"));
        }
        Ok(())
    }

    /// Run the growth step if one more element would reach capacity.
    fn reserve_one(&mut self) -> Result<(), VecError> {
        let capacity = self.buf.capacity();
        if policy::needs_growth(self.len, capacity) {
            let next = policy::grown_capacity(capacity)
                .ok_or_else(|| VecError::out_of_memory(usize::MAX))?;
            self.buf.resize_to(next)?;
        }
        Ok(())
    }
}
