//! Element-typed counterpart of [`ByteVec`](crate::ByteVec).
//!
//! [`TypedVec<T>`] replaces byte offsets with native indexing over `T` while
//! keeping the same capacity schedule, bounds rules and error conditions.
//! Elements are `Copy`: values are duplicated bitwise on the way in and out.

use std::mem::size_of;

use crate::config::VecConfig;
use crate::error::VecError;
use crate::policy;

/// Growable contiguous array of `T` with explicit doubling growth.
#[derive(Clone, Debug)]
pub struct TypedVec<T: Copy> {
    /// Live elements; `items.len()` is the logical length.
    items: Vec<T>,
    /// Slots reserved under the growth schedule. `items.capacity()` may be
    /// larger if the allocator rounded up.
    capacity: usize,
    config: VecConfig,
}

impl<T: Copy> TypedVec<T> {
    /// Create an empty vector with the default configuration.
    ///
    /// Fails with [`VecError::InvalidArgument`] for zero-sized `T`.
    pub fn new() -> Result<Self, VecError> {
        Self::with_config(VecConfig::default())
    }

    /// Create an empty vector with an explicit configuration.
    pub fn with_config(config: VecConfig) -> Result<Self, VecError> {
        if size_of::<T>() == 0 {
            return Err(VecError::invalid("element size must be non-zero"));
        }
        config.validate()?;
        let capacity = config.initial_capacity;
        let requested = policy::budget_bytes(size_of::<T>(), capacity, config.max_bytes)?;
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| VecError::out_of_memory(requested))?;
        Ok(Self {
            items,
            capacity,
            config,
        })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the vector holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of element slots under the growth schedule.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The configuration this vector was built with.
    pub fn config(&self) -> &VecConfig {
        &self.config
    }

    /// Live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Borrow the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, VecError> {
        policy::check_index(index, self.len())?;
        Ok(&self.items[index])
    }

    /// Copy out the element at `index`.
    pub fn get_copy(&self, index: usize) -> Result<T, VecError> {
        self.get(index).copied()
    }

    /// Overwrite the element at `index`.
    pub fn set(&mut self, index: usize, item: T) -> Result<(), VecError> {
        policy::check_index(index, self.len())?;
        self.items[index] = item;
        Ok(())
    }

    /// Insert `item` at `index`, shifting later elements toward the tail.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), VecError> {
        policy::check_index(index, self.len() + 1)?;
        self.reserve_one()?;
        self.items.insert(index, item);
        Ok(())
    }

    /// Remove and return the element at `index`.
    pub fn delete(&mut self, index: usize) -> Result<T, VecError> {
        policy::check_index(index, self.len())?;
        Ok(self.items.remove(index))
    }

    /// Append `item`.
    pub fn push_back(&mut self, item: T) -> Result<(), VecError> {
        self.insert(self.len(), item)
    }

    /// Remove and return the last element; range error when empty.
    pub fn pop_back(&mut self) -> Result<T, VecError> {
        self.items.pop().ok_or_else(|| VecError::out_of_range(0, 0))
    }

    /// Exchange two elements.
    pub fn swap(&mut self, index1: usize, index2: usize) -> Result<(), VecError> {
        policy::check_index(index1, self.len())?;
        policy::check_index(index2, self.len())?;
        self.items.swap(index1, index2);
        Ok(())
    }

    fn reserve_one(&mut self) -> Result<(), VecError> {
        if !policy::needs_growth(self.len(), self.capacity) {
            return Ok(());
        }
        let next = policy::grown_capacity(self.capacity)
            .ok_or_else(|| VecError::out_of_memory(usize::MAX))?;
        let requested = policy::budget_bytes(size_of::<T>(), next, self.config.max_bytes)?;
        self.items
            .try_reserve_exact(next - self.items.len())
            .map_err(|_| VecError::out_of_memory(requested))?;
        self.capacity = next;
        Ok(())
    }
}
