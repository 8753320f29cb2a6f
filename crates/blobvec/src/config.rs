//! Vector configuration parameters.

use crate::error::VecError;

/// Configuration for a vector's backing buffer.
///
/// Controls the starting capacity and an optional byte ceiling. Validated
/// at construction; immutable for the lifetime of the vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VecConfig {
    /// Number of element slots allocated up front.
    ///
    /// Default: 256. Must be at least 1, since capacity grows by doubling.
    pub initial_capacity: usize,

    /// Upper bound on the backing buffer size in bytes.
    ///
    /// Default: `None` (bounded only by the allocator). An allocation or
    /// growth step that would exceed the ceiling fails with
    /// [`VecError::OutOfMemory`], exactly as a refused reallocation would.
    pub max_bytes: Option<usize>,
}

impl VecConfig {
    /// Default initial capacity in elements.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            max_bytes: None,
        }
    }

    /// Set the initial capacity in elements.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Cap the backing buffer at `max_bytes` bytes.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Size of the initial allocation for elements of `element_size` bytes.
    ///
    /// Returns `None` if the product overflows.
    pub fn initial_bytes(&self, element_size: usize) -> Option<usize> {
        self.initial_capacity.checked_mul(element_size)
    }

    pub(crate) fn validate(&self) -> Result<(), VecError> {
        if self.initial_capacity == 0 {
            return Err(VecError::invalid("initial capacity must be at least 1"));
        }
        Ok(())
    }
}

impl Default for VecConfig {
    fn default() -> Self {
        Self::new()
    }
}
