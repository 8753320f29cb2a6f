//! Slot+generation table mapping C handles to live vectors.
//!
//! A freed vector's slot bumps its generation, so the old handle no longer
//! resolves: use-after-free and double-free from C become
//! [`BlobvecStatus::InvalidHandle`] instead of undefined behaviour.
//!
//! Encoding: upper 32 bits = slot index + 1, lower 32 bits = generation.
//! The `+ 1` keeps every issued handle non-zero, so `0` can serve as the C
//! null handle and is reported as [`BlobvecStatus::InvalidArgument`].

use crate::status::BlobvecStatus;

/// The handle value C callers use for "no vector".
pub(crate) const NULL_HANDLE: u64 = 0;

fn encode(slot: u32, generation: u32) -> u64 {
    ((slot as u64 + 1) << 32) | generation as u64
}

/// Split a handle into `(slot, generation)`; `None` for the null handle
/// and for values with an empty slot field.
fn decode(handle: u64) -> Option<(u32, u32)> {
    let tagged = (handle >> 32) as u32;
    let slot = tagged.checked_sub(1)?;
    Some((slot, handle as u32))
}

struct Entry<T> {
    generation: u32,
    value: Option<T>,
}

/// Owned values addressed by generation-checked handles.
pub(crate) struct HandleTable<T> {
    entries: Vec<Entry<T>>,
    vacant: Vec<u32>,
}

impl<T> HandleTable<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Store `value`, reusing a vacant slot when one exists.
    pub(crate) fn insert(&mut self, value: T) -> u64 {
        match self.vacant.pop() {
            Some(slot) => {
                let entry = &mut self.entries[slot as usize];
                entry.value = Some(value);
                encode(slot, entry.generation)
            }
            None => {
                let slot = self.entries.len() as u32;
                self.entries.push(Entry {
                    generation: 0,
                    value: Some(value),
                });
                encode(slot, 0)
            }
        }
    }

    fn entry_mut(&mut self, handle: u64) -> Result<&mut Entry<T>, BlobvecStatus> {
        if handle == NULL_HANDLE {
            return Err(BlobvecStatus::InvalidArgument);
        }
        let (slot, generation) = decode(handle).ok_or(BlobvecStatus::InvalidHandle)?;
        match self.entries.get_mut(slot as usize) {
            Some(entry) if entry.generation == generation && entry.value.is_some() => Ok(entry),
            _ => Err(BlobvecStatus::InvalidHandle),
        }
    }

    /// Resolve a handle to its live value.
    pub(crate) fn get_mut(&mut self, handle: u64) -> Result<&mut T, BlobvecStatus> {
        self.entry_mut(handle)?
            .value
            .as_mut()
            .ok_or(BlobvecStatus::InvalidHandle)
    }

    /// Take the value out and invalidate the handle.
    ///
    /// A slot whose generation wraps back to 0 is retired rather than
    /// reused, so a handle from the slot's first life can never resolve
    /// again.
    pub(crate) fn remove(&mut self, handle: u64) -> Result<T, BlobvecStatus> {
        let entry = self.entry_mut(handle)?;
        let value = entry.value.take().ok_or(BlobvecStatus::InvalidHandle)?;
        entry.generation = entry.generation.wrapping_add(1);
        let retired = entry.generation == 0;
        if let (false, Some((slot, _))) = (retired, decode(handle)) {
            self.vacant.push(slot);
        }
        Ok(value)
    }

    #[cfg(test)]
    fn live(&self) -> usize {
        self.entries.iter().filter(|e| e.value.is_some()).count()
    }
}
