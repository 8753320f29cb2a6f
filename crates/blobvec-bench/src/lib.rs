//! Benchmark workloads for blobvec.
//!
//! Provides deterministic operation streams for the criterion benches:
//!
//! - [`filled`]: a vector pre-loaded with `n` sequential 4-byte elements
//! - [`random_indices`]: seeded index stream bounded by a shrinking length
//! - [`mixed_workload`]: seeded insert/delete/swap mix that keeps length stable

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use blobvec::{ByteVec, VecError};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Width of the benchmark element (`u32`).
pub const ELEMENT_SIZE: usize = 4;

/// One step of a [`mixed_workload`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Insert the value at the index.
    Insert(usize, u32),
    /// Delete the index.
    Delete(usize),
    /// Swap two indices.
    Swap(usize, usize),
}

/// A vector holding `0..n` as native-endian `u32`.
pub fn filled(n: usize) -> ByteVec {
    let mut v = ByteVec::new(ELEMENT_SIZE).expect("default config allocates");
    for x in 0..n as u32 {
        v.push_back(&x.to_ne_bytes())
            .expect("benchmark sizes fit in memory");
    }
    v
}

/// `count` indices for deleting one element at a time from a vector of
/// length `count`: the i-th index is below `count - i`.
pub fn random_indices(seed: u64, count: usize) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|i| rng.random_range(0..count - i)).collect()
}

/// A stream of `steps` operations against a vector that starts at
/// `initial_len` elements. Inserts and deletes alternate so the length
/// oscillates by at most one.
pub fn mixed_workload(seed: u64, initial_len: usize, steps: usize) -> Vec<Step> {
    assert!(initial_len > 0, "workload needs a non-empty vector");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut len = initial_len;
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        let step = match i % 3 {
            0 => {
                len += 1;
                Step::Insert(rng.random_range(0..len), rng.random())
            }
            1 => {
                len -= 1;
                Step::Delete(rng.random_range(0..=len))
            }
            _ => Step::Swap(rng.random_range(0..len), rng.random_range(0..len)),
        };
        out.push(step);
    }
    out
}

/// Apply a workload step.
pub fn apply(v: &mut ByteVec, step: Step) -> Result<(), VecError> {
    match step {
        Step::Insert(i, x) => v.insert(i, &x.to_ne_bytes()),
        Step::Delete(i) => v.delete(i),
        Step::Swap(i, j) => v.swap(i, j),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workloads_are_deterministic() {
        assert_eq!(random_indices(7, 50), random_indices(7, 50));
        assert_eq!(mixed_workload(7, 10, 30), mixed_workload(7, 10, 30));
    }

    #[test]
    fn random_indices_stay_in_range() {
        let mut v = filled(300);
        for i in random_indices(1, 300) {
            v.delete(i).unwrap();
        }
        assert!(v.is_empty());
    }

    #[test]
    fn mixed_workload_applies_cleanly() {
        let mut v = filled(64);
        for step in mixed_workload(3, 64, 999) {
            apply(&mut v, step).unwrap();
        }
        assert_eq!(v.len(), 64);
    }
}
