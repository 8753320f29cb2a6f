//! Test utilities for blobvec development.
//!
//! Provides fixtures for building and reading back vectors of `i32` (the
//! element type most tests use) and an allocation-failure harness that
//! starves a vector of memory at a chosen point.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use blobvec::{ByteVec, VecConfig, VecError};

/// Byte width of the `i32` fixtures.
pub const I32_SIZE: usize = std::mem::size_of::<i32>();

/// Native-endian encoding used by every `i32` fixture.
pub fn encode_i32(value: i32) -> [u8; I32_SIZE] {
    value.to_ne_bytes()
}

/// Decode one element produced by [`encode_i32`].
///
/// # Panics
///
/// Panics if `bytes` is not exactly four bytes long.
pub fn decode_i32(bytes: &[u8]) -> i32 {
    let arr: [u8; I32_SIZE] = bytes.try_into().expect("element is not 4 bytes wide");
    i32::from_ne_bytes(arr)
}

/// Build a default-configured 4-byte vector holding `values` in order.
pub fn i32_vec(values: &[i32]) -> ByteVec {
    let mut v = ByteVec::new(I32_SIZE).expect("default config allocates");
    for &x in values {
        v.push_back(&encode_i32(x)).expect("push within budget");
    }
    v
}

/// Read every live element of a 4-byte vector.
pub fn read_i32s(v: &ByteVec) -> Vec<i32> {
    v.as_bytes()
        .chunks_exact(I32_SIZE)
        .map(decode_i32)
        .collect()
}

/// Allocation-failure injection: decides at which capacity growth stops.
///
/// The harness is expressed as a byte ceiling on [`VecConfig`], so the
/// vector sees a refused reallocation through the same path a real
/// allocator failure takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailingGrowth {
    /// The very first growth step fails.
    FirstStep,
    /// Growth succeeds `n` times, then fails.
    AfterSteps(u32),
}

impl FailingGrowth {
    /// Config whose ceiling admits exactly the permitted growth steps.
    pub fn config(self, element_size: usize, initial_capacity: usize) -> VecConfig {
        let steps = match self {
            FailingGrowth::FirstStep => 0,
            FailingGrowth::AfterSteps(n) => n,
        };
        let max_slots = initial_capacity << steps;
        VecConfig::new()
            .with_initial_capacity(initial_capacity)
            .with_max_bytes(max_slots * element_size)
    }
}

/// A vector of `element_size`-byte elements whose first growth step fails.
pub fn starved_vec(element_size: usize, initial_capacity: usize) -> ByteVec {
    let config = FailingGrowth::FirstStep.config(element_size, initial_capacity);
    ByteVec::with_config(element_size, config).expect("initial allocation fits the ceiling")
}

/// Push encoded `i32`s until one fails; returns how many succeeded and the
/// error that stopped the run.
pub fn fill_until_error(v: &mut ByteVec, limit: usize) -> (usize, Option<VecError>) {
    for i in 0..limit {
        if let Err(e) = v.push_back(&encode_i32(i as i32)) {
            return (i, Some(e));
        }
    }
    (limit, None)
}
