//! Operation scripts replayed against both a [`ByteVec`] and a plain
//! `Vec<i32>` model.
//!
//! A script that produces the same contents and the same failures on both
//! sides shows the vector matches standard-library semantics for every
//! operation it exercises.

use blobvec::{ByteVec, VecError};

use crate::{encode_i32, read_i32s};

/// One mutation, with indices interpreted against the current length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Push(i32),
    Insert(usize, i32),
    Set(usize, i32),
    Delete(usize),
    Pop,
    Swap(usize, usize),
}

impl Op {
    /// Apply to the vector under test.
    pub fn apply(self, v: &mut ByteVec) -> Result<(), VecError> {
        match self {
            Op::Push(x) => v.push_back(&encode_i32(x)),
            Op::Insert(i, x) => v.insert(i, &encode_i32(x)),
            Op::Set(i, x) => v.set(i, &encode_i32(x)),
            Op::Delete(i) => v.delete(i),
            Op::Pop => v.pop_back(),
            Op::Swap(i, j) => v.swap(i, j),
        }
    }

    /// Apply to the reference model. Returns `false` where the vector is
    /// expected to report a range error.
    pub fn apply_model(self, model: &mut Vec<i32>) -> bool {
        let len = model.len();
        match self {
            Op::Push(x) => model.push(x),
            Op::Insert(i, x) if i <= len => model.insert(i, x),
            Op::Set(i, x) if i < len => model[i] = x,
            Op::Delete(i) if i < len => {
                model.remove(i);
            }
            Op::Pop if len > 0 => {
                model.pop();
            }
            Op::Swap(i, j) if i < len && j < len => model.swap(i, j),
            _ => return false,
        }
        true
    }
}

/// Replay `ops` on a fresh 4-byte vector and on the model, asserting they
/// agree after every step. Returns the final contents.
///
/// # Panics
///
/// Panics on the first divergence, naming the step.
pub fn replay(ops: &[Op]) -> Vec<i32> {
    let mut v = ByteVec::new(crate::I32_SIZE).expect("default config allocates");
    let mut model = Vec::new();
    for (step, &op) in ops.iter().enumerate() {
        let expected_ok = op.apply_model(&mut model);
        match op.apply(&mut v) {
            Ok(()) => assert!(
                expected_ok,
                "step {step}: {op:?} succeeded, model rejected it"
            ),
            Err(VecError::OutOfRange { .. }) => {
                assert!(!expected_ok, "step {step}: {op:?} range error, model accepted it")
            }
            Err(e) => panic!("step {step}: {op:?} failed unexpectedly: {e}"),
        }
        assert_eq!(read_i32s(&v), model, "step {step}: {op:?} diverged");
        assert_eq!(v.len(), model.len());
    }
    model
}

/// The push/delete/insert/swap walk-through: `[1,2,3]` → `[3,9,1]`.
pub fn walkthrough() -> Vec<Op> {
    vec![
        Op::Push(1),
        Op::Push(2),
        Op::Push(3),
        Op::Delete(1),
        Op::Insert(1, 9),
        Op::Swap(0, 2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkthrough_ends_reversed() {
        assert_eq!(replay(&walkthrough()), vec![3, 9, 1]);
    }

    #[test]
    fn out_of_range_ops_agree_with_model() {
        let ops = [
            Op::Pop,
            Op::Delete(0),
            Op::Set(0, 1),
            Op::Push(5),
            Op::Swap(0, 1),
        ];
        assert_eq!(replay(&ops), vec![5]);
    }
}
