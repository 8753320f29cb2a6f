//! End-to-end behaviour of `ByteVec` through the public API: construction,
//! ordering under insert/delete, growth, range rejection and survival of
//! failed allocations.

use blobvec::{ByteVec, TypedVec, VecConfig, VecError};
use blobvec_test_utils::fixtures::{replay, walkthrough, Op};
use blobvec_test_utils::{
    encode_i32, fill_until_error, i32_vec, read_i32s, starved_vec, FailingGrowth, I32_SIZE,
};
use proptest::prelude::*;

#[test]
fn construction_validity() {
    assert!(matches!(
        ByteVec::new(0),
        Err(VecError::InvalidArgument { .. })
    ));
    for size in [1, 3, 4, 16, 1000] {
        let v = ByteVec::new(size).unwrap();
        assert_eq!(v.len(), 0);
        assert_eq!(v.element_size(), size);
    }
}

#[test]
fn walkthrough_scenario() {
    assert_eq!(replay(&walkthrough()), vec![3, 9, 1]);
}

#[test]
fn growth_is_transparent_past_initial_capacity() {
    let values: Vec<i32> = (0..257).map(|x| x * 3 - 100).collect();
    let v = i32_vec(&values);
    assert_eq!(v.len(), 257);
    assert!(v.capacity() >= 257);
    assert_eq!(read_i32s(&v), values);
}

#[test]
fn growth_across_many_doublings() {
    let values: Vec<i32> = (0..5000).collect();
    let v = i32_vec(&values);
    assert_eq!(v.capacity(), 8192);
    assert_eq!(v.memory_bytes(), 8192 * I32_SIZE);
    assert_eq!(read_i32s(&v), values);
}

#[test]
fn range_rejection_makes_no_mutation() {
    let mut v = i32_vec(&[10, 20, 30]);
    let before = v.as_bytes().to_vec();

    assert!(matches!(v.get(3), Err(VecError::OutOfRange { .. })));
    assert!(matches!(v.get_copy(3), Err(VecError::OutOfRange { .. })));
    assert!(matches!(
        v.set(3, &encode_i32(0)),
        Err(VecError::OutOfRange { .. })
    ));
    assert!(matches!(v.delete(3), Err(VecError::OutOfRange { .. })));
    assert!(matches!(v.swap(0, 3), Err(VecError::OutOfRange { .. })));

    assert_eq!(v.as_bytes(), &before[..]);
    assert_eq!(v.len(), 3);
}

#[test]
fn failed_growth_leaves_vector_usable() {
    let mut v = starved_vec(I32_SIZE, 16);
    let (pushed, err) = fill_until_error(&mut v, 1000);
    assert_eq!(pushed, 15);
    assert_eq!(
        err,
        Some(VecError::OutOfMemory {
            requested: 32 * I32_SIZE
        })
    );

    let expected: Vec<i32> = (0..15).collect();
    assert_eq!(v.len(), 15);
    assert_eq!(v.capacity(), 16);
    assert_eq!(read_i32s(&v), expected);

    // Insert in the middle also needs growth and fails the same way.
    assert!(matches!(
        v.insert(3, &encode_i32(99)),
        Err(VecError::OutOfMemory { .. })
    ));
    assert_eq!(read_i32s(&v), expected);

    // Non-growing operations still work.
    v.delete(0).unwrap();
    v.swap(0, 1).unwrap();
    v.set(2, &encode_i32(-3)).unwrap();
    assert_eq!(read_i32s(&v)[..3], [2, 1, -3]);

    // Freed slot makes room for one more push without growth.
    v.push_back(&encode_i32(42)).unwrap();
    assert_eq!(v.len(), 15);
}

#[test]
fn growth_ceiling_after_two_steps() {
    let config = FailingGrowth::AfterSteps(2).config(8, 4);
    let mut v = ByteVec::with_config(8, config).unwrap();
    let mut pushed = 0;
    while v.push_back(&[pushed as u8; 8]).is_ok() {
        pushed += 1;
    }
    assert_eq!(pushed, 15);
    assert_eq!(v.get(14).unwrap(), &[14u8; 8]);
}

#[test]
fn typed_and_byte_vec_grow_in_lockstep() {
    let mut bytes = ByteVec::new(I32_SIZE).unwrap();
    let mut typed = TypedVec::<i32>::new().unwrap();
    for x in 0..1100 {
        bytes.push_back(&encode_i32(x)).unwrap();
        typed.push_back(x).unwrap();
        assert_eq!(bytes.capacity(), typed.capacity());
    }
    assert_eq!(read_i32s(&bytes), typed.as_slice());
}

#[test]
fn custom_initial_capacity_of_one_grows_before_first_insert() {
    let config = VecConfig::new().with_initial_capacity(1);
    let mut v = ByteVec::with_config(2, config).unwrap();
    assert_eq!(v.capacity(), 1);
    v.push_back(&[1, 2]).unwrap();
    assert_eq!(v.capacity(), 2);
    assert_eq!(v.get(0).unwrap(), &[1u8, 2][..]);
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        2 => (0usize..64, any::<i32>()).prop_map(|(i, x)| Op::Insert(i, x)),
        2 => (0usize..64, any::<i32>()).prop_map(|(i, x)| Op::Set(i, x)),
        2 => (0usize..64).prop_map(Op::Delete),
        1 => Just(Op::Pop),
        2 => (0usize..64, 0usize..64).prop_map(|(i, j)| Op::Swap(i, j)),
    ]
}

proptest! {
    #[test]
    fn random_scripts_match_std_vec(ops in proptest::collection::vec(op_strategy(), 0..400)) {
        replay(&ops);
    }

    #[test]
    fn push_count_equals_length(values in proptest::collection::vec(any::<i32>(), 0..700)) {
        let v = i32_vec(&values);
        prop_assert_eq!(v.len(), values.len());
    }

    #[test]
    fn set_then_get_is_byte_exact(
        values in proptest::collection::vec(any::<i32>(), 1..50),
        pos in any::<prop::sample::Index>(),
        x in any::<i32>(),
    ) {
        let mut v = i32_vec(&values);
        let i = pos.index(values.len());
        v.set(i, &encode_i32(x)).unwrap();
        prop_assert_eq!(v.get(i).unwrap(), &encode_i32(x)[..]);
        prop_assert_eq!(&*v.get_copy(i).unwrap(), &encode_i32(x)[..]);
    }
}
