#![cfg(feature = "heap")]
//! Property-based tests for PairingHeap.
//!
//! The model is a sorted `Vec` of keys: the heap must always expose its
//! smallest element and pop keys in non-decreasing order.

use ordcollections::heap::{MaxFirst, PairingHeap};
use proptest::prelude::*;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

#[derive(Debug, Clone)]
enum Operation {
    Insert(i32),
    Pop,
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (-100_i32..100).prop_map(Operation::Insert),
        1 => Just(Operation::Pop),
    ]
}

fn arbitrary_heap(max_size: usize) -> impl Strategy<Value = (PairingHeap<i32, ()>, Vec<i32>)> {
    prop::collection::vec(any::<i32>(), 0..max_size).prop_map(|keys| {
        let heap = keys.iter().map(|&key| (key, ())).collect();
        let mut sorted = keys;
        sorted.sort_unstable();
        (heap, sorted)
    })
}

fn drain(heap: PairingHeap<i32, ()>) -> Vec<i32> {
    heap.into_sorted_iter().map(|(key, ())| key).collect()
}

// =============================================================================
// Model Laws
// =============================================================================

proptest! {
    /// Law: peek always returns the minimum resident key.
    #[test]
    fn prop_peek_is_minimum(operations in prop::collection::vec(operation(), 0..300)) {
        let mut heap = PairingHeap::new();
        let mut model: Vec<i32> = Vec::new();

        for operation in operations {
            match operation {
                Operation::Insert(key) => {
                    heap.insert(key, ());
                    model.push(key);
                    model.sort_unstable();
                }
                Operation::Pop => {
                    let popped = heap.pop().ok().map(|(key, ())| key);
                    let expected = (!model.is_empty()).then(|| model.remove(0));
                    prop_assert_eq!(popped, expected);
                }
            }
            prop_assert_eq!(heap.peek().ok().map(|(key, _)| *key), model.first().copied());
            prop_assert_eq!(heap.len(), model.len());
            prop_assert_eq!(heap.validate(), Ok(()));
        }
    }

    /// Law: draining the heap yields its keys in sorted order.
    #[test]
    fn prop_drain_is_sorted((heap, sorted) in arbitrary_heap(300)) {
        prop_assert_eq!(drain(heap), sorted);
    }

    /// Law: a max-first heap drains in descending order.
    #[test]
    fn prop_max_first_drains_descending(keys in prop::collection::vec(any::<i32>(), 0..200)) {
        let heap: PairingHeap<i32, (), MaxFirst> = keys.iter().map(|&key| (key, ())).collect();
        let drained: Vec<i32> = heap.into_sorted_iter().map(|(key, ())| key).collect();
        let mut expected = keys;
        expected.sort_unstable_by(|left, right| right.cmp(left));
        prop_assert_eq!(drained, expected);
    }
}

// =============================================================================
// Merge Laws
// =============================================================================

proptest! {
    /// Law: merge contains exactly the entries of both operands.
    #[test]
    fn prop_merge_is_union((left, left_sorted) in arbitrary_heap(100), (right, right_sorted) in arbitrary_heap(100)) {
        let merged = left.merge(right);
        prop_assert_eq!(merged.len(), left_sorted.len() + right_sorted.len());
        prop_assert_eq!(merged.validate(), Ok(()));

        let mut expected = left_sorted;
        expected.extend(right_sorted);
        expected.sort_unstable();
        prop_assert_eq!(drain(merged), expected);
    }

    /// Law: merging with an empty heap is the identity.
    #[test]
    fn prop_merge_empty_identity((heap, sorted) in arbitrary_heap(100)) {
        let merged = heap.merge(PairingHeap::new());
        prop_assert_eq!(drain(merged), sorted.clone());
        let heap: PairingHeap<i32, ()> = sorted.iter().map(|&key| (key, ())).collect();
        let merged = PairingHeap::new().merge(heap);
        prop_assert_eq!(drain(merged), sorted);
    }
}

// =============================================================================
// Clone Laws
// =============================================================================

proptest! {
    /// Law: a clone holds the same entries, and changes to either side stay there.
    #[test]
    fn prop_clone_is_independent((heap, sorted) in arbitrary_heap(100), extra in prop::collection::vec(any::<i32>(), 1..20)) {
        let mut original = heap;
        let mut copy = original.clone();
        prop_assert_eq!(copy.validate(), Ok(()));

        for &key in &extra {
            copy.insert(key, ());
        }
        let _ = original.pop();

        let mut expected_copy = sorted.clone();
        expected_copy.extend(extra);
        expected_copy.sort_unstable();
        let expected_original: Vec<i32> = sorted.into_iter().skip(1).collect();

        prop_assert_eq!(drain(copy), expected_copy);
        prop_assert_eq!(drain(original), expected_original);
    }
}
