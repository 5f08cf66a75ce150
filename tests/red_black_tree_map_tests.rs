#![cfg(feature = "tree")]
//! Unit tests for RedBlackTreeMap.

use ordcollections::collection::Collection;
use ordcollections::error::CollectionError;
use ordcollections::tree::RedBlackTreeMap;
use rstest::{fixture, rstest};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Bound;

#[fixture]
fn numbers() -> RedBlackTreeMap<i32, String> {
    [5, 9, 2, 7, 1]
        .into_iter()
        .map(|key| (key, key.to_string()))
        .collect()
}

// =============================================================================
// Basic Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_map() {
    let map: RedBlackTreeMap<i32, String> = RedBlackTreeMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.iter().next(), None);
}

#[rstest]
fn test_default_creates_empty_map() {
    let map: RedBlackTreeMap<i32, String> = RedBlackTreeMap::default();
    assert!(map.is_empty());
}

// =============================================================================
// Insert and Get Tests
// =============================================================================

#[rstest]
fn test_insert_then_pop_min_yields_ascending_keys() {
    let mut map = RedBlackTreeMap::new();
    map.insert(5, "five");
    map.insert(9, "nine");
    map.insert(2, "two");

    assert_eq!(map.pop_min(), Ok((2, "two")));
    assert_eq!(map.pop_min(), Ok((5, "five")));
    assert_eq!(map.pop_min(), Ok((9, "nine")));
    assert!(map.is_empty());
}

#[rstest]
fn test_insert_existing_key_replaces_value(mut numbers: RedBlackTreeMap<i32, String>) {
    let previous = numbers.insert(7, "seven".to_string());
    assert_eq!(previous, Some("7".to_string()));
    assert_eq!(numbers.get(&7), Some(&"seven".to_string()));
    assert_eq!(numbers.len(), 5);
}

#[rstest]
fn test_insert_new_key_reports_absence() {
    let mut map = RedBlackTreeMap::new();
    assert!(map.insert("alpha", 1).is_none());
    assert!(map.insert("beta", 2).is_none());
    assert!(map.insert("alpha", 3).is_some());
    assert_eq!(map.len(), 2);
}

#[rstest]
#[case(1, Some("1"))]
#[case(9, Some("9"))]
#[case(3, None)]
#[case(100, None)]
fn test_get(
    numbers: RedBlackTreeMap<i32, String>,
    #[case] key: i32,
    #[case] expected: Option<&str>,
) {
    assert_eq!(numbers.get(&key).map(String::as_str), expected);
    assert_eq!(numbers.contains_key(&key), expected.is_some());
}

#[rstest]
fn test_get_with_borrowed_key() {
    let mut map = RedBlackTreeMap::new();
    map.insert("apple".to_string(), 1);
    map.insert("banana".to_string(), 2);
    assert_eq!(map.get("banana"), Some(&2));
    assert!(map.contains_key("apple"));
    assert!(!map.contains_key("cherry"));
}

#[rstest]
fn test_get_mut_updates_in_place(mut numbers: RedBlackTreeMap<i32, String>) {
    numbers.get_mut(&2).unwrap().push('!');
    assert_eq!(numbers.get(&2), Some(&"2!".to_string()));
    assert!(numbers.get_mut(&3).is_none());
}

// =============================================================================
// Remove Tests
// =============================================================================

#[rstest]
fn test_remove_present_key(mut numbers: RedBlackTreeMap<i32, String>) {
    assert_eq!(numbers.remove(&5), Some("5".to_string()));
    assert_eq!(numbers.len(), 4);
    assert!(!numbers.contains_key(&5));
    assert_eq!(numbers.validate(), Ok(()));
}

#[rstest]
fn test_remove_absent_key_leaves_map_unchanged(mut numbers: RedBlackTreeMap<i32, String>) {
    let before = numbers.clone();
    assert_eq!(numbers.remove(&42), None);
    assert_eq!(numbers, before);
}

#[rstest]
fn test_remove_from_empty_map() {
    let mut map: RedBlackTreeMap<i32, i32> = RedBlackTreeMap::new();
    assert_eq!(map.remove(&1), None);
    assert_eq!(map.remove_entry(&1), None);
}

#[rstest]
fn test_remove_entry_returns_stored_key(mut numbers: RedBlackTreeMap<i32, String>) {
    assert_eq!(numbers.remove_entry(&9), Some((9, "9".to_string())));
}

#[rstest]
fn test_remove_all_in_interleaved_order() {
    let mut map: RedBlackTreeMap<i32, i32> = (0..500).map(|key| (key, key)).collect();
    for key in (0..500).filter(|key| key % 2 == 0) {
        assert_eq!(map.remove(&key), Some(key));
    }
    assert_eq!(map.validate(), Ok(()));
    for key in (0..500).rev().filter(|key| key % 2 == 1) {
        assert_eq!(map.remove(&key), Some(key));
        assert_eq!(map.validate(), Ok(()));
    }
    assert!(map.is_empty());
}

// =============================================================================
// Min / Max Tests
// =============================================================================

#[rstest]
fn test_find_min_and_max(numbers: RedBlackTreeMap<i32, String>) {
    assert_eq!(numbers.find_min(), Ok((&1, &"1".to_string())));
    assert_eq!(numbers.find_max(), Ok((&9, &"9".to_string())));
    assert_eq!(numbers.len(), 5);
}

#[rstest]
fn test_pop_max_yields_descending_keys(mut numbers: RedBlackTreeMap<i32, String>) {
    let mut keys = Vec::new();
    while let Ok((key, _)) = numbers.pop_max() {
        keys.push(key);
        assert_eq!(numbers.validate(), Ok(()));
    }
    assert_eq!(keys, vec![9, 7, 5, 2, 1]);
}

#[rstest]
fn test_empty_map_reports_empty_structure() {
    let mut map: RedBlackTreeMap<i32, i32> = RedBlackTreeMap::new();
    assert_eq!(
        map.find_min(),
        Err(CollectionError::EmptyStructure {
            structure: "RedBlackTreeMap",
            operation: "find_min",
        })
    );
    assert!(map.find_max().unwrap_err().is_empty_structure());
    assert!(map.pop_min().unwrap_err().is_empty_structure());
    assert!(map.pop_max().unwrap_err().is_empty_structure());
}

#[rstest]
fn test_cleared_map_reports_empty_structure(mut numbers: RedBlackTreeMap<i32, String>) {
    numbers.clear();
    assert!(numbers.is_empty());
    assert!(numbers.find_min().unwrap_err().is_empty_structure());
    numbers.insert(3, "3".to_string());
    assert_eq!(numbers.pop_min(), Ok((3, "3".to_string())));
}

// =============================================================================
// Iteration Tests
// =============================================================================

#[rstest]
fn test_iter_is_ascending(numbers: RedBlackTreeMap<i32, String>) {
    let keys: Vec<i32> = numbers.keys().copied().collect();
    assert_eq!(keys, vec![1, 2, 5, 7, 9]);
}

#[rstest]
fn test_iter_is_restartable(numbers: RedBlackTreeMap<i32, String>) {
    let first: Vec<_> = numbers.iter().collect();
    let second: Vec<_> = numbers.iter().collect();
    assert_eq!(first, second);
}

#[rstest]
fn test_iter_rev_is_descending(numbers: RedBlackTreeMap<i32, String>) {
    let keys: Vec<i32> = numbers.keys().rev().copied().collect();
    assert_eq!(keys, vec![9, 7, 5, 2, 1]);
}

#[rstest]
fn test_values_follow_key_order(numbers: RedBlackTreeMap<i32, String>) {
    let values: Vec<&str> = numbers.values().map(String::as_str).collect();
    assert_eq!(values, vec!["1", "2", "5", "7", "9"]);
}

#[rstest]
fn test_values_mut(mut numbers: RedBlackTreeMap<i32, String>) {
    for value in numbers.values_mut() {
        value.insert(0, '#');
    }
    assert_eq!(numbers.get(&5), Some(&"#5".to_string()));
    assert_eq!(numbers.values_mut().len(), 5);
}

#[rstest]
#[case::half_open((Bound::Included(2), Bound::Excluded(7)), vec![2, 5])]
#[case::inclusive((Bound::Included(2), Bound::Included(7)), vec![2, 5, 7])]
#[case::between_keys((Bound::Included(3), Bound::Included(6)), vec![5])]
#[case::excluded_start((Bound::Excluded(5), Bound::Unbounded), vec![7, 9])]
fn test_range(
    numbers: RedBlackTreeMap<i32, String>,
    #[case] bounds: (Bound<i32>, Bound<i32>),
    #[case] expected: Vec<i32>,
) {
    let keys: Vec<i32> = numbers.range(bounds).map(|(key, _)| *key).collect();
    assert_eq!(keys, expected);
}

#[rstest]
fn test_range_unbounded_and_reversed(numbers: RedBlackTreeMap<i32, String>) {
    assert_eq!(numbers.range::<i32, _>(..).count(), 5);
    let keys: Vec<i32> = numbers.range(..=5).rev().map(|(key, _)| *key).collect();
    assert_eq!(keys, vec![5, 2, 1]);
}

#[rstest]
fn test_into_iter_yields_owned_entries(numbers: RedBlackTreeMap<i32, String>) {
    let entries: Vec<(i32, String)> = numbers.into_iter().collect();
    assert_eq!(entries.first(), Some(&(1, "1".to_string())));
    assert_eq!(entries.len(), 5);
}

#[rstest]
fn test_for_loop_over_reference(numbers: RedBlackTreeMap<i32, String>) {
    let mut total = 0;
    for (key, _) in &numbers {
        total += key;
    }
    assert_eq!(total, 24);
}

// =============================================================================
// Clone and Trait Tests
// =============================================================================

#[rstest]
fn test_clone_is_independent_both_ways(numbers: RedBlackTreeMap<i32, String>) {
    let mut original = numbers;
    let mut copy = original.clone();

    copy.insert(100, "100".to_string());
    original.remove(&1);

    assert!(!original.contains_key(&100));
    assert!(copy.contains_key(&1));
    assert_eq!(original.len(), 4);
    assert_eq!(copy.len(), 6);
}

#[rstest]
fn test_equal_maps_hash_equally() {
    let first: RedBlackTreeMap<i32, i32> = [(1, 1), (2, 2), (3, 3)].into_iter().collect();
    let second: RedBlackTreeMap<i32, i32> = [(3, 3), (1, 1), (2, 2)].into_iter().collect();

    let mut first_hasher = DefaultHasher::new();
    let mut second_hasher = DefaultHasher::new();
    first.hash(&mut first_hasher);
    second.hash(&mut second_hasher);

    assert_eq!(first, second);
    assert_eq!(first_hasher.finish(), second_hasher.finish());
}

#[rstest]
fn test_extend_overwrites_existing_keys(mut numbers: RedBlackTreeMap<i32, String>) {
    numbers.extend([(1, "one".to_string()), (3, "three".to_string())]);
    assert_eq!(numbers.len(), 6);
    assert_eq!(numbers[&1], "one");
}

#[rstest]
fn test_collection_trait_matches_inherent_methods(mut numbers: RedBlackTreeMap<i32, String>) {
    assert_eq!(Collection::len(&numbers), numbers.len());
    Collection::clear(&mut numbers);
    assert!(Collection::is_empty(&numbers));
}

#[rstest]
fn test_display_and_debug(numbers: RedBlackTreeMap<i32, String>) {
    assert_eq!(format!("{numbers}"), "{1: 1, 2: 2, 5: 5, 7: 7, 9: 9}");
    assert_eq!(
        format!("{numbers:?}"),
        r#"{1: "1", 2: "2", 5: "5", 7: "7", 9: "9"}"#
    );
}

// =============================================================================
// Invariant Tests
// =============================================================================

#[rstest]
fn test_sorted_inserts_stay_balanced() {
    let mut map = RedBlackTreeMap::new();
    for key in 0..10_000 {
        map.insert(key, ());
    }
    assert_eq!(map.validate(), Ok(()));
    for key in (0..10_000).step_by(7) {
        map.remove(&key);
    }
    assert_eq!(map.validate(), Ok(()));
    assert_eq!(map.len(), 10_000 - 1_429);
}
