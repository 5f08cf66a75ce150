//! Priority orders for [`PairingHeap`](super::PairingHeap).
//!
//! A [`Comparator`] decides which of two keys leaves the heap first:
//! `compare(a, b) == Ordering::Less` means `a` has the higher priority.

use std::cmp::Ordering;
use std::fmt;

/// A total order over heap keys.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use ordcollections::heap::{Comparator, MaxFirst, MinFirst};
///
/// assert_eq!(MinFirst.compare(&1, &2), Ordering::Less);
/// assert_eq!(MaxFirst.compare(&1, &2), Ordering::Greater);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares two keys; the key ordered first is popped first.
    fn compare(&self, left: &K, right: &K) -> Ordering;
}

/// The natural order: the smallest key is popped first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MinFirst;

impl<K: Ord + ?Sized> Comparator<K> for MinFirst {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

/// The reversed natural order: the largest key is popped first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MaxFirst;

impl<K: Ord + ?Sized> Comparator<K> for MaxFirst {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        right.cmp(left)
    }
}

/// An order given by a closure.
///
/// # Examples
///
/// ```rust
/// use ordcollections::heap::{CompareFn, PairingHeap};
///
/// // Shortest string first.
/// let mut heap = PairingHeap::with_comparator(CompareFn(|left: &&str, right: &&str| {
///     left.len().cmp(&right.len())
/// }));
/// heap.insert("three", 3);
/// heap.insert("one", 1);
/// heap.insert("eleven", 11);
///
/// assert_eq!(heap.pop(), Ok(("one", 1)));
/// ```
#[derive(Clone, Copy, Default)]
pub struct CompareFn<F>(pub F);

impl<K: ?Sized, F> Comparator<K> for CompareFn<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        (self.0)(left, right)
    }
}

impl<F> fmt::Debug for CompareFn<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("CompareFn(<closure>)")
    }
}
