//! Mergeable priority queue based on a pairing heap.
//!
//! This module provides [`PairingHeap`], a heap-ordered multiway tree stored
//! in left-child/right-sibling form.
//!
//! # Overview
//!
//! - O(1) insert, peek and merge
//! - O(log N) amortized pop
//! - O(1) len and `is_empty`
//!
//! # Internal Structure
//!
//! Every node owns the head of its child list (`child`) and the next entry of
//! its parent's child list (`sibling`). The root never has a sibling and no
//! child is ordered before its parent under the heap's [`Comparator`].
//!
//! `pop` removes the root and reassembles its children with the two-pass
//! pairing strategy: adjacent children are linked left to right, then the
//! resulting trees are folded right to left into a single root.

use std::fmt;

use smallvec::SmallVec;

use super::iter::{IntoSortedIter, Iter};
use super::order::{Comparator, MinFirst};
use crate::collection::Collection;
use crate::error::{CollectionError, InvariantViolation};

const STRUCTURE: &str = "PairingHeap";

/// Inline capacity of the buffer holding the pairs of the first pass.
const PAIR_BUFFER: usize = 16;

pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) child: Option<Box<Self>>,
    pub(super) sibling: Option<Box<Self>>,
}

impl<K, V> Node<K, V> {
    const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            child: None,
            sibling: None,
        }
    }
}

/// A mergeable priority queue based on a pairing heap.
///
/// Entries are `(key, value)` pairs; the key decides the priority through the
/// comparator `C`. With the default [`MinFirst`] the smallest key is popped
/// first. Duplicate keys are allowed.
///
/// # Time Complexity
///
/// | Operation        | Complexity         |
/// |------------------|--------------------|
/// | `new`            | O(1)               |
/// | `insert`         | O(1)               |
/// | `peek`           | O(1)               |
/// | `pop`            | O(log N) amortized |
/// | `merge`          | O(1)               |
/// | `clone`          | O(N)               |
/// | `len`/`is_empty` | O(1)               |
/// | `clear`          | O(N)               |
///
/// # Merging
///
/// [`merge`](Self::merge) consumes both heaps, so neither operand can be used
/// afterwards:
///
/// ```compile_fail
/// use ordcollections::heap::PairingHeap;
///
/// let left: PairingHeap<i32, ()> = [(1, ())].into_iter().collect();
/// let right: PairingHeap<i32, ()> = [(2, ())].into_iter().collect();
/// let merged = left.merge(right);
/// assert_eq!(right.len(), 1);
/// ```
///
/// Heaps with different priority orders have different types and cannot be
/// merged either:
///
/// ```compile_fail
/// use ordcollections::heap::{MaxFirst, PairingHeap};
///
/// let min_heap: PairingHeap<i32, ()> = PairingHeap::new();
/// let max_heap: PairingHeap<i32, (), MaxFirst> = PairingHeap::with_comparator(MaxFirst);
/// let merged = min_heap.merge(max_heap);
/// ```
///
/// # Examples
///
/// ```rust
/// use ordcollections::heap::PairingHeap;
///
/// let mut left = PairingHeap::new();
/// left.insert(5, "five");
/// left.insert(9, "nine");
///
/// let mut right = PairingHeap::new();
/// right.insert(2, "two");
///
/// let mut merged = left.merge(right);
/// assert_eq!(merged.len(), 3);
/// assert_eq!(merged.pop(), Ok((2, "two")));
/// assert_eq!(merged.pop(), Ok((5, "five")));
/// assert_eq!(merged.pop(), Ok((9, "nine")));
/// ```
pub struct PairingHeap<K, V, C = MinFirst> {
    root: Option<Box<Node<K, V>>>,
    length: usize,
    comparator: C,
}

impl<K: Ord, V> PairingHeap<K, V> {
    /// Creates an empty heap that pops the smallest key first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::heap::PairingHeap;
    ///
    /// let heap: PairingHeap<i32, String> = PairingHeap::new();
    /// assert!(heap.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(MinFirst)
    }
}

impl<K, V, C> PairingHeap<K, V, C> {
    /// Creates an empty heap ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::heap::{MaxFirst, PairingHeap};
    ///
    /// let mut heap = PairingHeap::with_comparator(MaxFirst);
    /// heap.insert(1, ());
    /// heap.insert(3, ());
    /// heap.insert(2, ());
    /// assert_eq!(heap.pop(), Ok((3, ())));
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            length: 0,
            comparator,
        }
    }

    /// Returns the number of entries in the heap.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the heap contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the comparator that orders this heap.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Removes every entry.
    ///
    /// Nodes are released through an explicit worklist, so arbitrarily deep
    /// heaps do not exhaust the call stack.
    pub fn clear(&mut self) {
        log::trace!("{STRUCTURE}: clearing {} entries", self.length);
        self.release_nodes();
        self.length = 0;
    }

    fn release_nodes(&mut self) {
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            if let Some(child) = node.child.take() {
                pending.push(child);
            }
            if let Some(sibling) = node.sibling.take() {
                pending.push(sibling);
            }
        }
    }

    /// Returns an iterator over the entries in no particular order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::heap::PairingHeap;
    ///
    /// let heap: PairingHeap<i32, i32> = [(3, 30), (1, 10), (2, 20)].into_iter().collect();
    ///
    /// let mut keys: Vec<i32> = heap.iter().map(|(key, _)| *key).collect();
    /// keys.sort_unstable();
    /// assert_eq!(keys, vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.length)
    }

    /// Returns the entry with the highest priority.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyStructure`] if the heap is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::heap::PairingHeap;
    ///
    /// let mut heap = PairingHeap::new();
    /// assert!(heap.peek().is_err());
    ///
    /// heap.insert(4, "four");
    /// heap.insert(1, "one");
    /// assert_eq!(heap.peek(), Ok((&1, &"one")));
    /// assert_eq!(heap.len(), 2);
    /// ```
    pub fn peek(&self) -> Result<(&K, &V), CollectionError> {
        self.root
            .as_deref()
            .map(|root| (&root.key, &root.value))
            .ok_or(CollectionError::empty(STRUCTURE, "peek"))
    }
}

impl<K, V, C: Comparator<K>> PairingHeap<K, V, C> {
    /// Links two heap-ordered trees and returns the new root.
    ///
    /// The root ordered later becomes the first child of the other; on equal
    /// keys `second` becomes the child.
    #[allow(clippy::unnecessary_box_returns)]
    fn link(&self, mut first: Box<Node<K, V>>, mut second: Box<Node<K, V>>) -> Box<Node<K, V>> {
        debug_assert!(first.sibling.is_none() && second.sibling.is_none());
        if self.comparator.compare(&second.key, &first.key).is_lt() {
            first.sibling = second.child.take();
            second.child = Some(first);
            second
        } else {
            second.sibling = first.child.take();
            first.child = Some(second);
            first
        }
    }

    /// Two-pass pairing over a child list.
    fn combine_siblings(&self, head: Option<Box<Node<K, V>>>) -> Option<Box<Node<K, V>>> {
        let mut pairs: SmallVec<[Box<Node<K, V>>; PAIR_BUFFER]> = SmallVec::new();
        let mut head = head;
        while let Some(mut first) = head.take() {
            head = first.sibling.take();
            match head.take() {
                Some(mut second) => {
                    head = second.sibling.take();
                    pairs.push(self.link(first, second));
                }
                None => pairs.push(first),
            }
        }

        let mut combined = pairs.pop()?;
        while let Some(previous) = pairs.pop() {
            combined = self.link(previous, combined);
        }
        Some(combined)
    }

    /// Inserts an entry.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::heap::PairingHeap;
    ///
    /// let mut heap = PairingHeap::new();
    /// heap.insert(2, "two");
    /// heap.insert(2, "deux");
    ///
    /// assert_eq!(heap.len(), 2);
    /// assert_eq!(heap.peek(), Ok((&2, &"two")));
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        let node = Box::new(Node::leaf(key, value));
        self.root = Some(match self.root.take() {
            Some(root) => self.link(root, node),
            None => node,
        });
        self.length += 1;
    }

    /// Removes and returns the entry with the highest priority.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyStructure`] if the heap is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::heap::PairingHeap;
    ///
    /// let mut heap: PairingHeap<i32, char> = [(2, 'b'), (1, 'a')].into_iter().collect();
    /// assert_eq!(heap.pop(), Ok((1, 'a')));
    /// assert_eq!(heap.pop(), Ok((2, 'b')));
    /// assert!(heap.pop().unwrap_err().is_empty_structure());
    /// ```
    pub fn pop(&mut self) -> Result<(K, V), CollectionError> {
        let mut root = self
            .root
            .take()
            .ok_or(CollectionError::empty(STRUCTURE, "pop"))?;
        self.root = self.combine_siblings(root.child.take());
        self.length -= 1;
        let Node { key, value, .. } = *root;
        Ok((key, value))
    }

    /// Merges two heaps into one, consuming both.
    ///
    /// The merged heap keeps the comparator of `self`. On equal root keys the
    /// root of `other` is placed below the root of `self`.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::heap::PairingHeap;
    ///
    /// let left: PairingHeap<i32, ()> = (0..3).map(|key| (key, ())).collect();
    /// let right: PairingHeap<i32, ()> = PairingHeap::new();
    ///
    /// let merged = left.merge(right);
    /// assert_eq!(merged.len(), 3);
    /// ```
    #[must_use]
    pub fn merge(mut self, mut other: Self) -> Self {
        log::trace!(
            "{STRUCTURE}: merging {} entries into {}",
            other.length,
            self.length
        );
        self.root = match (self.root.take(), other.root.take()) {
            (Some(first), Some(second)) => Some(self.link(first, second)),
            (first, second) => first.or(second),
        };
        self.length += other.length;
        other.length = 0;
        self
    }

    /// Consumes the heap, yielding entries in priority order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::heap::PairingHeap;
    ///
    /// let heap: PairingHeap<i32, ()> = [5, 1, 4, 2, 3].into_iter().map(|key| (key, ())).collect();
    /// let keys: Vec<i32> = heap.into_sorted_iter().map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![1, 2, 3, 4, 5]);
    /// ```
    #[must_use]
    pub const fn into_sorted_iter(self) -> IntoSortedIter<K, V, C> {
        IntoSortedIter::new(self)
    }

    /// Consumes the heap and returns its entries in priority order.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<(K, V)> {
        self.into_sorted_iter().collect()
    }

    /// Returns `true` if an entry with a key the comparator orders equal to
    /// `key` is present.
    ///
    /// Only the comparator is consulted, so with a [`CompareFn`](super::CompareFn) that looks at
    /// part of the key, any key agreeing on that part counts as a match.
    ///
    /// Subtrees whose root is already ordered after `key` are skipped, since
    /// nothing below them can match.
    ///
    /// # Complexity
    ///
    /// O(N) in the worst case
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::heap::PairingHeap;
    ///
    /// let heap: PairingHeap<i32, ()> = (0..10).map(|key| (key * 2, ())).collect();
    /// assert!(heap.contains_key(&8));
    /// assert!(!heap.contains_key(&7));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        let mut pending: SmallVec<[&Node<K, V>; PAIR_BUFFER]> = SmallVec::new();
        pending.extend(self.root.as_deref());
        while let Some(node) = pending.pop() {
            pending.extend(node.sibling.as_deref());
            match self.comparator.compare(&node.key, key) {
                std::cmp::Ordering::Equal => return true,
                std::cmp::Ordering::Less => pending.extend(node.child.as_deref()),
                std::cmp::Ordering::Greater => {}
            }
        }
        false
    }

    /// Returns `true` if any entry holds a value equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(N)
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, candidate)| candidate == value)
    }

    /// Checks the heap order, the sibling-free root and the length counter.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::heap::PairingHeap;
    ///
    /// let mut heap: PairingHeap<i32, ()> = (0..100).rev().map(|key| (key, ())).collect();
    /// heap.pop().unwrap();
    /// assert_eq!(heap.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let result = self.check_invariants();
        if let Err(violation) = &result {
            log::debug!("{STRUCTURE}: validation failed: {violation}");
        }
        result
    }

    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self
            .root
            .as_ref()
            .is_some_and(|root| root.sibling.is_some())
        {
            return Err(InvariantViolation::RootSibling);
        }

        // Each entry pairs a node with the key of its parent.
        let mut pending: Vec<(&Node<K, V>, Option<&K>)> = Vec::new();
        pending.extend(self.root.as_deref().map(|root| (root, None)));
        let mut actual = 0;
        while let Some((node, parent_key)) = pending.pop() {
            if parent_key.is_some_and(|parent_key| {
                self.comparator.compare(&node.key, parent_key).is_lt()
            }) {
                return Err(InvariantViolation::HeapOrder);
            }
            actual += 1;
            if let Some(sibling) = node.sibling.as_deref() {
                pending.push((sibling, parent_key));
            }
            if let Some(child) = node.child.as_deref() {
                pending.push((child, Some(&node.key)));
            }
        }

        if actual == self.length {
            Ok(())
        } else {
            Err(InvariantViolation::LengthMismatch {
                recorded: self.length,
                actual,
            })
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C> Drop for PairingHeap<K, V, C> {
    fn drop(&mut self) {
        self.release_nodes();
    }
}

/// Deep copy built with explicit stacks.
///
/// The source is walked in pre-order (node, sibling list, child list) and the
/// copy is assembled from the reversed walk, so both links of a node are
/// already built when the node itself is copied.
impl<K: Clone, V: Clone, C: Clone> Clone for PairingHeap<K, V, C> {
    fn clone(&self) -> Self {
        let mut walk: Vec<&Node<K, V>> = Vec::with_capacity(self.length);
        let mut pending: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            walk.push(node);
            if let Some(child) = node.child.as_deref() {
                pending.push(child);
            }
            if let Some(sibling) = node.sibling.as_deref() {
                pending.push(sibling);
            }
        }

        let mut built: Vec<Box<Node<K, V>>> = Vec::new();
        for source in walk.into_iter().rev() {
            let sibling = source.sibling.as_ref().and_then(|_| built.pop());
            let child = source.child.as_ref().and_then(|_| built.pop());
            built.push(Box::new(Node {
                key: source.key.clone(),
                value: source.value.clone(),
                child,
                sibling,
            }));
        }

        Self {
            root: built.pop(),
            length: self.length,
            comparator: self.comparator.clone(),
        }
    }
}

impl<K, V, C: Default> Default for PairingHeap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> Collection for PairingHeap<K, V, C> {
    #[inline]
    fn len(&self) -> usize {
        self.length
    }

    fn clear(&mut self) {
        Self::clear(self);
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for PairingHeap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut heap = Self::default();
        heap.extend(iter);
        heap
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for PairingHeap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a PairingHeap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for PairingHeap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// Static assertions to verify PairingHeap can cross threads
static_assertions::assert_impl_all!(PairingHeap<i32, String>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(PairingHeap<i32, String, super::MaxFirst>: Send, Sync, Clone);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, C> serde::Serialize for PairingHeap<K, V, C>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for entry in self {
            sequence.serialize_element(&entry)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct PairingHeapVisitor<K, V, C> {
    marker: std::marker::PhantomData<(K, V, C)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::de::Visitor<'de> for PairingHeapVisitor<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Comparator<K> + Default,
{
    type Value = PairingHeap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of (key, value) pairs")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut heap = PairingHeap::default();
        while let Some((key, value)) = access.next_element()? {
            heap.insert(key, value);
        }
        Ok(heap)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::Deserialize<'de> for PairingHeap<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Comparator<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PairingHeapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
