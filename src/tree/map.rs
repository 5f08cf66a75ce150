//! Mutable ordered map based on a Red-Black Tree.
//!
//! This module provides [`RedBlackTreeMap`], an ordered key-value map that
//! keeps itself balanced on every insertion and removal.
//!
//! # Overview
//!
//! - O(log N) get
//! - O(log N) insert, with at most two rotations
//! - O(log N) remove, with at most three rotations
//! - O(log N) min/max and `pop_min`/`pop_max`
//! - O(1) amortized step for in-order iteration
//! - O(1) len and `is_empty`
//!
//! # Internal Structure
//!
//! Nodes are stored in an index arena and linked through `left`, `right` and
//! `parent` indices. The tree maintains the following invariants:
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. All leaves (NIL) are black
//! 4. Red nodes have only black children
//! 5. Every path from a node to a leaf has the same number of black nodes
//!
//! These invariants bound the height by 2 log2(N + 1).

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, Index, RangeBounds};

use super::arena::{Arena, Color, Node, NodeId};
use super::iter::{IntoIter, Iter, Range, ValuesMut};
use crate::collection::Collection;
use crate::error::{CollectionError, InvariantViolation, fatal};

const STRUCTURE: &str = "RedBlackTreeMap";

// =============================================================================
// RedBlackTreeMap Definition
// =============================================================================

/// An ordered map based on a Red-Black Tree.
///
/// Keys must implement `Ord`. Entries are kept in ascending key order, which
/// makes minimum/maximum queries, range queries and ordered iteration cheap.
///
/// # Time Complexity
///
/// | Operation               | Complexity |
/// |-------------------------|------------|
/// | `new`                   | O(1)       |
/// | `get` / `contains_key`  | O(log N)   |
/// | `insert`                | O(log N)   |
/// | `remove`                | O(log N)   |
/// | `find_min` / `find_max` | O(log N)   |
/// | `pop_min` / `pop_max`   | O(log N)   |
/// | `range`                 | O(log N + k) |
/// | `len` / `is_empty`      | O(1)       |
/// | `clear`                 | O(N)       |
///
/// # Iteration and mutation
///
/// Borrowing iterators hold a shared borrow of the map, so the map cannot be
/// modified while one of them is alive. The borrow checker rejects such code:
///
/// ```compile_fail
/// use ordcollections::tree::RedBlackTreeMap;
///
/// let mut map = RedBlackTreeMap::new();
/// map.insert(1, "one");
/// for (key, _) in map.iter() {
///     map.insert(key + 1, "next");
/// }
/// ```
///
/// # Examples
///
/// ```rust
/// use ordcollections::tree::RedBlackTreeMap;
///
/// let mut map = RedBlackTreeMap::new();
/// map.insert(5, "five");
/// map.insert(9, "nine");
/// map.insert(2, "two");
///
/// assert_eq!(map.pop_min(), Ok((2, "two")));
/// assert_eq!(map.pop_min(), Ok((5, "five")));
/// assert_eq!(map.pop_min(), Ok((9, "nine")));
/// assert!(map.is_empty());
/// ```
#[derive(Clone)]
pub struct RedBlackTreeMap<K, V> {
    /// Storage for every live node
    arena: Arena<K, V>,
    /// Root node of the tree
    root: Option<NodeId>,
    /// Number of entries
    length: usize,
}

impl<K, V> RedBlackTreeMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let map: RedBlackTreeMap<i32, String> = RedBlackTreeMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            length: 0,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Removes every entry.
    ///
    /// The nodes are released by dropping the arena's storage, which does
    /// not recurse through the tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let mut map: RedBlackTreeMap<i32, i32> = (0..100).map(|key| (key, key)).collect();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert!(map.find_min().is_err());
    /// ```
    pub fn clear(&mut self) {
        log::trace!("{STRUCTURE}: clearing {} entries", self.length);
        self.arena.clear();
        self.root = None;
        self.length = 0;
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// The iterator is lazy: each step walks to the in-order successor. It
    /// can also be consumed from the back for descending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let map: RedBlackTreeMap<i32, &str> =
    ///     [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    ///
    /// let entries: Vec<(&i32, &&str)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &"one"), (&2, &"two"), (&3, &"three")]);
    ///
    /// let descending: Vec<&i32> = map.iter().rev().map(|(key, _)| key).collect();
    /// assert_eq!(descending, vec![&3, &2, &1]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        let Some(root) = self.root else {
            return Iter::new(&self.arena, None, None, 0);
        };
        Iter::new(
            &self.arena,
            Some(self.arena.leftmost(root)),
            Some(self.arena.rightmost(root)),
            self.length,
        )
    }

    /// Returns an iterator over keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let map: RedBlackTreeMap<i32, &str> =
    ///     [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    ///
    /// let keys: Vec<&i32> = map.keys().collect();
    /// assert_eq!(keys, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let map: RedBlackTreeMap<i32, i32> = [(1, 10), (2, 20), (3, 30)].into_iter().collect();
    ///
    /// let sum: i32 = map.values().sum();
    /// assert_eq!(sum, 60);
    /// ```
    #[must_use]
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over mutable references to the values, in
    /// ascending key order.
    ///
    /// # Complexity
    ///
    /// O(N + S) time and memory up front, where S is the number of arena
    /// slots. The references are collected eagerly, and S stays at the
    /// largest size the map has reached until [`clear`](Self::clear).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let mut map: RedBlackTreeMap<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
    /// for value in map.values_mut() {
    ///     *value += 1;
    /// }
    /// assert_eq!(map.get(&1), Some(&11));
    /// assert_eq!(map.get(&2), Some(&21));
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        let order = self.in_order_ids();
        ValuesMut::new(self.arena.values_in_order_mut(&order))
    }

    /// Node indices in ascending key order.
    fn in_order_ids(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.length);
        let mut current = self.root.map(|root| self.arena.leftmost(root));
        while let Some(id) = current {
            order.push(id);
            current = self.arena.successor(id);
        }
        order
    }

    // -------------------------------------------------------------------------
    // Structural helpers
    // -------------------------------------------------------------------------

    fn is_red(&self, node: Option<NodeId>) -> bool {
        node.is_some_and(|id| self.arena.node(id).is_red())
    }

    fn color_of(&self, id: NodeId) -> Color {
        self.arena.node(id).color
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        self.arena.node_mut(id).color = color;
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.node(id).parent
    }

    fn left_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.node(id).left
    }

    fn right_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.node(id).right
    }

    /// Points the slot of `parent` that currently holds `old` at `new`.
    ///
    /// A missing parent means `old` is the root.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent_node = self.arena.node_mut(parent);
                if parent_node.left == Some(old) {
                    parent_node.left = new;
                } else {
                    parent_node.right = new;
                }
            }
        }
    }

    /// Rotates the tree to the left around `pivot`.
    ///
    /// `pivot`'s right child takes its place and `pivot` becomes that
    /// child's left child.
    fn rotate_left(&mut self, pivot: NodeId) {
        let Some(child) = self.right_of(pivot) else {
            fatal(STRUCTURE, &InvariantViolation::ParentLink)
        };
        let inner = self.left_of(child);
        self.arena.node_mut(pivot).right = inner;
        if let Some(inner) = inner {
            self.arena.node_mut(inner).parent = Some(pivot);
        }
        let parent = self.parent_of(pivot);
        self.arena.node_mut(child).parent = parent;
        self.replace_child(parent, pivot, Some(child));
        self.arena.node_mut(child).left = Some(pivot);
        self.arena.node_mut(pivot).parent = Some(child);
    }

    /// Rotates the tree to the right around `pivot`.
    fn rotate_right(&mut self, pivot: NodeId) {
        let Some(child) = self.left_of(pivot) else {
            fatal(STRUCTURE, &InvariantViolation::ParentLink)
        };
        let inner = self.right_of(child);
        self.arena.node_mut(pivot).left = inner;
        if let Some(inner) = inner {
            self.arena.node_mut(inner).parent = Some(pivot);
        }
        let parent = self.parent_of(pivot);
        self.arena.node_mut(child).parent = parent;
        self.replace_child(parent, pivot, Some(child));
        self.arena.node_mut(child).right = Some(pivot);
        self.arena.node_mut(pivot).parent = Some(child);
    }

    /// Restores invariants 2 and 4 after `node` was attached as a red leaf.
    fn repair_after_insert(&mut self, mut node: NodeId) {
        while let Some(parent) = self.parent_of(node) {
            if !self.is_red(Some(parent)) {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.parent_of(parent) else {
                break;
            };
            let parent_is_left = self.left_of(grandparent) == Some(parent);
            let uncle = if parent_is_left {
                self.right_of(grandparent)
            } else {
                self.left_of(grandparent)
            };

            // Case 1: red uncle. Push the blackness down from the grandparent
            // and continue from there.
            if let Some(uncle) = uncle.filter(|&uncle| self.is_red(Some(uncle))) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            // Case 2 (triangle) is turned into case 3 (line) by one rotation,
            // then case 3 finishes with a rotation at the grandparent.
            let mut parent = parent;
            if parent_is_left {
                if self.right_of(parent) == Some(node) {
                    self.rotate_left(parent);
                    parent = node;
                }
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_right(grandparent);
            } else {
                if self.left_of(parent) == Some(node) {
                    self.rotate_right(parent);
                    parent = node;
                }
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_left(grandparent);
            }
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Unlinks `target` from the tree and returns its entry.
    fn remove_node(&mut self, mut target: NodeId) -> (K, V) {
        // Two children: trade entries with the in-order successor, which has
        // no left child, and remove the successor's node instead.
        if let (Some(_), Some(right)) = (self.left_of(target), self.right_of(target)) {
            let successor = self.arena.leftmost(right);
            let (target_node, successor_node) = self.arena.pair_mut(target, successor);
            std::mem::swap(&mut target_node.key, &mut successor_node.key);
            std::mem::swap(&mut target_node.value, &mut successor_node.value);
            target = successor;
        }

        let child = self.left_of(target).or_else(|| self.right_of(target));
        let parent = self.parent_of(target);
        if let Some(child) = child {
            self.arena.node_mut(child).parent = parent;
        }
        self.replace_child(parent, target, child);

        let removed = self.arena.release(target);
        self.length -= 1;
        if removed.color == Color::Black {
            self.repair_after_remove(child, parent);
        }
        (removed.key, removed.value)
    }

    /// Restores the black height after a black node was spliced out.
    ///
    /// `node` carries the extra black (it may be a null leaf, hence the
    /// separately tracked `parent`).
    fn repair_after_remove(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
        while node != self.root && !self.is_red(node) {
            let Some(above) = parent else {
                break;
            };

            if node == self.left_of(above) {
                let mut sibling = Self::sibling(self.right_of(above));
                if self.is_red(Some(sibling)) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(above, Color::Red);
                    self.rotate_left(above);
                    sibling = Self::sibling(self.right_of(above));
                }
                if !self.is_red(self.left_of(sibling)) && !self.is_red(self.right_of(sibling)) {
                    self.set_color(sibling, Color::Red);
                    node = Some(above);
                    parent = self.parent_of(above);
                    continue;
                }
                if !self.is_red(self.right_of(sibling)) {
                    if let Some(inner) = self.left_of(sibling) {
                        self.set_color(inner, Color::Black);
                    }
                    self.set_color(sibling, Color::Red);
                    self.rotate_right(sibling);
                    sibling = Self::sibling(self.right_of(above));
                }
                self.set_color(sibling, self.color_of(above));
                self.set_color(above, Color::Black);
                if let Some(outer) = self.right_of(sibling) {
                    self.set_color(outer, Color::Black);
                }
                self.rotate_left(above);
            } else {
                let mut sibling = Self::sibling(self.left_of(above));
                if self.is_red(Some(sibling)) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(above, Color::Red);
                    self.rotate_right(above);
                    sibling = Self::sibling(self.left_of(above));
                }
                if !self.is_red(self.left_of(sibling)) && !self.is_red(self.right_of(sibling)) {
                    self.set_color(sibling, Color::Red);
                    node = Some(above);
                    parent = self.parent_of(above);
                    continue;
                }
                if !self.is_red(self.left_of(sibling)) {
                    if let Some(inner) = self.right_of(sibling) {
                        self.set_color(inner, Color::Black);
                    }
                    self.set_color(sibling, Color::Red);
                    self.rotate_left(sibling);
                    sibling = Self::sibling(self.left_of(above));
                }
                self.set_color(sibling, self.color_of(above));
                self.set_color(above, Color::Black);
                if let Some(outer) = self.left_of(sibling) {
                    self.set_color(outer, Color::Black);
                }
                self.rotate_right(above);
            }
            // The rotation absorbed the extra black.
            node = self.root;
            parent = None;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }

    /// The sibling of a double-black node, which must exist.
    fn sibling(candidate: Option<NodeId>) -> NodeId {
        candidate.unwrap_or_else(|| fatal(STRUCTURE, &InvariantViolation::MissingSibling))
    }
}

impl<K: Ord, V> RedBlackTreeMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let mut map = RedBlackTreeMap::new();
    /// map.insert("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(|id| &self.arena.node(id).value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let mut map = RedBlackTreeMap::new();
    /// map.insert(1, 10);
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value *= 2;
    /// }
    /// assert_eq!(map.get(&1), Some(&20));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key)
            .map(|id| &mut self.arena.node_mut(id).value)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Iterative BST descent.
    fn find_node<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.arena.node(id);
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contains the key, the value is replaced in place
    /// and the previous value is returned; the tree shape does not change.
    /// Otherwise a new red leaf is attached and the tree is rebalanced.
    ///
    /// # Complexity
    ///
    /// O(log N), at most two rotations
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let mut map = RedBlackTreeMap::new();
    /// assert_eq!(map.insert(1, "one"), None);
    /// assert_eq!(map.insert(1, "ONE"), Some("one"));
    ///
    /// assert_eq!(map.get(&1), Some(&"ONE"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut parent = None;
        let mut attach_left = false;
        let mut current = self.root;

        while let Some(id) = current {
            let node = self.arena.node(id);
            match key.cmp(&node.key) {
                Ordering::Less => {
                    parent = Some(id);
                    attach_left = true;
                    current = node.left;
                }
                Ordering::Greater => {
                    parent = Some(id);
                    attach_left = false;
                    current = node.right;
                }
                Ordering::Equal => {
                    return Some(std::mem::replace(
                        &mut self.arena.node_mut(id).value,
                        value,
                    ));
                }
            }
        }

        let id = self.arena.allocate(Node::new_red(key, value, parent));
        match parent {
            None => self.root = Some(id),
            Some(parent) if attach_left => self.arena.node_mut(parent).left = Some(id),
            Some(parent) => self.arena.node_mut(parent).right = Some(id),
        }
        self.length += 1;
        self.repair_after_insert(id);
        None
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// # Complexity
    ///
    /// O(log N), at most three rotations
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let mut map: RedBlackTreeMap<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    ///
    /// assert_eq!(map.remove(&1), Some("one"));
    /// assert_eq!(map.remove(&1), None);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let mut map = RedBlackTreeMap::new();
    /// map.insert("key".to_string(), 42);
    ///
    /// assert_eq!(map.remove_entry("key"), Some(("key".to_string(), 42)));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_node(key)?;
        Some(self.remove_node(id))
    }

    /// Returns the entry with the minimum key.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyStructure`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let map: RedBlackTreeMap<i32, &str> =
    ///     [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(map.find_min(), Ok((&1, &"one")));
    ///
    /// let empty: RedBlackTreeMap<i32, &str> = RedBlackTreeMap::new();
    /// assert!(empty.find_min().is_err());
    /// ```
    pub fn find_min(&self) -> Result<(&K, &V), CollectionError> {
        let root = self
            .root
            .ok_or(CollectionError::empty(STRUCTURE, "find_min"))?;
        let node = self.arena.node(self.arena.leftmost(root));
        Ok((&node.key, &node.value))
    }

    /// Returns the entry with the maximum key.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyStructure`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let map: RedBlackTreeMap<i32, &str> =
    ///     [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(map.find_max(), Ok((&3, &"three")));
    /// ```
    pub fn find_max(&self) -> Result<(&K, &V), CollectionError> {
        let root = self
            .root
            .ok_or(CollectionError::empty(STRUCTURE, "find_max"))?;
        let node = self.arena.node(self.arena.rightmost(root));
        Ok((&node.key, &node.value))
    }

    /// Removes and returns the entry with the minimum key.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyStructure`] if the map is empty.
    pub fn pop_min(&mut self) -> Result<(K, V), CollectionError> {
        let root = self
            .root
            .ok_or(CollectionError::empty(STRUCTURE, "pop_min"))?;
        let minimum = self.arena.leftmost(root);
        Ok(self.remove_node(minimum))
    }

    /// Removes and returns the entry with the maximum key.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyStructure`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let mut map: RedBlackTreeMap<i32, i32> = (1..=3).map(|key| (key, key * 10)).collect();
    /// assert_eq!(map.pop_max(), Ok((3, 30)));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn pop_max(&mut self) -> Result<(K, V), CollectionError> {
        let root = self
            .root
            .ok_or(CollectionError::empty(STRUCTURE, "pop_max"))?;
        let maximum = self.arena.rightmost(root);
        Ok(self.remove_node(maximum))
    }

    /// Returns an iterator over the entries whose keys fall within `range`,
    /// in ascending key order.
    ///
    /// # Complexity
    ///
    /// O(log N + k) where k is the number of entries produced
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let map: RedBlackTreeMap<i32, i32> = (1..=10).map(|key| (key, key * key)).collect();
    ///
    /// let squares: Vec<i32> = map.range(3..6).map(|(_, square)| *square).collect();
    /// assert_eq!(squares, vec![9, 16, 25]);
    ///
    /// let tail: Vec<&i32> = map.range(8..).map(|(key, _)| key).collect();
    /// assert_eq!(tail, vec![&8, &9, &10]);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> Range<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        R: RangeBounds<Q>,
    {
        let front = self.first_within(range.start_bound());
        let back = self.last_within(range.end_bound());
        match (front, back) {
            (Some(front_id), Some(back_id))
                if self.arena.node(front_id).key <= self.arena.node(back_id).key =>
            {
                Range::new(&self.arena, front, back)
            }
            _ => Range::new(&self.arena, None, None),
        }
    }

    /// The smallest node whose key satisfies the lower bound.
    fn first_within<Q>(&self, bound: Bound<&Q>) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.arena.node(id);
            let key: &Q = node.key.borrow();
            let satisfied = match bound {
                Bound::Included(start) => key >= start,
                Bound::Excluded(start) => key > start,
                Bound::Unbounded => true,
            };
            if satisfied {
                candidate = Some(id);
                current = node.left;
            } else {
                current = node.right;
            }
        }
        candidate
    }

    /// The largest node whose key satisfies the upper bound.
    fn last_within<Q>(&self, bound: Bound<&Q>) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.arena.node(id);
            let key: &Q = node.key.borrow();
            let satisfied = match bound {
                Bound::Included(end) => key <= end,
                Bound::Excluded(end) => key < end,
                Bound::Unbounded => true,
            };
            if satisfied {
                candidate = Some(id);
                current = node.right;
            } else {
                current = node.left;
            }
        }
        candidate
    }

    /// Checks every structural invariant of the tree.
    ///
    /// Verifies the key order, the root color, the absence of red-red edges,
    /// equal black heights, parent back-references and the length counter.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordcollections::tree::RedBlackTreeMap;
    ///
    /// let mut map: RedBlackTreeMap<i32, ()> = (0..1000).map(|key| (key, ())).collect();
    /// for key in (0..1000).step_by(3) {
    ///     map.remove(&key);
    /// }
    /// assert_eq!(map.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let result = self.check_invariants();
        if let Err(violation) = &result {
            log::debug!("{STRUCTURE}: validation failed: {violation}");
        }
        result
    }

    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some(root) = self.root {
            let root_node = self.arena.node(root);
            if root_node.is_red() {
                return Err(InvariantViolation::RedRoot);
            }
            if root_node.parent.is_some() {
                return Err(InvariantViolation::ParentLink);
            }
            self.black_height(root, 0)?;
        }

        let mut actual = 0;
        let mut previous: Option<&K> = None;
        let mut current = self.root.map(|root| self.arena.leftmost(root));
        while let Some(id) = current {
            let key = &self.arena.node(id).key;
            if previous.is_some_and(|previous| previous >= key) {
                return Err(InvariantViolation::KeyOrder { position: actual });
            }
            previous = Some(key);
            actual += 1;
            current = self.arena.successor(id);
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

    /// Black height of the subtree at `id`, counting the null leaf.
    fn black_height(&self, id: NodeId, depth: usize) -> Result<usize, InvariantViolation> {
        let node = self.arena.node(id);
        let mut heights = [1_usize; 2];
        for (height, child) in heights.iter_mut().zip([node.left, node.right]) {
            if let Some(child) = child {
                let child_node = self.arena.node(child);
                if child_node.parent != Some(id) {
                    return Err(InvariantViolation::ParentLink);
                }
                if node.is_red() && child_node.is_red() {
                    return Err(InvariantViolation::RedChildOfRed { depth });
                }
                *height = self.black_height(child, depth + 1)?;
            }
        }
        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { left, right });
        }
        Ok(left + usize::from(!node.is_red()))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for RedBlackTreeMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Collection for RedBlackTreeMap<K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.length
    }

    fn clear(&mut self) {
        Self::clear(self);
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RedBlackTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for RedBlackTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for RedBlackTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.in_order_ids();
        IntoIter::new(self.arena, order)
    }
}

impl<'a, K, V> IntoIterator for &'a RedBlackTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Q, V> Index<&Q> for RedBlackTreeMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key)
            .unwrap_or_else(|| panic!("{STRUCTURE}: no entry found for key"))
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for RedBlackTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for RedBlackTreeMap<K, V> {}

/// Computes a hash value for this tree map.
///
/// The length is hashed first, then every (key, value) pair in key order, so
/// equal maps hash equally regardless of insertion order.
impl<K: Hash, V: Hash> Hash for RedBlackTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RedBlackTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for RedBlackTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// Static assertions to verify RedBlackTreeMap can cross threads
static_assertions::assert_impl_all!(RedBlackTreeMap<i32, String>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(Iter<'static, i32, String>: Send, Sync, ExactSizeIterator);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for RedBlackTreeMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct RedBlackTreeMapVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for RedBlackTreeMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = RedBlackTreeMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = RedBlackTreeMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for RedBlackTreeMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(RedBlackTreeMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
