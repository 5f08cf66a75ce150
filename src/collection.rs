//! The container surface shared by every collection in this crate.
//!
//! [`Collection`] gives the tree map and the heap the same `len`,
//! `is_empty` and `clear` shape, so code that only sizes or resets a
//! container can be written once and handed either structure.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(all(feature = "tree", feature = "heap"))]
//! # {
//! use ordcollections::collection::Collection;
//! use ordcollections::heap::PairingHeap;
//! use ordcollections::tree::RedBlackTreeMap;
//!
//! fn drain_count<C: Collection>(container: &mut C) -> usize {
//!     let count = container.len();
//!     container.clear();
//!     count
//! }
//!
//! let mut map: RedBlackTreeMap<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
//! let mut heap: PairingHeap<i32, &str> = [(3, "three")].into_iter().collect();
//!
//! assert_eq!(drain_count(&mut map), 2);
//! assert_eq!(drain_count(&mut heap), 1);
//! assert!(Collection::is_empty(&map));
//! assert!(Collection::is_empty(&heap));
//! # }
//! ```

/// A sized, clearable container.
pub trait Collection {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    fn clear(&mut self);
}
