//! # ordcollections
//!
//! Ordered in-memory collections for Rust: a self-balancing ordered map and a
//! mergeable priority queue.
//!
//! ## Overview
//!
//! - **Ordered Map**: [`RedBlackTreeMap`](tree::RedBlackTreeMap), a red-black
//!   tree with O(log N) insert, remove, lookup and min/max extraction, plus
//!   ascending, descending and range iteration
//! - **Mergeable Heap**: [`PairingHeap`](heap::PairingHeap), a pairing heap
//!   with O(1) insert and merge and O(log N) amortized pop, ordered by a
//!   pluggable [`Comparator`](heap::Comparator)
//! - **Collection**: the shared `len` / `is_empty` / `clear` surface
//!
//! Operations that must return an entry report an empty structure as
//! [`CollectionError::EmptyStructure`](error::CollectionError::EmptyStructure);
//! absent keys are reported as `None`.
//!
//! ## Feature Flags
//!
//! - `tree`: the red-black tree map (enabled by default)
//! - `heap`: the pairing heap (enabled by default)
//! - `serde`: `Serialize`/`Deserialize` for both structures
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(feature = "tree")]
//! # {
//! use ordcollections::prelude::*;
//!
//! let mut map = RedBlackTreeMap::new();
//! map.insert(5, "five");
//! map.insert(9, "nine");
//! map.insert(2, "two");
//! assert_eq!(map.pop_min(), Ok((2, "two")));
//! # }
//! ```
//!
//! ```rust
//! # #[cfg(feature = "heap")]
//! # {
//! use ordcollections::prelude::*;
//!
//! let mut heap = PairingHeap::new();
//! heap.insert(5, "five");
//! let heap = heap.merge([(2, "two")].into_iter().collect());
//! assert_eq!(heap.peek(), Ok((&2, &"two")));
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use ordcollections::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::Collection;
    pub use crate::error::{CollectionError, InvariantViolation};

    #[cfg(feature = "tree")]
    pub use crate::tree::RedBlackTreeMap;

    #[cfg(feature = "heap")]
    pub use crate::heap::{CompareFn, Comparator, MaxFirst, MinFirst, PairingHeap};
}

pub mod collection;
pub mod error;

#[cfg(feature = "tree")]
pub mod tree;

#[cfg(feature = "heap")]
pub mod heap;
