//! Ordered key-value map backed by a red-black tree.
//!
//! # Examples
//!
//! ```rust
//! use ordcollections::tree::RedBlackTreeMap;
//!
//! let mut map = RedBlackTreeMap::new();
//! map.insert("b", 2);
//! map.insert("a", 1);
//!
//! assert_eq!(map.find_min(), Ok((&"a", &1)));
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
//! ```

mod arena;
mod iter;
mod map;

pub use iter::{IntoIter, Iter, Range, ValuesMut};
pub use map::RedBlackTreeMap;
