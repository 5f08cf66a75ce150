//! Mergeable priority queue backed by a pairing heap.
//!
//! The priority order is a type parameter implementing [`Comparator`]:
//! [`MinFirst`] (the default), [`MaxFirst`], or any closure wrapped in
//! [`CompareFn`].
//!
//! # Examples
//!
//! ```rust
//! use ordcollections::heap::{MaxFirst, PairingHeap};
//!
//! let mut tasks = PairingHeap::with_comparator(MaxFirst);
//! tasks.insert(1, "sweep");
//! tasks.insert(9, "deploy");
//! tasks.insert(5, "review");
//!
//! assert_eq!(tasks.pop(), Ok((9, "deploy")));
//! assert_eq!(tasks.peek(), Ok((&5, &"review")));
//! ```

mod iter;
mod order;
mod pairing;

pub use iter::{IntoSortedIter, Iter};
pub use order::{CompareFn, Comparator, MaxFirst, MinFirst};
pub use pairing::PairingHeap;
