//! Error types shared by the collections in this crate.
//!
//! Absent keys are not errors: lookups and removals report them with `None`.
//! An empty structure is an error for the operations that must return an
//! entry ([`CollectionError::EmptyStructure`]), so that the failure cannot be
//! mistaken for a legitimate entry. A corrupted structure is described by
//! [`InvariantViolation`]; the balancing walks treat it as fatal.

use thiserror::Error;

/// Errors reported by the public operations of the collections.
///
/// # Examples
///
/// ```rust
/// use ordcollections::error::CollectionError;
///
/// let error = CollectionError::EmptyStructure {
///     structure: "PairingHeap",
///     operation: "pop",
/// };
/// assert_eq!(format!("{error}"), "PairingHeap::pop: the structure is empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The operation needs at least one entry but the structure has none.
    #[error("{structure}::{operation}: the structure is empty")]
    EmptyStructure {
        /// The name of the structure the operation was called on.
        structure: &'static str,
        /// The name of the operation that failed.
        operation: &'static str,
    },
    /// The structure no longer satisfies its internal invariants.
    #[error(transparent)]
    InvariantViolation(#[from] InvariantViolation),
}

impl CollectionError {
    /// Returns `true` if this is an [`EmptyStructure`](Self::EmptyStructure) error.
    #[must_use]
    pub const fn is_empty_structure(&self) -> bool {
        matches!(self, Self::EmptyStructure { .. })
    }

    pub(crate) const fn empty(structure: &'static str, operation: &'static str) -> Self {
        Self::EmptyStructure {
            structure,
            operation,
        }
    }
}

/// A broken structural invariant.
///
/// Returned by the `validate` methods. Seeing one of these outside of a
/// deliberately corrupted test fixture means there is a bug in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The root of a red-black tree is red.
    #[error("red-black tree root is red")]
    RedRoot,
    /// A red node has a red child.
    #[error("red node at depth {depth} has a red child")]
    RedChildOfRed {
        /// Depth of the parent node (the root has depth 0).
        depth: usize,
    },
    /// Two paths from the same node reach a leaf through different black counts.
    #[error("black-height mismatch: left subtree {left}, right subtree {right}")]
    BlackHeightMismatch {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
    /// An in-order walk produced keys that are not strictly ascending.
    #[error("keys are not in strictly ascending order at position {position}")]
    KeyOrder {
        /// Zero-based in-order position of the offending key.
        position: usize,
    },
    /// A node index refers to a slot that has already been released.
    #[error("node slot referenced after release")]
    DanglingNode,
    /// A child does not point back to the node that owns it.
    #[error("parent link of a node does not match its owner")]
    ParentLink,
    /// A double-black fix-up found no sibling to borrow a black node from.
    #[error("double-black node has no sibling")]
    MissingSibling,
    /// A heap child is ordered before its parent.
    #[error("heap order violated: a child precedes its parent")]
    HeapOrder,
    /// A heap root has siblings.
    #[error("heap root has a sibling")]
    RootSibling,
    /// The recorded length disagrees with the number of reachable entries.
    #[error("recorded length {recorded} but {actual} entries are reachable")]
    LengthMismatch {
        /// The length counter stored in the structure.
        recorded: usize,
        /// The number of entries actually reachable.
        actual: usize,
    },
}

/// Aborts on a corrupted structure.
///
/// Only reachable through a bug in the balancing code; the violation is
/// logged before the panic so that it shows up in the host's log output.
#[cold]
#[track_caller]
pub(crate) fn fatal(structure: &'static str, violation: &InvariantViolation) -> ! {
    log::error!("{structure}: {violation}");
    panic!("{structure}: {violation}")
}
