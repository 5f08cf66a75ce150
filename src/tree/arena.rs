//! Node storage for the red-black tree.
//!
//! Nodes live in a flat vector of slots and refer to each other through
//! [`NodeId`] indices. A node is owned by the arena; `left` and `right`
//! express the tree shape and `parent` is a navigational back-reference only.
//! Released slots are threaded onto a free list and reused by later inserts.

use std::fmt;

use crate::error::{InvariantViolation, fatal};

/// The color of a red-black tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Index of a node inside an [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl fmt::Debug for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    /// Creates a new red leaf below `parent`.
    pub(crate) const fn new_red(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

#[derive(Clone)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant { next_free: Option<NodeId> },
}

#[derive(Clone)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: Option<NodeId>,
}

impl<K, V> Arena<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
        }
    }

    /// Stores `node`, reusing a released slot when one is available.
    pub(crate) fn allocate(&mut self, node: Node<K, V>) -> NodeId {
        let Some(id) = self.free_head else {
            self.slots.push(Slot::Occupied(node));
            return NodeId(self.slots.len() - 1);
        };
        match std::mem::replace(&mut self.slots[id.0], Slot::Occupied(node)) {
            Slot::Vacant { next_free } => self.free_head = next_free,
            Slot::Occupied(_) => fatal("Arena", &InvariantViolation::DanglingNode),
        }
        id
    }

    /// Takes the node out of its slot and puts the slot on the free list.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<K, V> {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match std::mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(id);
                node
            }
            Slot::Vacant { .. } => fatal("Arena", &InvariantViolation::DanglingNode),
        }
    }

    /// Drops every node without walking the tree.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => fatal("Arena", &InvariantViolation::DanglingNode),
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => fatal("Arena", &InvariantViolation::DanglingNode),
        }
    }

    /// Mutable references to the values of `order`, in that order.
    ///
    /// Every id in `order` must be live and appear once. Allocates a rank
    /// table with one entry per slot, vacant ones included.
    pub(crate) fn values_in_order_mut(&mut self, order: &[NodeId]) -> Vec<&mut V> {
        let mut rank = vec![None; self.slots.len()];
        for (position, id) in order.iter().enumerate() {
            rank[id.0] = Some(position);
        }
        let mut values: Vec<Option<&mut V>> = std::iter::repeat_with(|| None)
            .take(order.len())
            .collect();
        for (slot, rank) in self.slots.iter_mut().zip(rank) {
            if let (Slot::Occupied(node), Some(position)) = (slot, rank) {
                values[position] = Some(&mut node.value);
            }
        }
        values.into_iter().flatten().collect()
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Borrows two distinct nodes mutably at the same time.
    pub(crate) fn pair_mut(
        &mut self,
        first: NodeId,
        second: NodeId,
    ) -> (&mut Node<K, V>, &mut Node<K, V>) {
        debug_assert_ne!(first, second);
        let (low, high, swapped) = if first.0 < second.0 {
            (first.0, second.0, false)
        } else {
            (second.0, first.0, true)
        };
        let (head, tail) = self.slots.split_at_mut(high);
        let (Slot::Occupied(low_node), Slot::Occupied(high_node)) = (&mut head[low], &mut tail[0])
        else {
            fatal("Arena", &InvariantViolation::DanglingNode)
        };
        if swapped {
            (high_node, low_node)
        } else {
            (low_node, high_node)
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// The next node in key order.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.leftmost(right));
        }
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(ancestor) = parent {
            if self.node(ancestor).left == Some(child) {
                return Some(ancestor);
            }
            child = ancestor;
            parent = self.node(ancestor).parent;
        }
        None
    }

    /// The previous node in key order.
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left {
            return Some(self.rightmost(left));
        }
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(ancestor) = parent {
            if self.node(ancestor).right == Some(child) {
                return Some(ancestor);
            }
            child = ancestor;
            parent = self.node(ancestor).parent;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_release_reuses_slot() {
        let mut arena: Arena<i32, &str> = Arena::new();
        let first = arena.allocate(Node::new_red(1, "one", None));
        let second = arena.allocate(Node::new_red(2, "two", None));

        let released = arena.release(first);
        assert_eq!(released.key, 1);

        let third = arena.allocate(Node::new_red(3, "three", None));
        assert_eq!(third, first);
        assert_eq!(arena.node(third).key, 3);
        assert_eq!(arena.node(second).key, 2);
    }

    #[rstest]
    fn test_pair_mut_preserves_argument_order() {
        let mut arena: Arena<i32, i32> = Arena::new();
        let low = arena.allocate(Node::new_red(1, 10, None));
        let high = arena.allocate(Node::new_red(2, 20, None));

        let (first, second) = arena.pair_mut(high, low);
        assert_eq!(first.key, 2);
        assert_eq!(second.key, 1);
        std::mem::swap(&mut first.value, &mut second.value);

        assert_eq!(arena.node(low).value, 20);
        assert_eq!(arena.node(high).value, 10);
    }

    #[rstest]
    fn test_successor_and_predecessor_follow_key_order() {
        // 2 is the root, 1 its left child, 3 its right child.
        let mut arena: Arena<i32, ()> = Arena::new();
        let root = arena.allocate(Node::new_red(2, (), None));
        let left = arena.allocate(Node::new_red(1, (), Some(root)));
        let right = arena.allocate(Node::new_red(3, (), Some(root)));
        arena.node_mut(root).left = Some(left);
        arena.node_mut(root).right = Some(right);

        assert_eq!(arena.leftmost(root), left);
        assert_eq!(arena.rightmost(root), right);
        assert_eq!(arena.successor(left), Some(root));
        assert_eq!(arena.successor(root), Some(right));
        assert_eq!(arena.successor(right), None);
        assert_eq!(arena.predecessor(right), Some(root));
        assert_eq!(arena.predecessor(root), Some(left));
        assert_eq!(arena.predecessor(left), None);
    }

    #[rstest]
    #[should_panic(expected = "Arena")]
    fn test_access_after_release_is_fatal() {
        let mut arena: Arena<i32, i32> = Arena::new();
        let id = arena.allocate(Node::new_red(1, 1, None));
        arena.release(id);
        let _ = arena.node(id);
    }
}
