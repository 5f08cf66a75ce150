//! Iterators over [`RedBlackTreeMap`](super::RedBlackTreeMap).

use std::iter::FusedIterator;

use super::arena::{Arena, NodeId};

/// An iterator over the entries of a map, in ascending key order.
///
/// Created by [`RedBlackTreeMap::iter`](super::RedBlackTreeMap::iter).
pub struct Iter<'a, K, V> {
    arena: &'a Arena<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) const fn new(
        arena: &'a Arena<K, V>,
        front: Option<NodeId>,
        back: Option<NodeId>,
        remaining: usize,
    ) -> Self {
        Self {
            arena,
            front,
            back,
            remaining,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.arena.successor(id);
        let node = self.arena.node(id);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.arena.predecessor(id);
        let node = self.arena.node(id);
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over a sub-range of a map's entries.
///
/// Created by [`RedBlackTreeMap::range`](super::RedBlackTreeMap::range).
pub struct Range<'a, K, V> {
    arena: &'a Arena<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
}

impl<'a, K, V> Range<'a, K, V> {
    pub(super) const fn new(
        arena: &'a Arena<K, V>,
        front: Option<NodeId>,
        back: Option<NodeId>,
    ) -> Self {
        Self { arena, front, back }
    }

    /// Marks the range as exhausted once both ends meet at `id`.
    fn step(&mut self, id: NodeId, advanced: Option<NodeId>, forward: bool) {
        let meets = if forward {
            self.back == Some(id)
        } else {
            self.front == Some(id)
        };
        if meets {
            self.front = None;
            self.back = None;
        } else if forward {
            self.front = advanced;
        } else {
            self.back = advanced;
        }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.front?;
        let successor = self.arena.successor(id);
        self.step(id, successor, true);
        let node = self.arena.node(id);
        Some((&node.key, &node.value))
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.back?;
        let predecessor = self.arena.predecessor(id);
        self.step(id, predecessor, false);
        let node = self.arena.node(id);
        Some((&node.key, &node.value))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

/// A mutable iterator over a map's values, in ascending key order.
///
/// Created by [`RedBlackTreeMap::values_mut`](super::RedBlackTreeMap::values_mut).
pub struct ValuesMut<'a, V> {
    inner: std::vec::IntoIter<&'a mut V>,
}

impl<'a, V> ValuesMut<'a, V> {
    pub(super) fn new(values: Vec<&'a mut V>) -> Self {
        Self {
            inner: values.into_iter(),
        }
    }
}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for ValuesMut<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {}

impl<V> FusedIterator for ValuesMut<'_, V> {}

/// An owning iterator over a map's entries, in ascending key order.
///
/// Created by [`RedBlackTreeMap::into_iter`](super::RedBlackTreeMap).
pub struct IntoIter<K, V> {
    arena: Arena<K, V>,
    order: std::vec::IntoIter<NodeId>,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(arena: Arena<K, V>, order: Vec<NodeId>) -> Self {
        Self {
            arena,
            order: order.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.release(self.order.next()?);
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let node = self.arena.release(self.order.next_back()?);
        Some((node.key, node.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
