//! Iterators over [`PairingHeap`](super::PairingHeap).

use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::order::Comparator;
use super::pairing::{Node, PairingHeap};

/// Inline depth of the traversal stack before it spills to the heap.
const STACK_DEPTH: usize = 16;

/// An iterator over the entries of a heap, in no particular order.
///
/// Created by [`PairingHeap::iter`].
pub struct Iter<'a, K, V> {
    pending: SmallVec<[&'a Node<K, V>; STACK_DEPTH]>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(root: Option<&'a Node<K, V>>, remaining: usize) -> Self {
        let mut pending = SmallVec::new();
        pending.extend(root);
        Self { pending, remaining }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            pending: self.pending.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        self.pending.extend(node.sibling.as_deref());
        self.pending.extend(node.child.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An owning iterator that pops entries in priority order.
///
/// Created by [`PairingHeap::into_sorted_iter`].
pub struct IntoSortedIter<K, V, C> {
    heap: PairingHeap<K, V, C>,
}

impl<K, V, C> IntoSortedIter<K, V, C> {
    pub(super) const fn new(heap: PairingHeap<K, V, C>) -> Self {
        Self { heap }
    }
}

impl<K, V, C: Comparator<K>> Iterator for IntoSortedIter<K, V, C> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.heap.pop().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<K, V, C: Comparator<K>> ExactSizeIterator for IntoSortedIter<K, V, C> {}

impl<K, V, C: Comparator<K>> FusedIterator for IntoSortedIter<K, V, C> {}
