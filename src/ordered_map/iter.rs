use std::{iter::FusedIterator, marker::PhantomData};

use super::Entry;
use crate::linked_list::{LinkedList, Node, NodeHandle, SENTINEL};

/// An iterator over the entries of an [`OrderedMap`](super::OrderedMap), from
/// oldest to newest.
///
/// All the iterators here count down the entries left instead of looking for
/// the sentinel, which is what lets the two ends meet in the middle.
pub struct Iter<'a, K, V> {
    entries: &'a LinkedList<Entry<K, V>>,
    front: Option<NodeHandle>,
    back: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(entries: &'a LinkedList<Entry<K, V>>) -> Self {
        Self {
            entries,
            front: entries.front(),
            back: entries.back(),
            remaining: entries.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.front?;
        self.front = self.entries.next(node);
        self.remaining -= 1;

        let entry = &self.entries[node];
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.back?;
        self.back = self.entries.prev(node);
        self.remaining -= 1;

        let entry = &self.entries[node];
        Some((&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// A mutable iterator over the entries of an
/// [`OrderedMap`](super::OrderedMap). Keys stay immutable.
pub struct IterMut<'a, K, V> {
    nodes: *mut Node<Entry<K, V>>,
    front: NodeHandle,
    back: NodeHandle,
    remaining: usize,
    _marker: PhantomData<&'a mut Entry<K, V>>,
}

// SAFETY: IterMut behaves like a `&mut` into the map's storage.
unsafe impl<K: Sync, V: Send> Send for IterMut<'_, K, V> {}
// SAFETY: As above, shared access only ever reads through it.
unsafe impl<K: Sync, V: Sync> Sync for IterMut<'_, K, V> {}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(super) fn new(entries: &'a mut LinkedList<Entry<K, V>>) -> Self {
        let remaining = entries.len();
        // when the list is empty both ends are never read, the sentinel
        // stands in for them.
        let front = entries.front().unwrap_or(SENTINEL);
        let back = entries.back().unwrap_or(SENTINEL);

        Self {
            nodes: entries.nodes_mut_ptr(),
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `node` must be a live node of the list this iterator was made from, and
    /// must not have been handed out already.
    unsafe fn take(&mut self, node: NodeHandle) -> &'a mut Node<Entry<K, V>> {
        // SAFETY: the pointer came from the list's storage, which is mutably
        // borrowed for 'a, and live handles index inside it.
        unsafe { &mut *self.nodes.add(LinkedList::<Entry<K, V>>::offset(node)) }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        // SAFETY: `remaining` counts live nodes not yet yielded from either
        // end, so `front` is live and fresh.
        let node = unsafe { self.take(self.front) };
        self.front = node.next();

        node.value_mut().map(|entry| (&entry.key, &mut entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        // SAFETY: see next.
        let node = unsafe { self.take(self.back) };
        self.back = node.prev();

        node.value_mut().map(|entry| (&entry.key, &mut entry.value))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of an
/// [`OrderedMap`](super::OrderedMap).
pub struct IntoIter<K, V> {
    entries: LinkedList<Entry<K, V>>,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(entries: LinkedList<Entry<K, V>>) -> Self {
        Self { entries }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.entries.front()?;
        let Entry { key, value, .. } = self.entries.remove_node(node);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.entries.len(), Some(self.entries.len()))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let node = self.entries.back()?;
        let Entry { key, value, .. } = self.entries.remove_node(node);
        Some((key, value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// The keys of an [`OrderedMap`](super::OrderedMap), in order.
pub struct Keys<'a, K, V> {
    pub(super) iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// The values of an [`OrderedMap`](super::OrderedMap), in the order of their
/// keys.
pub struct Values<'a, K, V> {
    pub(super) iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

pub struct ValuesMut<'a, K, V> {
    pub(super) iter: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
