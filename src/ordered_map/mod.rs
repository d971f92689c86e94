//! A hash map whose iteration order is the order keys were (re)inserted in.
//!
//! The map keeps two structures in lockstep: a hash index answering "which
//! slot holds this key" and a linked list answering "where does this key sit
//! in iteration order". Slots are recycled after removals, but because order
//! comes from the list and never from slot positions, a recycled slot can't
//! make a recently inserted key surface early.
//!
//! ```
//! use ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert("a", 1);
//! map.insert("b", 2);
//! map.insert("c", 3);
//! map.remove(&"b").unwrap();
//! map.insert("b", 4);
//! map.insert("a", 5); // updates don't move
//!
//! let entries: Vec<_> = map.iter().collect();
//! assert_eq!(entries, [(&"a", &5), (&"c", &3), (&"b", &4)]);
//! ```

mod iter;
mod traversal;

pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use traversal::Traversal;

use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash},
    mem,
    ops::Index,
};

use hashbrown::HashTable;

use crate::error::{MapError, Result};
use crate::linked_list::{LinkedList, NodeHandle};

/// What the linked list stores for each key. The hash is kept alongside so
/// the index can be grown without rehashing keys.
#[derive(Clone)]
struct Entry<K, V> {
    hash: u64,
    key: K,
    value: V,
}

/// An associative container with O(1) lookup, insertion and removal that
/// iterates in insertion order.
///
/// - inserting a new key appends it to the back;
/// - inserting an existing key replaces its value in place, without moving it;
/// - removing a key and inserting it again puts it at the back.
///
/// There is no internal locking. Wrap it in a lock (or use
/// [`SharedStore`](crate::SharedStore)) to share it between threads.
pub struct OrderedMap<K, V, S = RandomState> {
    hash_builder: S,
    index: HashTable<NodeHandle>,
    entries: LinkedList<Entry<K, V>>,
    // bumped on every structural change, see Traversal
    version: u64,
}

impl<K, V> OrderedMap<K, V, RandomState> {
    /// Creates an empty map. It won't allocate until the first insert.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Makes a new map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hash_builder(capacity, Default::default())
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    /// Makes a new, empty map which hashes keys with `hash_builder`.
    pub fn with_hash_builder(hash_builder: S) -> Self {
        Self::with_capacity_and_hash_builder(0, hash_builder)
    }

    /// Makes a new map with room for `capacity` entries, hashing keys with
    /// `hash_builder`.
    pub fn with_capacity_and_hash_builder(capacity: usize, hash_builder: S) -> Self {
        Self {
            hash_builder,
            index: HashTable::with_capacity(capacity),
            entries: LinkedList::with_capacity(capacity),
            version: 0,
        }
    }

    /// The hasher this map was built with.
    pub fn hash_builder(&self) -> &S {
        &self.hash_builder
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many entries fit before either structure has to reallocate.
    pub fn capacity(&self) -> usize {
        self.index.capacity().min(self.entries.capacity())
    }

    /// Removes every entry, keeping the allocated memory.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            log::debug!("clearing ordered map of {} entries", self.len());
        }
        self.index.clear();
        self.entries.clear();
        self.bump_version();
    }

    /// The oldest entry, the one iteration starts at.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.entries.front().map(|node| self.key_value(node))
    }

    /// The most recently inserted entry.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.entries.back().map(|node| self.key_value(node))
    }

    /// Iterates over the entries from oldest to newest. Call `.rev()` to go
    /// the other way.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.entries)
    }

    /// Like [`OrderedMap::iter`], with mutable access to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.entries)
    }

    /// The keys, in order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.iter() }
    }

    /// The values, in the order of their keys.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.iter() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            iter: self.iter_mut(),
        }
    }

    /// Starts a detached traversal from the front of the map.
    ///
    /// Unlike [`OrderedMap::iter`], a traversal doesn't borrow the map, so the
    /// map can be modified between steps. Any structural change (a new key, a
    /// removal, a reorder, a clear) makes the next step fail with
    /// [`MapError::IteratorInvalidated`]; replacing the value of an existing
    /// key doesn't.
    ///
    /// ```
    /// use ordered_map::{MapError, OrderedMap};
    ///
    /// let mut map: OrderedMap<_, _> = [(1, "one"), (2, "two")].into_iter().collect();
    /// let mut traversal = map.traversal();
    ///
    /// assert_eq!(traversal.next(&map), Ok(Some((&1, &"one"))));
    /// map.insert(2, "deux");
    /// assert_eq!(traversal.next(&map), Ok(Some((&2, &"deux"))));
    ///
    /// let mut traversal = map.traversal();
    /// map.insert(3, "three");
    /// assert_eq!(traversal.next(&map), Err(MapError::IteratorInvalidated));
    /// ```
    pub fn traversal(&self) -> Traversal {
        Traversal::new(self)
    }

    fn key_value(&self, node: NodeHandle) -> (&K, &V) {
        let entry = &self.entries[node];
        (&entry.key, &entry.value)
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts a key-value pair, returning the previous value if the key was
    /// already present.
    ///
    /// A new key goes to the back of the iteration order. An existing key
    /// keeps its position and only has its value replaced.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        self.insert_node(k, v).1
    }

    /// Gets the value stored for `k`.
    pub fn get<Q>(&self, k: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(k).map(|(_, v)| v)
    }

    /// Gets the stored key and value for `k`.
    pub fn get_key_value<Q>(&self, k: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(k)
            .map(|node| self.key_value(node))
            .ok_or(MapError::KeyNotFound)
    }

    /// Gets a mutable reference to the value stored for `k`. Writing through
    /// it doesn't change the key's position.
    pub fn get_mut<Q>(&mut self, k: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.find(k).ok_or(MapError::KeyNotFound)?;
        Ok(&mut self.entries[node].value)
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(k).is_some()
    }

    /// Removes `k` from the map, returning its value.
    ///
    /// Fails with [`MapError::KeyNotFound`] and leaves the map untouched if
    /// the key isn't present.
    pub fn remove<Q>(&mut self, k: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(k).map(|(_, v)| v)
    }

    /// Removes `k` from the map, returning the stored key and its value.
    pub fn remove_entry<Q>(&mut self, k: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.find(k).ok_or(MapError::KeyNotFound)?;
        let Entry { key, value, .. } = self.remove_node(node);
        Ok((key, value))
    }

    /// Removes and returns the oldest entry.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let node = self.entries.front()?;
        let Entry { key, value, .. } = self.remove_node(node);
        Some((key, value))
    }

    /// Removes and returns the newest entry.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let node = self.entries.back()?;
        let Entry { key, value, .. } = self.remove_node(node);
        Some((key, value))
    }

    /// Moves `k` to the back of the order, as if it had been removed and
    /// inserted again with the same value.
    pub fn move_to_back<Q>(&mut self, k: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.find(k).ok_or(MapError::KeyNotFound)?;
        self.move_node_to_back(node);
        Ok(())
    }

    /// Keeps only the entries for which `f` returns true. Entries are visited
    /// in order and `f` may modify the values it keeps.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut cursor = self.entries.front();
        while let Some(node) = cursor {
            cursor = self.entries.next(node);

            let entry = &mut self.entries[node];
            if !f(&entry.key, &mut entry.value) {
                self.remove_node(node);
            }
        }
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
        let entries = &self.entries;
        self.index.reserve(additional, |&node| entries[node].hash);
    }

    /// Gives back as much spare memory as the layout allows. Slots freed in
    /// the middle of the arena stay reserved for reuse.
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
        let entries = &self.entries;
        self.index.shrink_to_fit(|&node| entries[node].hash);
    }

    /// Inserts or updates, handing back the node the key lives in.
    pub(crate) fn insert_node(&mut self, k: K, v: V) -> (NodeHandle, Option<V>) {
        let hash = self.hash_key(&k);

        if let Some(node) = self.find_hashed(hash, &k) {
            let old = mem::replace(&mut self.entries[node].value, v);
            return (node, Some(old));
        }

        let node = self.entries.push_back(Entry {
            hash,
            key: k,
            value: v,
        });
        let entries = &self.entries;
        self.index
            .insert_unique(hash, node, |&node| entries[node].hash);
        self.bump_version();

        (node, None)
    }

    pub(crate) fn move_node_to_back(&mut self, node: NodeHandle) {
        if self.entries.move_to_back(node) {
            self.bump_version();
        }
    }

    /// Unlinks a live node and drops it from the index.
    fn remove_node(&mut self, node: NodeHandle) -> Entry<K, V> {
        let hash = self.entries[node].hash;
        match self.index.find_entry(hash, |&n| n == node) {
            Ok(occupied) => {
                occupied.remove();
            }
            Err(_) => out_of_sync(),
        }

        let entry = self.entries.remove_node(node);
        self.bump_version();
        entry
    }

    fn find<Q>(&self, k: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_hashed(self.hash_key(k), k)
    }

    fn find_hashed<Q>(&self, hash: u64, k: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let entries = &self.entries;
        self.index
            .find(hash, |&node| entries[node].key.borrow() == k)
            .copied()
    }

    fn hash_key<Q>(&self, k: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hash_builder.hash_one(k)
    }

    /// Walks the list both ways and checks it against the index.
    #[cfg(test)]
    pub(crate) fn continuity_test(&self) {
        let mut count = 0;
        let mut cursor = self.entries.front();
        while let Some(node) = cursor {
            count += 1;
            assert!(count <= self.len());
            let entry = &self.entries[node];
            assert_eq!(Some(node), self.find_hashed(entry.hash, &entry.key));
            cursor = self.entries.next(node);
        }
        assert_eq!(self.len(), count);

        count = 0;
        let mut cursor = self.entries.back();
        while let Some(node) = cursor {
            count += 1;
            assert!(count <= self.len());
            cursor = self.entries.prev(node);
        }
        assert_eq!(self.len(), count);
        assert_eq!(self.index.len(), count);
    }
}

#[cold]
#[inline(never)]
fn out_of_sync() -> ! {
    panic!("ordered map index and list are out of sync");
}

impl<K, V, S: Default> Default for OrderedMap<K, V, S> {
    fn default() -> Self {
        Self::with_capacity_and_hash_builder(0, S::default())
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for OrderedMap<K, V, S> {
    fn clone(&self) -> Self {
        // handles are positions in the arena, so a verbatim copy of both
        // structures stays consistent.
        Self {
            hash_builder: self.hash_builder.clone(),
            index: self.index.clone(),
            entries: self.entries.clone(),
            version: self.version,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for OrderedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal when they hold the same entries in the same order.
impl<K, V, S> PartialEq for OrderedMap<K, V, S>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, S> Eq for OrderedMap<K, V, S> {}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity_and_hash_builder(iter.size_hint().0, S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for OrderedMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k.clone(), v.clone());
        }
    }
}

impl<K, V, S, Q> Index<&Q> for OrderedMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// Panics if the key isn't present.
    fn index(&self, k: &Q) -> &V {
        match self.get(k) {
            Ok(v) => v,
            Err(_) => panic!("key not found in OrderedMap"),
        }
    }
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.entries)
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut OrderedMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
