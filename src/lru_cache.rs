//! A bounded cache that evicts the least recently used entry, built on the
//! ordering of an [`OrderedMap`]: the front of the map is the next entry to go
//! and every access moves a key to the back.

use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash},
};

use crate::{OrderedMap, Store};

/// An LRU cache. Insertion and retrieval are O(1), as any good LRU cache
/// ought to be.
///
/// ```
/// use ordered_map::{LruCache, Store};
///
/// let mut cache: LruCache<usize, String> = LruCache::with_capacity(2);
/// cache.insert(0, "Put".to_owned());
/// cache.insert(1, "large".to_owned());
/// cache.get(&0);
/// cache.insert(2, "things".to_owned());
///
/// // 1 was the least recently used, so it made room for 2
/// assert_eq!(None, cache.get(&1));
/// assert!(cache.get(&0).is_some());
/// ```
pub struct LruCache<K, V, S = RandomState> {
    map: OrderedMap<K, V, S>,
    capacity: usize,
}

impl<K, V> LruCache<K, V, RandomState>
where
    K: Eq + Hash,
{
    /// Make a new LruCache with a specified capacity, in number of elements.
    /// A cache with capacity 0 never stores anything.
    pub fn with_capacity(capacity: usize) -> Self {
        LruCache::with_capacity_and_hash_builder(capacity, Default::default())
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Makes a new LruCache with a specified capacity and hasher.
    pub fn with_capacity_and_hash_builder(capacity: usize, hash_builder: S) -> Self {
        LruCache {
            map: OrderedMap::with_capacity_and_hash_builder(capacity, hash_builder),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, evicting the least recently used entries if the
    /// cache holds more than the new bound.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.evict_to(capacity);
    }

    /// Reads an entry without counting it as a use.
    pub fn peek<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(k).ok()
    }

    /// Evicts the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.map.pop_front()
    }

    /// The entries from least to most recently used.
    pub fn iter(&self) -> crate::ordered_map::Iter<'_, K, V> {
        self.map.iter()
    }

    fn evict_to(&mut self, bound: usize) {
        while self.map.len() > bound {
            if self.map.pop_front().is_some() {
                log::debug!(
                    "evicted least recently used entry, {} of {} slots in use",
                    self.map.len(),
                    self.capacity
                );
            }
        }
    }
}

impl<K, V, S> Store<K, V> for LruCache<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts or updates an entry and marks it as the most recently used.
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry first.
    fn insert(&mut self, k: K, v: V) -> Option<V> {
        if self.capacity == 0 {
            log::debug!("dropping insert into a zero capacity cache");
            return None;
        }

        let (node, previous) = self.map.insert_node(k, v);
        match previous {
            Some(old) => {
                self.map.move_node_to_back(node);
                Some(old)
            }
            None => {
                self.evict_to(self.capacity);
                None
            }
        }
    }

    /// Get a mutable reference to an item from the cache. This also makes the
    /// item the youngest item in the cache and the least eligible for
    /// eviction.
    fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.move_to_back(k).ok()?;
        self.map.get_mut(k).ok()
    }

    fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.remove(k).ok()
    }

    fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(k)
    }

    fn clear(&mut self) {
        self.map.clear();
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}
