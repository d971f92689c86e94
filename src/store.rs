use std::{
    borrow::Borrow,
    hash::{BuildHasher, Hash},
};

use crate::OrderedMap;

/// Describes a keyed container that [`SharedStore`](crate::SharedStore) can
/// guard. Lookups take `&mut self` so that containers which track access
/// (like [`LruCache`](crate::LruCache)) can reorder on read.
pub trait Store<K, V>
where
    K: Eq + Hash,
{
    /// Puts a value in the store, returning the value previously held under
    /// that key.
    fn insert(&mut self, k: K, v: V) -> Option<V>;

    /// Get an item from the store.
    fn get<Q>(&mut self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(k).map(|v| &*v)
    }

    /// Get a mutable reference to an item from the store.
    fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Takes an item out of the store, returning whatever was there.
    fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Whether the key is present. Never reorders anything.
    fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Clears the store entirely.
    fn clear(&mut self);

    /// The number of items stored right now.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads through an `OrderedMap` never move anything; absence is `None`.
impl<K, V, S> Store<K, V> for OrderedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, k: K, v: V) -> Option<V> {
        OrderedMap::insert(self, k, v)
    }

    fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        OrderedMap::get_mut(self, k).ok()
    }

    fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        OrderedMap::remove(self, k).ok()
    }

    fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        OrderedMap::contains_key(self, k)
    }

    fn clear(&mut self) {
        OrderedMap::clear(self)
    }

    fn len(&self) -> usize {
        OrderedMap::len(self)
    }
}
