use parking_lot::RwLock;
use std::{borrow::Borrow, hash::Hash, marker::PhantomData, sync::Arc};

use crate::store::Store;

/// Wrapper for a [`Store`] which is shareable across thread boundaries.
///
/// The wrapped store has no locking of its own; every call here takes the
/// lock for exactly the duration of one store operation. Use
/// [`SharedStore::read`] or [`SharedStore::write`] when several operations
/// must happen under one lock.
pub struct SharedStore<C, K, V>(Arc<RwLock<C>>, PhantomData<K>, PhantomData<V>)
where
    C: Store<K, V>,
    K: Eq + Hash,
    V: Clone;

impl<C, K, V> SharedStore<C, K, V>
where
    C: Store<K, V>,
    K: Eq + Hash,
    V: Clone,
{
    /// Wraps a store into a shared accessor, making it safe to move across
    /// thread boundaries. Enforces an additional constraint of Clone on
    /// values.
    pub fn with_store(store: C) -> Self {
        Self(Arc::from(RwLock::from(store)), PhantomData, PhantomData)
    }

    /// Inserts an item into the store.
    pub fn insert(&self, k: K, v: V) -> Option<V> {
        self.0.write().insert(k, v)
    }

    /// Get an item from the store. This clones it to minimize the lock time
    /// of the store. Takes the write lock, since some stores reorder on read.
    pub fn get<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.0.write().get(k).cloned()
    }

    /// Remove an item from the store, returning the removed item if it
    /// existed.
    pub fn remove<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.0.write().remove(k)
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.0.read().contains_key(k)
    }

    /// Clears the store.
    pub fn clear(&self) {
        self.0.write().clear()
    }

    /// The number of elements in the store at present.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Runs `f` under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.0.read())
    }

    /// Runs `f` under the write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.0.write())
    }
}

impl<C, K, V> Clone for SharedStore<C, K, V>
where
    C: Store<K, V>,
    K: Eq + Hash,
    V: Clone,
{
    fn clone(&self) -> Self {
        SharedStore(self.0.clone(), PhantomData, PhantomData)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::{LruCache, OrderedMap, SharedStore};

    #[test]
    fn readme_snippet() {
        let cache: SharedStore<LruCache<usize, usize>, usize, usize> =
            SharedStore::with_store(LruCache::with_capacity(1));
        cache.insert(1, 1);

        let thread_cache = cache.clone();
        let r = thread::spawn(move || thread_cache.get(&1)).join();

        assert_eq!(Some(1), r.unwrap());
    }

    #[test]
    fn writers_on_many_threads_keep_per_thread_order() {
        let map: SharedStore<OrderedMap<(usize, usize), usize>, (usize, usize), usize> =
            SharedStore::with_store(OrderedMap::new());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let map = map.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        map.insert((t, i), i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(400, map.len());
        assert!(map.contains_key(&(3, 99)));

        // each thread's own inserts land in the order it made them
        map.read(|m| {
            for t in 0..4 {
                let seen: Vec<_> = m
                    .keys()
                    .filter(|(owner, _)| *owner == t)
                    .map(|(_, i)| *i)
                    .collect();
                assert_eq!((0..100).collect::<Vec<_>>(), seen);
            }
        });
    }

    #[test]
    fn compound_operations_under_one_lock() {
        let map: SharedStore<OrderedMap<&str, u32>, &str, u32> =
            SharedStore::with_store(OrderedMap::new());
        map.insert("a", 1);
        map.insert("b", 2);

        let popped = map.write(|m| {
            let front = m.pop_front();
            m.insert("c", 3);
            front
        });

        assert_eq!(Some(("a", 1)), popped);
        assert_eq!(Some(2), map.get("b"));
        assert_eq!(Some(2), map.remove("b"));
        assert_eq!(
            vec![("c", 3)],
            map.read(|m| m.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>())
        );

        map.clear();
        assert!(map.is_empty());
    }
}
