//! An insertion-ordered hash map, and a couple of containers built on it.
//!
//! [`OrderedMap`] iterates in the order keys were most recently inserted.
//! Replacing a value keeps its key where it is; removing a key and inserting
//! it again moves it to the back. Lookups, inserts and removals are O(1).
//!
//! ```
//! use ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! for (k, v) in (65..=69).zip('A'..='E') {
//!     map.insert(k, v);
//! }
//! map.remove(&67).unwrap();
//! map.insert(85, 'U');
//! map.insert(66, 'Q');
//!
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, [65, 66, 68, 69, 85]);
//! ```
//!
//! The same ordering drives [`LruCache`], and [`SharedStore`] (behind the
//! default `shared` feature) puts either behind a lock.

mod error;
mod identity_hasher;
mod linked_list;
mod lru_cache;
pub mod ordered_map;
#[cfg(feature = "shared")]
mod shared_store;
mod store;

#[cfg(test)]
mod proptests;

pub use error::{MapError, Result};
pub use identity_hasher::{BuildIdentityHasher, IdentityHasher};
pub use lru_cache::LruCache;
pub use ordered_map::{OrderedMap, Traversal};
#[cfg(feature = "shared")]
pub use shared_store::SharedStore;
pub use store::Store;
