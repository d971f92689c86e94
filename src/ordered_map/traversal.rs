use super::OrderedMap;
use crate::error::{MapError, Result};
use crate::linked_list::NodeHandle;

/// A position in an [`OrderedMap`]'s order which doesn't borrow the map.
///
/// Made by [`OrderedMap::traversal`]. Each step takes the map it came from
/// and fails with [`MapError::IteratorInvalidated`] if the map's structure
/// changed since the traversal started. Stepping with a different map is a
/// logic error; it won't panic, but the results are meaningless.
#[derive(Debug, Clone)]
pub struct Traversal {
    front: Option<NodeHandle>,
    back: Option<NodeHandle>,
    remaining: usize,
    version: u64,
}

impl Traversal {
    pub(super) fn new<K, V, S>(map: &OrderedMap<K, V, S>) -> Self {
        Self {
            front: map.entries.front(),
            back: map.entries.back(),
            remaining: map.len(),
            version: map.version,
        }
    }

    /// Steps forward, yielding the next entry from the front.
    pub fn next<'m, K, V, S>(
        &mut self,
        map: &'m OrderedMap<K, V, S>,
    ) -> Result<Option<(&'m K, &'m V)>> {
        self.check(map)?;
        if self.remaining == 0 {
            return Ok(None);
        }
        let Some(node) = self.front else {
            return Ok(None);
        };

        let entry = map.entries.get(node).ok_or(MapError::IteratorInvalidated)?;
        self.front = map.entries.next(node);
        self.remaining -= 1;

        Ok(Some((&entry.key, &entry.value)))
    }

    /// Steps backward, yielding the next entry from the back.
    pub fn next_back<'m, K, V, S>(
        &mut self,
        map: &'m OrderedMap<K, V, S>,
    ) -> Result<Option<(&'m K, &'m V)>> {
        self.check(map)?;
        if self.remaining == 0 {
            return Ok(None);
        }
        let Some(node) = self.back else {
            return Ok(None);
        };

        let entry = map.entries.get(node).ok_or(MapError::IteratorInvalidated)?;
        self.back = map.entries.prev(node);
        self.remaining -= 1;

        Ok(Some((&entry.key, &entry.value)))
    }

    /// Entries not yet visited from either end.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn check<K, V, S>(&self, map: &OrderedMap<K, V, S>) -> Result<()> {
        if map.version == self.version {
            Ok(())
        } else {
            log::trace!(
                "traversal started at version {} stepped at version {}",
                self.version,
                map.version
            );
            Err(MapError::IteratorInvalidated)
        }
    }
}
