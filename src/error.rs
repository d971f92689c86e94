/// Errors surfaced by [`OrderedMap`](crate::OrderedMap) and its traversals.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The key is not present in the map.
    #[error("key not found")]
    KeyNotFound,

    /// The map was structurally modified (a key added, removed or reordered)
    /// after the traversal was started.
    #[error("map was structurally modified during traversal")]
    IteratorInvalidated,
}

pub type Result<T> = std::result::Result<T, MapError>;
