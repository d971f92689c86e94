//! A linked list that flattens all its nodes onto a Vec for storage, gaining
//! data locality and O(1) random access to any node by handle.

use std::ops::{Index, IndexMut};

/// Alias for the index of a node in the linked list's storage vec.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeHandle(usize);

/// The anchor node. It lives at the front of the storage vec for the whole
/// life of the list and never holds a value.
pub(crate) const SENTINEL: NodeHandle = NodeHandle(0);

/// A node that lives in a linked list.
#[derive(Clone)]
pub(crate) struct Node<T> {
    /// The value being stored. `None` for the sentinel and for freed nodes.
    value: Option<T>,

    /// The index of the node previous to this one.
    prev: NodeHandle,

    /// The index of the next node in the list.
    next: NodeHandle,
}

impl<T> Node<T> {
    pub(crate) fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    pub(crate) fn next(&self) -> NodeHandle {
        self.next
    }

    pub(crate) fn prev(&self) -> NodeHandle {
        self.prev
    }
}

/// A circular doubly linked list addressed by position in a single
/// contiguous Vec. Removed nodes are freelisted and handed out again by later
/// pushes, so a handle stays valid until its node is removed and never moves.
///
/// The list closes on a sentinel at index 0: the sentinel's `next` is the
/// front and its `prev` is the back, which is why linking and unlinking never
/// special-case an empty list.
#[derive(Clone)]
pub(crate) struct LinkedList<T> {
    /// The nodes in the list, sentinel first.
    store: Vec<Node<T>>,

    /// Entries in the list which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,

    /// Number of live (non-sentinel, non-free) nodes.
    len: usize,
}

impl<T> LinkedList<T> {
    /// Creates a new linked list with room for `capacity` values.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut store = Vec::with_capacity(capacity + 1);
        store.push(Node {
            value: None,
            prev: SENTINEL,
            next: SENTINEL,
        });

        Self {
            store,
            free: Vec::new(),
            len: 0,
        }
    }

    /// The length of this linked list.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// How many values fit without reallocating the storage vec.
    pub(crate) fn capacity(&self) -> usize {
        self.store.capacity() - 1
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        let additional = additional.saturating_sub(self.free.len());
        self.store.reserve(additional);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        // freed nodes in the middle can't move, since outstanding handles
        // point at them; only the trailing capacity goes.
        self.store.shrink_to_fit();
        self.free.shrink_to_fit();
    }

    /// Gets an element from the list, if the handle refers to a live node.
    pub(crate) fn get(&self, node: NodeHandle) -> Option<&T> {
        self.store.get(node.0).and_then(|n| n.value.as_ref())
    }

    /// Mutable version of [`LinkedList::get`].
    pub(crate) fn get_mut(&mut self, node: NodeHandle) -> Option<&mut T> {
        self.store.get_mut(node.0).and_then(|n| n.value.as_mut())
    }

    /// The handle of the first node, if the list isn't empty.
    pub(crate) fn front(&self) -> Option<NodeHandle> {
        self.non_sentinel(self.store[SENTINEL.0].next)
    }

    /// The handle of the last node, if the list isn't empty.
    pub(crate) fn back(&self) -> Option<NodeHandle> {
        self.non_sentinel(self.store[SENTINEL.0].prev)
    }

    /// The node following `node`, or `None` at the back of the list.
    pub(crate) fn next(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.non_sentinel(self.store[node.0].next)
    }

    /// The node preceding `node`, or `None` at the front of the list.
    pub(crate) fn prev(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.non_sentinel(self.store[node.0].prev)
    }

    fn non_sentinel(&self, node: NodeHandle) -> Option<NodeHandle> {
        if node == SENTINEL {
            None
        } else {
            Some(node)
        }
    }

    /// Pushes t onto the back of the list and returns a handle to the node.
    pub(crate) fn push_back(&mut self, t: T) -> NodeHandle {
        let tail = self.store[SENTINEL.0].prev;
        let n = Node {
            value: Some(t),
            prev: tail,
            next: SENTINEL,
        };

        // use the first available location in the storage vec, or infer what
        // the next location will be on push.
        let idx = match self.free.pop() {
            Some(idx) => {
                self.store[idx.0] = n;
                idx
            }
            None => {
                if self.store.len() == self.store.capacity() {
                    log::trace!(
                        "linked list storage full at {} nodes, growing",
                        self.store.len() - 1
                    );
                }
                self.store.push(n);
                NodeHandle(self.store.len() - 1)
            }
        };

        self.store[tail.0].next = idx;
        self.store[SENTINEL.0].prev = idx;
        self.len += 1;

        idx
    }

    /// Remove an arbitrary node from the list, handing back its value.
    ///
    /// Panics if the handle doesn't refer to a live node.
    pub(crate) fn remove_node(&mut self, node: NodeHandle) -> T {
        let value = match self.store.get_mut(node.0).and_then(|n| n.value.take()) {
            Some(value) => value,
            None => dead_node(node),
        };

        self.unlink(node);
        self.free.push(node);
        self.len -= 1;

        value
    }

    /// Moves a live node to the back of the list. Returns false if it was
    /// already there.
    pub(crate) fn move_to_back(&mut self, node: NodeHandle) -> bool {
        if self.get(node).is_none() {
            dead_node(node);
        }

        let tail = self.store[SENTINEL.0].prev;
        if tail == node {
            return false;
        }

        self.unlink(node);

        let n = &mut self.store[node.0];
        n.prev = tail;
        n.next = SENTINEL;
        self.store[tail.0].next = node;
        self.store[SENTINEL.0].prev = node;

        true
    }

    /// Link prev to next and next to prev so node doesn't exist in the chain
    /// anymore. The node's own links are left stale.
    fn unlink(&mut self, node: NodeHandle) {
        let prev = self.store[node.0].prev;
        let next = self.store[node.0].next;

        self.store[prev.0].next = next;
        self.store[next.0].prev = prev;
    }

    /// Clears this linked list. Does not free the underlying buffers.
    pub(crate) fn clear(&mut self) {
        self.store.truncate(1);
        let sentinel = &mut self.store[SENTINEL.0];
        sentinel.prev = SENTINEL;
        sentinel.next = SENTINEL;
        self.free.clear();
        self.len = 0;
    }

    /// Raw access to the node storage, for iterators that hand out disjoint
    /// mutable borrows.
    pub(crate) fn nodes_mut_ptr(&mut self) -> *mut Node<T> {
        self.store.as_mut_ptr()
    }

    /// Index of a handle into the storage vec.
    pub(crate) fn offset(node: NodeHandle) -> usize {
        node.0
    }
}

#[cold]
#[inline(never)]
fn dead_node(node: NodeHandle) -> ! {
    panic!("linked list node {} is not live", node.0);
}

impl<T> Index<NodeHandle> for LinkedList<T> {
    type Output = T;

    fn index(&self, node: NodeHandle) -> &T {
        match self.get(node) {
            Some(value) => value,
            None => dead_node(node),
        }
    }
}

impl<T> IndexMut<NodeHandle> for LinkedList<T> {
    fn index_mut(&mut self, node: NodeHandle) -> &mut T {
        match self.get_mut(node) {
            Some(value) => value,
            None => dead_node(node),
        }
    }
}
