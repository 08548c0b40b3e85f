//! Recency list backing the cache
//!
//! Nodes live in a slot arena and link to each other by slot index, so
//! relinking stays O(1) without shared mutable references. The map indexes
//! keys to slots.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;

use ahash::RandomState;

/// Node in the recency list
struct Node<K, V> {
    key: K,
    value: V,
    /// Toward the head (more recently used)
    prev: Option<usize>,
    /// Toward the tail (less recently used)
    next: Option<usize>,
}

/// Index plus doubly-linked recency list with a fixed capacity
///
/// `head` is the most recently used entry, `tail` the least.
pub(crate) struct LruList<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: NonZeroUsize,
}

impl<K, V> LruList<K, V>
where
    K: Hash + Eq + Clone,
{
    pub(crate) fn new(capacity: NonZeroUsize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity.get(), RandomState::new()),
            nodes: Vec::with_capacity(capacity.get()),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.map.len() >= self.capacity.get()
    }

    pub(crate) fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Look up `key` and make it the head
    pub(crate) fn touch<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Look up `key` without changing its position
    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Link a new entry as the head.
    ///
    /// The caller makes room first: `key` must be absent and the list must
    /// not be full.
    pub(crate) fn push_front(&mut self, key: K, value: V) {
        debug_assert!(!self.map.contains_key(&key), "key already linked");
        debug_assert!(!self.is_full(), "push_front on a full list");

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: self.head,
        });

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }

        self.map.insert(key, idx);
    }

    /// Unlink and return the least recently used entry
    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let tail_idx = self.tail?;
        self.unlink(tail_idx);
        let node = self.nodes[tail_idx].take()?;
        self.free_node(tail_idx);
        self.map.remove(&node.key);
        Some((node.key, node.value))
    }

    pub(crate) fn head_key(&self) -> Option<&K> {
        self.head
            .and_then(|idx| self.nodes[idx].as_ref())
            .map(|node| &node.key)
    }

    pub(crate) fn tail_key(&self) -> Option<&K> {
        self.tail
            .and_then(|idx| self.nodes[idx].as_ref())
            .map(|node| &node.key)
    }

    /// Entries from head (most recent) to tail
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.map.len(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    /// Bridge the neighbours of `idx` around it, fixing head/tail.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &mut self.nodes[idx] {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }

    /// Panics if the map and the list disagree or the links are broken.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert!(self.len() <= self.capacity.get(), "over capacity");

        match self.len() {
            0 => {
                assert!(self.head.is_none(), "empty list with a head");
                assert!(self.tail.is_none(), "empty list with a tail");
            }
            1 => assert_eq!(self.head, self.tail, "single node must be head and tail"),
            _ => {}
        }

        let mut seen = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.nodes[idx].as_ref().expect("linked slot is empty");
            assert_eq!(node.prev, prev, "broken back link at slot {idx}");
            assert_eq!(self.map.get(&node.key), Some(&idx), "map points elsewhere");
            seen += 1;
            assert!(seen <= self.len(), "cycle in recency list");
            prev = Some(idx);
            cursor = node.next;
        }
        assert_eq!(prev, self.tail, "walk did not end at tail");
        assert_eq!(seen, self.len(), "map and list sizes differ");
    }
}

/// Iterator over `(key, value)` pairs from most to least recently used
pub struct Iter<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes[self.cursor?].as_ref()?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
