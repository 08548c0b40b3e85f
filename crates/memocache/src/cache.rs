//! MemoCache: LRU cache wrapping a compute function

use std::borrow::Borrow;
use std::convert::Infallible;
use std::hash::Hash;
use std::num::NonZeroUsize;

use crate::compute::Compute;
use crate::error::{Error, Result};
use crate::lru::{Iter, LruList};
use crate::sink::{CacheEvent, EventSink};
use crate::stats::CacheStats;

/// Memoizing cache with least-recently-used eviction
///
/// Every lookup goes through [`get`](Self::get) or
/// [`try_get`](Self::try_get). A cached key is returned straight away and
/// becomes the most recently used entry. An absent key is computed, stored as
/// the most recently used entry and, when the cache is already full, the least
/// recently used entry is evicted to make room.
///
/// Each lookup reports exactly one [`CacheEvent::Hit`] or
/// [`CacheEvent::Miss`] to the sink, and a miss that evicts reports a
/// following [`CacheEvent::Evicted`].
///
/// ```
/// use memocache::MemoCache;
///
/// let mut cache = MemoCache::new(2, |n: &u64| *n * *n, ()).unwrap();
///
/// assert_eq!(cache.get(3), 9);
/// assert_eq!(cache.get(3), 9);
/// assert_eq!(cache.stats().hits(), 1);
/// ```
pub struct MemoCache<K, V, C, S = ()> {
    /// Index and recency list
    entries: LruList<K, V>,

    /// Wrapped function, called on every miss
    compute: C,

    /// Observer of hits, misses and evictions
    sink: S,

    stats: CacheStats,
}

impl<K, V, C, S> MemoCache<K, V, C, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    C: Compute<K, V>,
    S: EventSink<K>,
{
    /// Create a new cache
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of cached entries, at least 1
    /// * `compute` - Function producing the value of an absent key
    /// * `sink` - Receiver of cache events
    ///
    /// # Returns
    /// * `Result<MemoCache>` - Empty cache, or `Error::InvalidCapacity` for 0
    pub fn new(capacity: usize, compute: C, sink: S) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(Error::InvalidCapacity(capacity))?;
        Ok(Self::with_capacity(capacity, compute, sink))
    }

    /// Create a new cache from an already validated capacity
    pub fn with_capacity(capacity: NonZeroUsize, compute: C, sink: S) -> Self {
        Self {
            entries: LruList::new(capacity),
            compute,
            sink,
            stats: CacheStats::new(),
        }
    }

    /// Return the value for `key`, computing and caching it on a miss
    ///
    /// The compute error is returned unchanged. In that case nothing is
    /// inserted or evicted and the recency order is untouched.
    pub fn try_get(&mut self, key: K) -> std::result::Result<V, C::Error> {
        if let Some(value) = self.entries.touch(&key) {
            let value = value.clone();
            self.stats.record_hit();
            self.sink.record(CacheEvent::Hit(&key));
            return Ok(value);
        }

        self.stats.record_miss();
        self.sink.record(CacheEvent::Miss(&key));

        // Nothing is mutated until compute has returned a value.
        let value = self.compute.compute(&key)?;

        if self.entries.is_full() {
            if let Some((evicted, _)) = self.entries.pop_back() {
                self.stats.record_eviction();
                self.sink.record(CacheEvent::Evicted(&evicted));
            }
        }

        self.entries.push_front(key, value.clone());

        Ok(value)
    }

    /// Return the value for `key`, computing and caching it on a miss
    pub fn get(&mut self, key: K) -> V
    where
        C: Compute<K, V, Error = Infallible>,
    {
        match self.try_get(key) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Drop every cached entry and reset statistics
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.reset();
    }
}

impl<K, V, C, S> MemoCache<K, V, C, S>
where
    K: Hash + Eq + Clone,
{
    /// Get current number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> NonZeroUsize {
        self.entries.capacity()
    }

    /// Check whether `key` is cached, without touching it
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains(key)
    }

    /// Cached value for `key`, without touching it or computing it
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.peek(key)
    }

    /// Most recently used key
    pub fn head(&self) -> Option<&K> {
        self.entries.head_key()
    }

    /// Least recently used key, the next one to be evicted
    pub fn tail(&self) -> Option<&K> {
        self.entries.tail_key()
    }

    /// Cached entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Cached keys from most to least recently used
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Borrow the event sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the event sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
