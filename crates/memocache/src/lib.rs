//! # memocache
//!
//! Memoizing LRU cache around an expensive single-argument function.
//!
//! ## Architecture
//! - **Index**: AHash map from key to list slot (O(1))
//! - **Recency list**: Arena-backed doubly-linked list, head is most
//!   recently used, tail is next to be evicted (O(1))
//! - **Compute**: Wrapped function, called only on a miss
//! - **Sink**: Observer notified of every hit, miss and eviction
//!
//! The cache is single-threaded: lookups take `&mut self`. Wrap it in a lock
//! to share it.

#![warn(missing_docs)]

mod cache;
mod compute;
mod error;
mod lru;
mod sink;
mod stats;

pub use cache::MemoCache;
pub use compute::{Compute, Fallible};
pub use error::{Error, Result};
pub use lru::Iter;
pub use sink::{CacheEvent, EventSink, TracingSink, WriterSink};
pub use stats::CacheStats;
