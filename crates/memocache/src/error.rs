//! Error types for memocache

use thiserror::Error;

/// Result type alias for memocache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring a cache
///
/// Lookups themselves never fail on the cache's account; a failing compute
/// function surfaces its own error type through [`MemoCache::try_get`].
///
/// [`MemoCache::try_get`]: crate::MemoCache::try_get
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capacity must hold at least one entry
    #[error("invalid cache capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}
