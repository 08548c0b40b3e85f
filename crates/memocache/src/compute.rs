//! The wrapped function

use std::convert::Infallible;

/// Function the cache calls on a miss
///
/// Plain closures `FnMut(&K) -> V` implement this and can never fail. Wrap a
/// closure returning `Result` in [`Fallible`] to let its error reach the
/// caller of [`MemoCache::try_get`](crate::MemoCache::try_get).
///
/// Implementations should return an equivalent value every time they are
/// called with the same key: the cache has no invalidation.
pub trait Compute<K, V> {
    /// Error returned when the value cannot be produced
    type Error;

    /// Produce the value for `key`
    fn compute(&mut self, key: &K) -> Result<V, Self::Error>;
}

impl<K, V, F> Compute<K, V> for F
where
    F: FnMut(&K) -> V,
{
    type Error = Infallible;

    fn compute(&mut self, key: &K) -> Result<V, Infallible> {
        Ok(self(key))
    }
}

/// Adapter for compute functions that can fail
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<K, V, E, F> Compute<K, V> for Fallible<F>
where
    F: FnMut(&K) -> Result<V, E>,
{
    type Error = E;

    fn compute(&mut self, key: &K) -> Result<V, E> {
        (self.0)(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_compute() {
        let mut double = |n: &u32| *n * 2;
        assert_eq!(Compute::compute(&mut double, &21), Ok(42));
    }

    #[test]
    fn test_fallible_compute() {
        let mut parse = Fallible(|s: &&str| s.parse::<i32>());
        assert_eq!(parse.compute(&"12"), Ok(12));
        assert!(parse.compute(&"twelve").is_err());
    }
}
