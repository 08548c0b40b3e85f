//! Cache event notifications
//!
//! The cache reports every hit, miss and eviction to an [`EventSink`]. Sinks
//! only observe: they never see the cache itself, and whatever goes wrong
//! inside a sink stays there.

use std::fmt;
use std::io::Write;

/// Something that happened during a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent<'a, K> {
    /// Key was cached; compute was not called
    Hit(&'a K),
    /// Key was absent; compute is about to run
    Miss(&'a K),
    /// Key was dropped from the tail to make room
    Evicted(&'a K),
}

impl<'a, K> CacheEvent<'a, K> {
    /// Key the event refers to
    pub fn key(&self) -> &'a K {
        match *self {
            CacheEvent::Hit(key) | CacheEvent::Miss(key) | CacheEvent::Evicted(key) => key,
        }
    }

    /// Short event name: `hit`, `miss` or `evicted`
    pub fn kind(&self) -> &'static str {
        match self {
            CacheEvent::Hit(_) => "hit",
            CacheEvent::Miss(_) => "miss",
            CacheEvent::Evicted(_) => "evicted",
        }
    }
}

impl<K: fmt::Display> fmt::Display for CacheEvent<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cache {} - key: {}", self.kind(), self.key())
    }
}

/// Receiver of cache events
pub trait EventSink<K> {
    /// Called synchronously from inside the lookup
    fn record(&mut self, event: CacheEvent<'_, K>);
}

/// Discards every event
impl<K> EventSink<K> for () {
    fn record(&mut self, _event: CacheEvent<'_, K>) {}
}

impl<K, F> EventSink<K> for F
where
    F: FnMut(CacheEvent<'_, K>),
{
    fn record(&mut self, event: CacheEvent<'_, K>) {
        self(event)
    }
}

/// Forwards events to `tracing` at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl<K: fmt::Display> EventSink<K> for TracingSink {
    fn record(&mut self, event: CacheEvent<'_, K>) {
        tracing::debug!(
            target: "memocache",
            event = event.kind(),
            key = %event.key(),
            "{}",
            event
        );
    }
}

/// Writes one formatted line per event
///
/// Write failures are logged and dropped; they never reach the cache.
pub struct WriterSink<W> {
    writer: W,
    prefix: String,
}

impl<W: Write> WriterSink<W> {
    /// Create a sink writing bare event lines
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            prefix: String::new(),
        }
    }

    /// Create a sink that starts every line with `prefix`
    pub fn with_prefix<P: Into<String>>(writer: W, prefix: P) -> Self {
        Self {
            writer,
            prefix: prefix.into(),
        }
    }

    /// Borrow the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrow the underlying writer
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Take back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<K: fmt::Display, W: Write> EventSink<K> for WriterSink<W> {
    fn record(&mut self, event: CacheEvent<'_, K>) {
        if let Err(e) = writeln!(self.writer, "{}{}", self.prefix, event) {
            tracing::warn!("Failed to write cache event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_event_lines() {
        assert_eq!(CacheEvent::Hit(&10).to_string(), "cache hit - key: 10");
        assert_eq!(CacheEvent::Miss(&20).to_string(), "cache miss - key: 20");
        assert_eq!(
            CacheEvent::Evicted(&"k").to_string(),
            "cache evicted - key: k"
        );
    }

    #[test]
    fn test_writer_sink_prefix() {
        let mut sink = WriterSink::with_prefix(Vec::new(), "[LRUCache] ");
        sink.record(CacheEvent::Miss(&1));
        sink.record(CacheEvent::Evicted(&2));

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "[LRUCache] cache miss - key: 1\n[LRUCache] cache evicted - key: 2\n"
        );
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_sink_swallows_errors() {
        let mut sink = WriterSink::new(BrokenWriter);
        sink.record(CacheEvent::Hit(&1));
    }

    #[test]
    fn test_closure_sink() {
        let mut kinds = Vec::new();
        {
            let mut sink = |event: CacheEvent<'_, i32>| kinds.push(event.kind());
            sink.record(CacheEvent::Hit(&1));
            sink.record(CacheEvent::Miss(&2));
        }
        assert_eq!(kinds, vec!["hit", "miss"]);
    }
}
