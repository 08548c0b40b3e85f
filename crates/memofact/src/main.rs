//! memofact - factorial timing demo for memocache

mod factorial;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use memocache::{EventSink, MemoCache, TracingSink, WriterSink};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use crate::factorial::{factorial, Factorial};

type FactorialFn = fn(&u64) -> Arc<Factorial>;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items)
    #[arg(short, long, default_value_t = 5)]
    capacity: usize,

    /// Factorial argument to time
    #[arg(short, long, default_value_t = 20_000)]
    value: u64,

    /// Where cache events go
    #[arg(short, long, value_enum, default_value_t = SinkKind::Writer)]
    sink: SinkKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SinkKind {
    /// `[LRUCache]`-prefixed lines on stdout
    Writer,
    /// Debug-level tracing events
    Tracing,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    if args.sink == SinkKind::Tracing {
        filter = filter.add_directive("memocache=debug".parse()?);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting memofact v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);

    match args.sink {
        SinkKind::Writer => run(&args, WriterSink::with_prefix(std::io::stdout(), "[LRUCache] ")),
        SinkKind::Tracing => run(&args, TracingSink),
    }
}

fn run<S: EventSink<u64>>(args: &Args, sink: S) -> Result<()> {
    let mut cache = MemoCache::new(args.capacity, factorial as FactorialFn, sink)
        .context("invalid cache configuration")?;

    info!("running factorial {}...", args.value);

    let (result, elapsed) = timed(&mut cache, args.value);
    info!(
        "without cache: time={:?} ({}! has {} digits)",
        elapsed,
        result.n(),
        result.digits()
    );

    let (_, elapsed) = timed(&mut cache, args.value);
    info!("with cache: time={:?}", elapsed);

    // Push the value out of the cache
    for key in 1..=args.capacity as u64 {
        cache.get(key);
    }

    let (_, elapsed) = timed(&mut cache, args.value);
    info!("after invalidating cache: time={:?}", elapsed);

    let stats = cache.stats();
    info!(
        "hits={} misses={} evictions={} hit_ratio={:.2}",
        stats.hits(),
        stats.misses(),
        stats.evictions(),
        stats.hit_ratio()
    );

    Ok(())
}

fn timed<S: EventSink<u64>>(
    cache: &mut MemoCache<u64, Arc<Factorial>, FactorialFn, S>,
    value: u64,
) -> (Arc<Factorial>, Duration) {
    let start = Instant::now();
    let result = cache.get(value);
    (result, start.elapsed())
}
