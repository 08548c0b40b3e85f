use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use memocache::MemoCache;

fn expensive(n: &u64) -> u64 {
    (1..=64).fold(*n, |acc, i| acc.wrapping_mul(31).wrapping_add(i))
}

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let mut cache = MemoCache::new(1000, expensive, ()).unwrap();

        // Warm the cache
        for key in 0..100 {
            cache.get(key);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(counter % 100));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_hit_50_miss", |b| {
        let mut cache = MemoCache::new(1000, expensive, ()).unwrap();

        for key in 0..100 {
            cache.get(key);
        }

        let mut counter = 0u64;
        let mut fresh = 1_000_000u64;
        b.iter(|| {
            if counter % 2 == 0 {
                black_box(cache.get(counter % 100));
            } else {
                black_box(cache.get(fresh));
                fresh += 1;
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_cache_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_miss");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_miss_evict", |b| {
        let mut cache = MemoCache::new(10, expensive, ()).unwrap();

        let mut counter = 0u64;
        b.iter(|| {
            // Cycling through more keys than the capacity guarantees misses
            black_box(cache.get(counter % 100));
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_mixed_50_50,
    bench_cache_miss
);
criterion_main!(benches);
