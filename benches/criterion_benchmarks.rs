use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use fastlfu::config::LfuCacheConfig;
use fastlfu::LfuCache;
use std::num::NonZeroUsize;

const SIZES: [usize; 5] = [10, 100, 1_000, 10_000, 100_000];

fn make_lfu<K: std::hash::Hash + Eq + Clone, V>(cap: Option<usize>) -> LfuCache<K, V> {
    let config = LfuCacheConfig {
        capacity: cap.and_then(NonZeroUsize::new),
    };
    LfuCache::init(config, None)
}

fn filled(n: usize) -> LfuCache<usize, usize> {
    let mut cache = make_lfu(None);
    for i in 0..n {
        cache.insert(i, i);
    }
    cache
}

pub fn insert_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    group.bench_function("unbounded", |b| {
        let mut cache = make_lfu(None);
        let mut n = 0usize;
        b.iter(|| {
            cache.insert(black_box(n), n);
            n += 1;
        });
    });

    // Every insertion past the first thousand evicts
    group.bench_function("bounded/1000", |b| {
        let mut cache = make_lfu(Some(1_000));
        let mut n = 0usize;
        b.iter(|| {
            black_box(cache.insert(black_box(n), n));
            n += 1;
        });
    });

    group.finish();
}

pub fn fetch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fetch");

    for &size in SIZES.iter() {
        group.bench_with_input(BenchmarkId::new("hit", size), &size, |b, &size| {
            let mut cache = filled(size);
            b.iter(|| {
                let hit = cache.fetch(black_box(&0)).is_some();
                assert!(hit);
            });
        });

        group.bench_with_input(BenchmarkId::new("miss", size), &size, |b, &size| {
            let mut cache = filled(size);
            b.iter(|| {
                let hit = cache.fetch(black_box(&size)).is_some();
                assert!(!hit);
            });
        });
    }

    // Lone key with no count + 1 bucket: the in-place bump path
    group.bench_function("lone_key", |b| {
        let mut cache = make_lfu(None);
        cache.insert(1usize, String::from("foo"));
        b.iter(|| black_box(cache.fetch(black_box(&1)).is_some()));
    });

    group.finish();
}

pub fn evict_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("evict");

    group.bench_function("evict", |b| {
        b.iter_batched_ref(
            || filled(10_000),
            |cache| {
                for _ in 0..10_000 {
                    black_box(cache.evict());
                }
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("evict_multiple/100", |b| {
        b.iter_batched_ref(
            || filled(10_000),
            |cache| black_box(cache.evict_multiple(100)),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    insert_benchmark,
    fetch_benchmark,
    evict_benchmark
);
criterion_main!(benches);
