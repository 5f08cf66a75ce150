//! Benchmark for RedBlackTreeMap vs standard BTreeMap.
//!
//! Compares the performance of ordcollections' RedBlackTreeMap against Rust's
//! standard BTreeMap for common operations.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ordcollections::tree::RedBlackTreeMap;
use std::collections::BTreeMap;
use std::hint::black_box;

const SIZES: [i64; 3] = [100, 1000, 10000];

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in SIZES {
        group.bench_with_input(
            BenchmarkId::new("RedBlackTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = RedBlackTreeMap::new();
                    for index in 0..size {
                        map.insert(black_box(index), black_box(index * 2));
                    }
                    black_box(map)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("BTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = BTreeMap::new();
                    for index in 0..size {
                        map.insert(black_box(index), black_box(index * 2));
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in SIZES {
        let tree_map: RedBlackTreeMap<i64, i64> = (0..size).map(|index| (index, index)).collect();
        let btree_map: BTreeMap<i64, i64> = (0..size).map(|index| (index, index)).collect();

        group.bench_with_input(
            BenchmarkId::new("RedBlackTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    for index in 0..size {
                        black_box(tree_map.get(black_box(&index)));
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("BTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    for index in 0..size {
                        black_box(btree_map.get(black_box(&index)));
                    }
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in SIZES {
        let tree_map: RedBlackTreeMap<i64, i64> = (0..size).map(|index| (index, index)).collect();
        let btree_map: BTreeMap<i64, i64> = (0..size).map(|index| (index, index)).collect();

        group.bench_with_input(
            BenchmarkId::new("RedBlackTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter_batched(
                    || tree_map.clone(),
                    |mut map| {
                        for index in 0..size {
                            black_box(map.remove(&index));
                        }
                        map
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("BTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter_batched(
                    || btree_map.clone(),
                    |mut map| {
                        for index in 0..size {
                            black_box(map.remove(&index));
                        }
                        map
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

// =============================================================================
// pop_min Benchmark
// =============================================================================

fn benchmark_pop_min(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("pop_min");

    for size in SIZES {
        let tree_map: RedBlackTreeMap<i64, i64> = (0..size).map(|index| (index, index)).collect();
        let btree_map: BTreeMap<i64, i64> = (0..size).map(|index| (index, index)).collect();

        group.bench_function(BenchmarkId::new("RedBlackTreeMap", size), |bencher| {
            bencher.iter_batched(
                || tree_map.clone(),
                |mut map| {
                    while let Ok(entry) = map.pop_min() {
                        black_box(entry);
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", size), |bencher| {
            bencher.iter_batched(
                || btree_map.clone(),
                |mut map| {
                    while let Some(entry) = map.pop_first() {
                        black_box(entry);
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// iteration Benchmark
// =============================================================================

fn benchmark_iter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iter");

    for size in SIZES {
        let tree_map: RedBlackTreeMap<i64, i64> = (0..size).map(|index| (index, index)).collect();
        let btree_map: BTreeMap<i64, i64> = (0..size).map(|index| (index, index)).collect();

        group.bench_function(BenchmarkId::new("RedBlackTreeMap", size), |bencher| {
            bencher.iter(|| black_box(tree_map.iter().map(|(_, value)| value).sum::<i64>()));
        });

        group.bench_function(BenchmarkId::new("BTreeMap", size), |bencher| {
            bencher.iter(|| black_box(btree_map.iter().map(|(_, value)| value).sum::<i64>()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_get,
    benchmark_remove,
    benchmark_pop_min,
    benchmark_iter
);

criterion_main!(benches);
