//! Benchmarks comparing the strata skip set against crossbeam-skiplist.
//!
//! Run with: cargo bench --package strata-crossbeam --bench skip_set_benchmark

use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mimalloc::MiMalloc;

use strata_core::OrderedSet;
use strata_crossbeam::EpochSkipSet;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const POPULATION: i64 = 10_000;
const OPS_PER_THREAD: i64 = 10_000;

/// Deterministic shuffle of 0..n, so inserts do not arrive presorted.
fn scrambled(n: i64) -> Vec<i64> {
    let mut values: Vec<i64> = (0..n).collect();
    fastrand::Rng::with_seed(0x5eed_cafe).shuffle(&mut values);
    values
}

fn bench_sequential_insert(c: &mut Criterion) {
    let values = scrambled(POPULATION);
    let mut group = c.benchmark_group("sequential_insert");

    group.bench_with_input(BenchmarkId::new("strata", POPULATION), &values, |b, values| {
        b.iter(|| {
            let set: EpochSkipSet<i64> = EpochSkipSet::new();
            for &v in values {
                black_box(set.insert(v));
            }
        })
    });

    group.bench_with_input(
        BenchmarkId::new("crossbeam", POPULATION),
        &values,
        |b, values| {
            b.iter(|| {
                let set = crossbeam_skiplist::SkipSet::new();
                for &v in values {
                    black_box(set.insert(v));
                }
            })
        },
    );

    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    let values = scrambled(POPULATION);

    let strata: EpochSkipSet<i64> = EpochSkipSet::new();
    let crossbeam = crossbeam_skiplist::SkipSet::new();
    for &v in &values {
        strata.insert(v);
        crossbeam.insert(v);
    }

    let mut group = c.benchmark_group("contains");

    // Alternate hits and misses
    group.bench_function(BenchmarkId::new("strata", POPULATION), |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(strata.contains(&(i * 2)));
                black_box(strata.contains(&(POPULATION + i)));
            }
        })
    });

    group.bench_function(BenchmarkId::new("crossbeam", POPULATION), |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(crossbeam.contains(&(i * 2)));
                black_box(crossbeam.contains(&(POPULATION + i)));
            }
        })
    });

    group.finish();
}

fn bench_concurrent_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_insert");
    group.sample_size(10);

    for thread_count in [2usize, 4, 8] {
        group.bench_function(BenchmarkId::new("strata", thread_count), |b| {
            b.iter(|| {
                let set: Arc<EpochSkipSet<i64>> = Arc::new(EpochSkipSet::new());
                let handles: Vec<_> = (0..thread_count)
                    .map(|t| {
                        let set = Arc::clone(&set);
                        thread::spawn(move || {
                            let base = (t as i64) * OPS_PER_THREAD;
                            for i in 0..OPS_PER_THREAD {
                                set.insert(base + i);
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            })
        });

        group.bench_function(BenchmarkId::new("crossbeam", thread_count), |b| {
            b.iter(|| {
                let set = Arc::new(crossbeam_skiplist::SkipSet::new());
                let handles: Vec<_> = (0..thread_count)
                    .map(|t| {
                        let set = Arc::clone(&set);
                        thread::spawn(move || {
                            let base = (t as i64) * OPS_PER_THREAD;
                            for i in 0..OPS_PER_THREAD {
                                set.insert(base + i);
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            })
        });
    }

    group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_workload");
    group.sample_size(10);

    let thread_count = 4usize;

    group.bench_function(BenchmarkId::new("strata", thread_count), |b| {
        b.iter(|| {
            let set: Arc<EpochSkipSet<i64>> = Arc::new(EpochSkipSet::new());
            let handles: Vec<_> = (0..thread_count)
                .map(|t| {
                    let set = Arc::clone(&set);
                    thread::spawn(move || {
                        for i in 0..OPS_PER_THREAD {
                            let key = (i * 31 + t as i64) % 1000;
                            match i % 4 {
                                0 => {
                                    set.insert(key);
                                }
                                1 => {
                                    set.remove(&key);
                                }
                                _ => {
                                    black_box(set.contains(&key));
                                }
                            }
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        })
    });

    group.bench_function(BenchmarkId::new("crossbeam", thread_count), |b| {
        b.iter(|| {
            let set = Arc::new(crossbeam_skiplist::SkipSet::new());
            let handles: Vec<_> = (0..thread_count)
                .map(|t| {
                    let set = Arc::clone(&set);
                    thread::spawn(move || {
                        for i in 0..OPS_PER_THREAD {
                            let key = (i * 31 + t as i64) % 1000;
                            match i % 4 {
                                0 => {
                                    set.insert(key);
                                }
                                1 => {
                                    set.remove(&key);
                                }
                                _ => {
                                    black_box(set.contains(&key));
                                }
                            }
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_insert,
    bench_contains,
    bench_concurrent_insert,
    bench_mixed_workload
);
criterion_main!(benches);
