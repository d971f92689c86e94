use std::collections::HashMap;
use std::hint::black_box;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use ordered_map::OrderedMap;

const SIZES: &[usize] = &[10000];

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("ordered_map", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = OrderedMap::new();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });

        group.bench_with_input(
            BenchmarkId::new("ordered_map_preallocated", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    let mut map = OrderedMap::with_capacity(size);
                    for i in 0..size {
                        map.insert(black_box(i), black_box(i * 2));
                    }
                    map
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("std_hashmap", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = HashMap::new();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });
    }

    group.finish();
}

fn bench_remove_from_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_from_middle");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64 / 2));

        group.bench_with_input(BenchmarkId::new("ordered_map", size), &size, |b, &size| {
            b.iter_batched(
                || (0..size).map(|i| (i, i * 2)).collect::<OrderedMap<_, _>>(),
                |mut map| {
                    for i in (size / 4)..(size * 3 / 4) {
                        let _ = map.remove(black_box(&i));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("std_hashmap", size), &size, |b, &size| {
            b.iter_batched(
                || (0..size).map(|i| (i, i * 2)).collect::<HashMap<_, _>>(),
                |mut map| {
                    for i in (size / 4)..(size * 3 / 4) {
                        map.remove(black_box(&i));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Removing and re-inserting churns the free list, which is where slot reuse
/// happens.
fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("ordered_map", size), &size, |b, &size| {
            let mut map: OrderedMap<_, _> = (0..size).map(|i| (i, i)).collect();
            b.iter(|| {
                for i in 0..size {
                    let v = map.remove(&i).unwrap_or_default();
                    map.insert(black_box(i), v + 1);
                }
            })
        });
    }

    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        let map: OrderedMap<_, _> = (0..size).map(|i| (i, i * 2)).collect();
        // a fixed stride visits every key in a scattered order
        let stride = 7919 % size.max(1);

        group.bench_with_input(BenchmarkId::new("ordered_map", size), &size, |b, &size| {
            b.iter(|| {
                let mut sum = 0;
                let mut k = 0;
                for _ in 0..size {
                    k = (k + stride) % size;
                    sum += map.get(black_box(&k)).copied().unwrap_or_default();
                }
                sum
            })
        });
    }

    group.finish();
}

fn bench_iteration_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration_sparse");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("ordered_map", size), &size, |b, &size| {
            let mut map: OrderedMap<_, _> = (0..size).map(|i| (i, i * 2)).collect();
            for i in (0..size).step_by(3) {
                let _ = map.remove(&i);
            }

            b.iter(|| {
                let mut sum = 0;
                for (key, value) in map.iter() {
                    sum += black_box(*key) + black_box(*value);
                }
                sum
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_remove_from_middle,
    bench_churn,
    bench_random_access,
    bench_iteration_sparse,
);
criterion_main!(benches);
