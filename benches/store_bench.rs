//! Benchmarks for the drink event store
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hydration::store::{EventStore, NewDrink, StoreConfig};
use tempfile::tempdir;

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    group.throughput(Throughput::Elements(1));

    group.bench_function("in_memory", |b| {
        let store = EventStore::open_in_memory().unwrap();
        let drink = NewDrink::new(8.5, "12:01:00", 1);

        b.iter(|| store.append(black_box(&drink)).unwrap());
    });

    // Every append is fsynced, so this measures the durable write path
    group.bench_function("file", |b| {
        let dir = tempdir().unwrap();
        let store = EventStore::open(&StoreConfig::new(dir.path().join("bench.db"))).unwrap();
        let drink = NewDrink::new(8.5, "12:01:00", 1);

        b.iter(|| store.append(black_box(&drink)).unwrap());
    });

    group.finish();
}

fn bench_list_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_all");

    for size in [100, 1000, 10000] {
        let store = EventStore::open_in_memory().unwrap();
        for i in 0..size {
            store
                .append(&NewDrink::new((i % 16) as f64 * 0.5, "12:00:00", i as i64))
                .unwrap();
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("rows_{}", size), |b| {
            b.iter(|| black_box(store.list_all().unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_list_all);
criterion_main!(benches);
