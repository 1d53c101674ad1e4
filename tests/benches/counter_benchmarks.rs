//! # Counter Module Benchmarks
//!
//! | Operation | Backend | Notes |
//! |-----------|---------|-------|
//! | IncrementCounter | in-memory | fresh vs existing counter |
//! | ListCounters | in-memory | page sizes 10 / 100 / 1000 over 10k counters |
//! | UpdateParams | in-memory | authority path incl. validation |
//! | IncrementCounter | file-backed | full rewrite per command |

use counter_module::{CounterParams, FileBackedKVStore, FileStoreConfig, InMemoryKVStore, PageRequest};
use counter_tests::integration::fixtures::{
    hex_address, hex_module, increment, list_page, update_params, HEX_AUTHORITY,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::time::Duration;

fn bench_increment(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter-increment");
    let module = hex_module();

    let mut store = InMemoryKVStore::new();
    let hot = hex_address(1);
    group.bench_function("existing_counter", |b| {
        b.iter(|| module.deliver(&mut store, increment(black_box(&hot))).unwrap())
    });

    let mut store = InMemoryKVStore::new();
    let mut rng = rand::thread_rng();
    group.bench_function("fresh_counter", |b| {
        b.iter_batched(
            || hex_address(rng.gen()),
            |sender| module.deliver(&mut store, increment(&sender)).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_list_counters(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter-list");
    group.measurement_time(Duration::from_secs(5));

    let module = hex_module();
    let mut store = InMemoryKVStore::new();
    for id in 0..10_000u64 {
        module.deliver(&mut store, increment(&hex_address(id))).unwrap();
    }

    for limit in [10u64, 100, 1_000] {
        group.throughput(Throughput::Elements(limit));
        group.bench_with_input(BenchmarkId::new("first_page", limit), &limit, |b, &limit| {
            b.iter(|| list_page(&module, &store, Some(PageRequest::with_limit(limit))))
        });
    }

    group.finish();
}

fn bench_update_params(c: &mut Criterion) {
    let module = hex_module();
    let mut store = InMemoryKVStore::new();
    let mut params = CounterParams::with_label("bench");
    for i in 0..16 {
        params = params.with_setting(format!("key_{}", i), "value");
    }

    c.bench_function("counter-update-params", |b| {
        b.iter(|| {
            module
                .deliver(&mut store, update_params(HEX_AUTHORITY, black_box(params.clone())))
                .unwrap()
        })
    });
}

fn bench_file_backed_increment(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter-file-backed");
    group.sample_size(20);

    let dir = tempfile::TempDir::new().unwrap();
    let module = hex_module();
    let mut store =
        FileBackedKVStore::open(FileStoreConfig::for_testing(dir.path().join("bench.db"))).unwrap();
    for id in 0..1_000u64 {
        module.deliver(&mut store, increment(&hex_address(id))).unwrap();
    }

    let sender = hex_address(0);
    group.bench_function("increment_1k_keys", |b| {
        b.iter(|| module.deliver(&mut store, increment(&sender)).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_increment,
    bench_list_counters,
    bench_update_params,
    bench_file_backed_increment
);
criterion_main!(benches);
