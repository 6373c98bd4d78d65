//! Criterion benchmarks for the response cache: insert, hit, miss, sweep.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use pokedex_cache::ExpiringCache;

const PAYLOAD: &[u8] = &[0x7b; 4096];

fn page_url(i: usize) -> String {
    format!("https://pokeapi.co/api/v2/location-area/?offset={}&limit=20", i * 20)
}

fn bench_insert(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _guard = rt.enter();
    let cache = ExpiringCache::new(Duration::from_secs(3600)).unwrap();

    let mut g = c.benchmark_group("insert");
    g.throughput(Throughput::Bytes(PAYLOAD.len() as u64));
    g.bench_function("insert_4k", |b| {
        let mut i = 0;
        b.iter(|| {
            cache.insert(page_url(i % 1000), PAYLOAD);
            i += 1;
        });
    });
    g.finish();
}

fn bench_get(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _guard = rt.enter();
    let cache = ExpiringCache::new(Duration::from_secs(3600)).unwrap();
    for i in 0..1000 {
        cache.insert(page_url(i), PAYLOAD);
    }
    let hit = page_url(500);
    let miss = page_url(5000);

    let mut g = c.benchmark_group("get");
    g.throughput(Throughput::Elements(1));
    g.bench_function("hit", |b| b.iter(|| black_box(cache.get(&hit))));
    g.bench_function("miss", |b| b.iter(|| black_box(cache.get(&miss))));
    g.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _guard = rt.enter();

    let mut g = c.benchmark_group("sweep");
    g.throughput(Throughput::Elements(1000));
    g.bench_function("scan_1000_live", |b| {
        b.iter_batched(
            || {
                let cache = ExpiringCache::new(Duration::from_secs(3600)).unwrap();
                for i in 0..1000 {
                    cache.insert(page_url(i), PAYLOAD);
                }
                cache
            },
            |cache| black_box(cache.cleanup_expired()),
            BatchSize::SmallInput,
        );
    });
    g.finish();
}

criterion_group!(benches, bench_insert, bench_get, bench_sweep);
criterion_main!(benches);
