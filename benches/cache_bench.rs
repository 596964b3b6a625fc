//! Benchmarks for blacklist cache lookup.
//!
//! Measures how quickly a loaded, sorted cache answers membership checks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box};
use rand::SeedableRng;
use rand::distr::{Alphanumeric, SampleString};
use rand::rngs::StdRng;

use sinkhole::cache::SortedStringSet;

const DOMAINS: usize = 100_000;

fn loaded_cache() -> SortedStringSet {
    let mut rng = StdRng::seed_from_u64(1);
    let cache = SortedStringSet::new();
    cache.append(
        (0..DOMAINS).map(|_| format!("{}.example.com.", Alphanumeric.sample_string(&mut rng, 10))),
    );
    cache.add("doubleclick.net.");
    cache.sort();
    cache
}

fn bench_contains(c: &mut Criterion) {
    let cache = loaded_cache();

    let mut group = c.benchmark_group("cache");
    group.throughput(Throughput::Elements(1));

    group.bench_function(BenchmarkId::new("contains", "hit"), |b| {
        b.iter(|| cache.contains(black_box("doubleclick.net.")))
    });

    // Sorts right next to a stored entry
    group.bench_function(BenchmarkId::new("contains", "adjacent_miss"), |b| {
        b.iter(|| cache.contains(black_box("doubleclick.net")))
    });

    group.bench_function(BenchmarkId::new("contains", "miss"), |b| {
        b.iter(|| cache.contains(black_box("www.rust-lang.org.")))
    });

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    c.bench_function("sort_already_sorted", |b| {
        let cache = loaded_cache();
        b.iter(|| cache.sort())
    });
}

fn main() {
    let mut criterion = Criterion::default().configure_from_args();
    bench_contains(&mut criterion);
    bench_sort(&mut criterion);
    criterion.final_summary();
}
