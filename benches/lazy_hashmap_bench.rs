use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use lazy_hashmap::{LazyHashMap, LazyMap};
use std::time::Duration;

// splitmix64: well-spread keys without pulling in a rng crate.
fn seeds(mut state: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        Some(z ^ (z >> 31))
    })
}

fn config_key(n: u64) -> String {
    format!("cfg.{:x}", n)
}

fn pending_map(seed: u64, n: usize) -> (LazyHashMap<String, u64>, Vec<String>) {
    let mut m = LazyHashMap::with_capacity(n);
    let keys: Vec<_> = seeds(seed).take(n).map(config_key).collect();
    for (i, k) in keys.iter().enumerate() {
        let v = i as u64;
        m.insert_with(k.clone(), move || v.wrapping_mul(31));
    }
    (m, keys)
}

fn bench_insert_producers(c: &mut Criterion) {
    c.bench_function("lazy_hashmap_insert_producer_10k", |b| {
        b.iter_batched(
            || seeds(1).take(10_000).map(config_key).collect::<Vec<_>>(),
            |keys| {
                let mut m: LazyHashMap<String, u64> = LazyHashMap::with_capacity(keys.len());
                for (i, k) in keys.into_iter().enumerate() {
                    let v = i as u64;
                    m.insert_with(k, move || v);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_first_get(c: &mut Criterion) {
    c.bench_function("lazy_hashmap_first_get_10k", |b| {
        b.iter_batched(
            || pending_map(3, 10_000),
            |(mut m, keys)| {
                for k in &keys {
                    black_box(m.get(k.as_str()).ok());
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_memoized(c: &mut Criterion) {
    c.bench_function("lazy_hashmap_get_memoized", |b| {
        let (mut m, keys) = pending_map(7, 20_000);
        let _ = m.values().map(|vs| vs.count());
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k.as_str()).ok());
        })
    });
}

fn bench_get_miss_pending_only(c: &mut Criterion) {
    c.bench_function("lazy_hashmap_get_miss_pending_only", |b| {
        // Every entry is still pending, so a miss probes both tiers.
        let (mut m, _) = pending_map(11, 10_000);
        let absent: Vec<_> = seeds(11).skip(10_000).take(1_024).map(config_key).collect();
        let mut it = absent.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k.as_str()).ok());
        });
        assert_eq!(m.loaded_len(), 0);
    });
}

fn bench_entries_view(c: &mut Criterion) {
    c.bench_function("lazy_hashmap_entries_10k", |b| {
        let (m, _) = pending_map(13, 10_000);
        b.iter(|| black_box(m.entries().count()))
    });
}

fn bench_values_materialize(c: &mut Criterion) {
    c.bench_function("lazy_hashmap_values_materialize_10k", |b| {
        b.iter_batched(
            || pending_map(17, 10_000).0,
            |mut m| black_box(m.values().map(|vs| vs.count()).ok()),
            BatchSize::SmallInput,
        )
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(5));
    targets = bench_insert_producers, bench_first_get, bench_get_memoized,
        bench_get_miss_pending_only, bench_entries_view, bench_values_materialize
}
criterion_main!(benches);
