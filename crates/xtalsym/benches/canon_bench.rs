//! Criterion benchmarks for the canonical-form scan.
//! Focus: permutation-range order n in {8, 48, 192, 768} on a fixed-size
//! occupation vector, plus the invariant-subgroup filter.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use xtalsym::canon::{canonical_form, invariant_subgroup};
use xtalsym::config::{Configuration, OccCompare};
use xtalsym::sym::{PermuteGroup, Permutation};

const NUM_SITES: usize = 64;

fn random_range(order: usize, seed: u64) -> PermuteGroup {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut perms = vec![Permutation::identity(NUM_SITES)];
    while perms.len() < order {
        let mut map: Vec<usize> = (0..NUM_SITES).collect();
        for i in (1..NUM_SITES).rev() {
            let j = rng.gen_range(0..=i);
            map.swap(i, j);
        }
        perms.push(Permutation::new(map).expect("shuffle is a bijection"));
    }
    PermuteGroup::from_permutations(perms)
}

fn random_config(seed: u64) -> Configuration {
    let mut rng = StdRng::seed_from_u64(seed);
    Configuration::new((0..NUM_SITES).map(|_| rng.gen_range(0..3u8)).collect())
}

fn bench_canon(c: &mut Criterion) {
    let mut group = c.benchmark_group("canon");
    for &order in &[8usize, 48, 192, 768] {
        let range = random_range(order, 7);
        group.bench_with_input(BenchmarkId::new("canonical_form", order), &order, |b, _| {
            b.iter_batched(
                || random_config(11),
                |x| {
                    let _c = canonical_form(&x, range.ops(), &OccCompare);
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(
            BenchmarkId::new("invariant_subgroup", order),
            &order,
            |b, _| {
                b.iter_batched(
                    || random_config(13),
                    |x| {
                        let _s = invariant_subgroup(&x, range.ops(), &OccCompare);
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_canon);
criterion_main!(benches);
