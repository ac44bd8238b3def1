use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use bstree::linked::Tree;

/// A seeded shuffle of `0..n`, so runs are comparable across invocations.
fn shuffled(n: usize) -> Vec<i32> {
    let mut values: Vec<i32> = (0..n as i32).collect();
    values.shuffle(&mut StdRng::seed_from_u64(0x5EED));
    values
}

/// Every 16th shuffled value, used as the membership probes.
fn probes(n: usize) -> Vec<i32> {
    shuffled(n).into_iter().step_by(16).collect()
}

/// Membership search over the same data held four ways: a plain list
/// scanned linearly, a tree built from sorted input (a degenerate chain), a
/// tree built from shuffled input, and that same tree after `rebalance`.
fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for n in [1023usize, 8191] {
        let probes = probes(n);

        let list: Vec<i32> = (0..n as i32).collect();
        group.bench_function(BenchmarkId::new("list-scan", n), |b| {
            b.iter(|| {
                let hits = probes.iter().filter(|p| list.contains(p)).count();
                black_box(hits)
            })
        });

        let chain: Tree<i32> = (0..n as i32).collect();
        group.bench_function(BenchmarkId::new("chain", n), |b| {
            b.iter(|| {
                let hits = probes.iter().filter(|p| chain.contains(p)).count();
                black_box(hits)
            })
        });

        let shuffled: Tree<i32> = shuffled(n).into_iter().collect();
        group.bench_function(BenchmarkId::new("shuffled", n), |b| {
            b.iter(|| {
                let hits = probes.iter().filter(|p| shuffled.contains(p)).count();
                black_box(hits)
            })
        });

        let mut rebalanced: Tree<i32> = self::shuffled(n).into_iter().collect();
        rebalanced.rebalance();
        group.bench_function(BenchmarkId::new("rebalanced", n), |b| {
            b.iter(|| {
                let hits = probes.iter().filter(|p| rebalanced.contains(p)).count();
                black_box(hits)
            })
        });
    }

    group.finish();
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for n in [1023usize, 8191] {
        let input = shuffled(n);
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                let tree: Tree<i32> = input.iter().copied().collect();
                black_box(tree.len())
            })
        });
    }

    group.finish();
}

fn bench_rebalance(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebalance");

    for n in [1023usize, 8191] {
        let tree: Tree<i32> = shuffled(n).into_iter().collect();
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    tree.rebalance();
                    tree
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find, bench_add, bench_rebalance);
criterion_main!(benches);
