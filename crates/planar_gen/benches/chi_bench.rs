//! Criterion benchmarks for the χ-algorithm (module F).
//! Focus sizes: n in {10, 50, 200}, each shrunk to a border of n/2.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p planar_gen

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use planar_gen::chi::to_vertex_sequence;
use planar_gen::mesh::Mesh;
use planar_gen::types::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
        .collect()
}

fn bench_chi(c: &mut Criterion) {
    let mut group = c.benchmark_group("chi");
    for &n in &[10usize, 50, 200] {
        group.bench_with_input(BenchmarkId::new("to_vertex_sequence", n), &n, |b, &n| {
            b.iter_batched(
                || (Mesh::new(), random_points(n, 11)),
                |(mut mesh, points)| {
                    let _border = to_vertex_sequence(&mut mesh, &points, n / 2);
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chi);
criterion_main!(benches);
