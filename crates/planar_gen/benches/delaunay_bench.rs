//! Criterion benchmarks for Delaunay triangulation (module C).
//! Focus sizes: n in {10, 100, 1000}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p planar_gen

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use planar_gen::delaunay::delaunay;
use planar_gen::mesh::Mesh;
use planar_gen::types::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
        .collect()
}

fn bench_delaunay(c: &mut Criterion) {
    let mut group = c.benchmark_group("delaunay");
    for &n in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("triangulate", n), &n, |b, &n| {
            b.iter_batched(
                || (Mesh::new(), random_points(n, 7)),
                |(mut mesh, points)| {
                    let _tri = delaunay(&mut mesh, &points);
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_delaunay);
criterion_main!(benches);
