// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion and traversal throughput for `understory_octree`.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use understory_octree::{Aabb3D, Octree, OctreeConfig, OverflowPolicy, Vec3};

/// Deterministic scatter of small and medium boxes inside `[-extent, extent]³`.
fn scatter(n: usize, extent: f32) -> Vec<Aabb3D<f32>> {
    // xorshift32; the exact distribution does not matter, only repeatability.
    let mut state = 0x9E37_79B9_u32;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state >> 8) as f32 / (1 << 24) as f32
    };
    (0..n)
        .map(|_| {
            let size = 0.01 + next() * 0.5;
            let min = Vec3::new(next(), next(), next()) * (2.0 * (extent - size)) - Vec3::splat(extent - size);
            Aabb3D::new(min, min + Vec3::splat(size))
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree::insert");
    for &n in &[1_000_usize, 10_000, 100_000] {
        let boxes = scatter(n, 64.0);
        for depth in [4_u32, 8] {
            group.bench_with_input(
                BenchmarkId::new(format!("depth{depth}"), n),
                &boxes,
                |b, boxes| {
                    b.iter(|| {
                        let mut tree = Octree::with_bounds(Vec3::splat(0.0), 64.0, depth).unwrap();
                        tree.reserve(boxes.len());
                        for aabb in boxes {
                            tree.insert(black_box(aabb)).unwrap();
                        }
                        black_box(tree.node_count())
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_regrow(c: &mut Criterion) {
    let boxes = scatter(10_000, 512.0);
    c.bench_function("octree::insert regrow from unit root", |b| {
        b.iter(|| {
            let config = OctreeConfig::new(Vec3::splat(0.0), 1.0)
                .with_max_depth(6)
                .with_overflow(OverflowPolicy::Regrow);
            let mut tree = Octree::new(config).unwrap();
            for aabb in &boxes {
                tree.insert(*aabb).unwrap();
            }
            black_box(tree.max_depth())
        });
    });
}

fn bench_depth_first(c: &mut Criterion) {
    let boxes = scatter(100_000, 64.0);
    let mut tree = Octree::with_bounds(Vec3::splat(0.0), 64.0, 8).unwrap();
    tree.insert_all(boxes.iter()).unwrap();
    c.bench_function("octree::depth_first objects (100k)", |b| {
        b.iter(|| {
            tree.depth_first()
                .map(|(id, _)| tree.objects(id).count())
                .sum::<usize>()
        });
    });
}

criterion_group!(benches, bench_insert, bench_regrow, bench_depth_first);
criterion_main!(benches);
