// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turn an octree into line segments for a debug renderer.
//!
//! The tree is walked through its read-only surface only: pre-order nodes,
//! node bounds and per-node object lists. Every node cube and every object box
//! becomes twelve `glam::Vec3` edges, which is what an immediate-mode gizmo
//! API usually wants. The root starts small and regrows to fit the scene.
//!
//! Run:
//! - `cargo run -p understory_demos --example octree_wireframe`

use std::collections::BTreeMap;

use tracing_subscriber::EnvFilter;
use understory_octree::{Aabb3D, Octree, OctreeConfig, OctreeError, OverflowPolicy, Vec3};

/// Index pairs into the corner list produced by [`corners`].
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Corners in octant order: bit 0 picks max x, bit 1 max y, bit 2 max z.
fn corners(aabb: &Aabb3D<f32>) -> [glam::Vec3; 8] {
    let (min, max): (glam::Vec3, glam::Vec3) = (aabb.min.into(), aabb.max.into());
    core::array::from_fn(|i| {
        glam::Vec3::select(
            glam::BVec3::new(i & 1 != 0, i & 2 != 0, i & 4 != 0),
            max,
            min,
        )
    })
}

fn push_box(lines: &mut Vec<[glam::Vec3; 2]>, aabb: &Aabb3D<f32>) {
    let c = corners(aabb);
    lines.extend(EDGES.iter().map(|&(a, b)| [c[a], c[b]]));
}

fn main() -> Result<(), OctreeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = OctreeConfig::new(Vec3::splat(0.0), 1.0)
        .with_max_depth(3)
        .with_overflow(OverflowPolicy::Regrow);
    let mut tree = Octree::new(config)?;

    // A loose spiral of crates.
    for i in 0..48_u8 {
        let t = f32::from(i) * 0.35;
        let r = 0.5 + f32::from(i) * 0.2;
        let center = glam::Vec3::new(r * t.cos(), f32::from(i % 6) - 2.5, r * t.sin());
        let half = glam::Vec3::splat(0.15 + f32::from(i % 3) * 0.2);
        tree.insert(Aabb3D::new((center - half).into(), (center + half).into()))?;
    }

    let mut node_lines = Vec::new();
    let mut object_lines = Vec::new();
    let mut per_depth: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
    for (id, depth) in tree.depth_first() {
        let Some(bound) = tree.bound(id) else {
            continue;
        };
        push_box(&mut node_lines, &bound.to_aabb());
        let entry = per_depth.entry(depth).or_default();
        entry.0 += 1;
        for (_, aabb) in tree.objects(id) {
            push_box(&mut object_lines, aabb);
            entry.1 += 1;
        }
    }

    let root = tree.bound(tree.root());
    println!("root {root:?}, max depth {}", tree.max_depth());
    for (depth, (nodes, objects)) in &per_depth {
        println!("depth {depth}: {nodes} nodes, {objects} objects");
    }
    println!(
        "{} node edges, {} object edges",
        node_lines.len(),
        object_lines.len()
    );
    Ok(())
}
