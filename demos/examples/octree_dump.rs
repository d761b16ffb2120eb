// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a small octree and print its bracketed layout.
//!
//! Two boxes go into a cube of half-size 4 with a depth limit of 3. The small
//! one sinks to the depth limit; the larger one straddles the depth-2 split and
//! stays one level below the root.
//!
//! Run:
//! - `cargo run -p understory_demos --example octree_dump`
//! - `RUST_LOG=understory_octree=trace cargo run -p understory_demos --example octree_dump`

use tracing_subscriber::EnvFilter;
use understory_octree::{Aabb3D, Bounded, Octree, OctreeError, Vec3};

/// A named box owned by the scene, not by the tree.
#[derive(Debug)]
struct Body {
    name: &'static str,
    bounds: Aabb3D<f32>,
}

impl Bounded<f32> for Body {
    fn aabb(&self) -> Aabb3D<f32> {
        self.bounds
    }
}

fn main() -> Result<(), OctreeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let scene = [
        Body {
            name: "A",
            bounds: Aabb3D::new(Vec3::splat(0.1), Vec3::splat(0.9)),
        },
        Body {
            name: "B",
            bounds: Aabb3D::new(Vec3::splat(-3.0), Vec3::splat(-0.1)),
        },
    ];

    let mut tree: Octree<f32, &Body> = Octree::with_bounds(Vec3::splat(0.0), 4.0, 3)?;
    for body in &scene {
        let key = tree.insert(body)?;
        tracing::info!(
            name = body.name,
            depth = tree.depth_of(key.node()),
            bound = ?tree.bound(key.node()),
            "inserted"
        );
    }

    println!("{}", tree.display_with(|body, f| f.write_str(body.name)));
    Ok(())
}
