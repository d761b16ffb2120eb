// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_octree --heading-base-level=0

//! Understory Octree: a bounded, fixed-depth 3D octree over AABB objects.
//!
//! Understory Octree is a spatial index for scenes, editors and debug
//! visualizers that need to bucket 3D objects by where they sit.
//!
//! - Insert objects that expose an axis-aligned bounding box ([`Bounded`]).
//! - Each object is stored at the deepest node whose cube fully contains it,
//!   down to a fixed depth limit. Objects straddling a child boundary stay at
//!   the parent.
//! - Walk the result through a read-only traversal surface: leaf test, child
//!   slots, child bounds (also for slots that hold no node yet), per-node object
//!   lists, and a pre-order iterator.
//!
//! Nodes and object cells live in flat arenas inside the [`Octree`]; children
//! and parents are plain [`NodeId`] indices. Nothing is removed once inserted.
//!
//! # Example
//!
//! ```rust
//! use understory_octree::{Aabb3D, Octant, Octree, Vec3};
//!
//! // A cube of half-size 4 around the origin, subdivided at most 3 times.
//! let mut tree = Octree::with_bounds(Vec3::splat(0.0_f32), 4.0, 3).unwrap();
//!
//! let a = tree.insert(("A", Aabb3D::new(Vec3::splat(0.1), Vec3::splat(0.9)))).unwrap();
//! let b = tree.insert(("B", Aabb3D::new(Vec3::splat(-3.0), Vec3::splat(-0.1)))).unwrap();
//!
//! // A is small enough to reach the depth limit.
//! assert_eq!(tree.depth_of(a.node()), Some(3));
//! // B spans two depth-2 cells, so it stays one level below the root.
//! assert_eq!(tree.depth_of(b.node()), Some(1));
//! assert_eq!(tree.child(tree.root(), Octant::empty()), Some(b.node()));
//!
//! let names: Vec<_> = tree.objects(b.node()).map(|(_, (name, _))| *name).collect();
//! assert_eq!(names, ["B"]);
//! ```
//!
//! ## Objects outside the root
//!
//! What happens to an object the root does not contain is chosen up front with
//! [`OverflowPolicy`]: reject it with [`OctreeError::OutsideRoot`] (the default),
//! or grow the root by doubling it until the object fits.
//!
//! ```rust
//! use understory_octree::{Aabb3D, Octree, OctreeConfig, OverflowPolicy, Vec3};
//!
//! let config = OctreeConfig::new(Vec3::splat(0.0_f64), 1.0)
//!     .with_max_depth(4)
//!     .with_overflow(OverflowPolicy::Regrow);
//! let mut tree = Octree::new(config).unwrap();
//! tree.insert(Aabb3D::new(Vec3::splat(5.0), Vec3::splat(6.0))).unwrap();
//! assert_eq!(tree.bound(tree.root()).unwrap().half_size, 4.0);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: implements `std::error::Error` for [`OctreeError`].
//!   Without it the crate is `no_std` and uses `core::error::Error`.
//! - `glam`: conversions between [`Vec3`] and `glam::Vec3`/`glam::DVec3`.
//! - `tracing`: spans around insertion and events for placement, root growth
//!   and rejected objects.
//!
//! ### Float semantics
//!
//! Coordinates must be finite; objects with NaN or infinite bounds are rejected
//! with [`OctreeError::MalformedBounds`]. Containment tests are inclusive, so an
//! object lying on a boundary plane goes to the lowest-indexed child that
//! touches it.

#![no_std]

extern crate alloc;

mod bound;
mod config;
mod dump;
mod error;
mod octant;
mod tree;
mod types;

pub use bound::NodeBound;
pub use config::{DEFAULT_MAX_DEPTH, MAX_GROWTH_STEPS, OctreeConfig, OverflowPolicy};
pub use dump::DisplayTree;
pub use error::OctreeError;
pub use octant::Octant;
pub use tree::{DepthFirst, NodeId, ObjectKey, Objects, Octree};
pub use types::{Aabb3D, Bounded, Scalar, Vec3};
