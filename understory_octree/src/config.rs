// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction parameters for [`Octree`][crate::Octree].

use crate::bound::NodeBound;
use crate::error::OctreeError;
use crate::types::{Scalar, Vec3};

/// Depth used by [`OctreeConfig::new`] unless overridden.
pub const DEFAULT_MAX_DEPTH: u32 = 8;

/// Upper bound on root doublings performed by a single insertion under
/// [`OverflowPolicy::Regrow`].
pub const MAX_GROWTH_STEPS: u32 = 64;

/// What [`Octree::insert`][crate::Octree::insert] does with an object whose
/// bounds are not contained by the root.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverflowPolicy {
    /// Fail with [`OctreeError::OutsideRoot`] and leave the tree unchanged.
    #[default]
    Reject,
    /// Replace the root with a region twice its size, holding the old root as
    /// a child, until the object fits.
    ///
    /// Each doubling also raises the depth limit by one, so the size of the
    /// finest cells never changes.
    Regrow,
}

/// Root geometry, depth limit and overflow behavior of a tree.
///
/// ## Example
///
/// ```rust
/// use understory_octree::{Octree, OctreeConfig, OverflowPolicy, Vec3};
///
/// let config = OctreeConfig::new(Vec3::splat(0.0_f32), 64.0)
///     .with_max_depth(5)
///     .with_overflow(OverflowPolicy::Regrow);
/// let tree: Octree<f32, u32> = Octree::new(config).unwrap();
/// assert_eq!(tree.max_depth(), 5);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OctreeConfig<T> {
    /// Center of the root region.
    pub center: Vec3<T>,
    /// Half-size of the root region; must be finite and positive.
    pub half_size: T,
    /// Maximum number of subdivisions below the root.
    pub max_depth: u32,
    /// Behavior for objects that do not fit in the root.
    pub on_overflow: OverflowPolicy,
}

impl<T: Scalar> OctreeConfig<T> {
    /// Config for a root at `center` with the given half-size, using
    /// [`DEFAULT_MAX_DEPTH`] and [`OverflowPolicy::Reject`].
    pub fn new(center: Vec3<T>, half_size: T) -> Self {
        Self {
            center,
            half_size,
            max_depth: DEFAULT_MAX_DEPTH,
            on_overflow: OverflowPolicy::Reject,
        }
    }

    /// Set the maximum subdivision depth. Zero keeps every object at the root.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the overflow policy.
    pub fn with_overflow(mut self, on_overflow: OverflowPolicy) -> Self {
        self.on_overflow = on_overflow;
        self
    }

    /// Check that the root region is usable.
    pub fn validate(&self) -> Result<(), OctreeError> {
        if !(T::is_finite(self.half_size) && self.half_size > T::zero()) {
            return Err(OctreeError::InvalidHalfSize);
        }
        let Vec3 { x, y, z } = self.center;
        if !(T::is_finite(x) && T::is_finite(y) && T::is_finite(z)) {
            return Err(OctreeError::InvalidCenter);
        }
        Ok(())
    }

    pub(crate) fn root_bound(&self) -> NodeBound<T> {
        NodeBound::new(self.center, self.half_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = OctreeConfig::new(Vec3::splat(0.0_f32), 1.0);
        assert_eq!(c.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(c.on_overflow, OverflowPolicy::Reject);
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn rejects_unusable_half_sizes() {
        for h in [0.0_f64, -1.0, f64::NAN, f64::INFINITY] {
            let c = OctreeConfig::new(Vec3::splat(0.0), h);
            assert_eq!(c.validate(), Err(OctreeError::InvalidHalfSize), "half-size {h}");
        }
    }

    #[test]
    fn rejects_non_finite_center() {
        let c = OctreeConfig::new(Vec3::new(0.0_f32, f32::NAN, 0.0), 1.0);
        assert_eq!(c.validate(), Err(OctreeError::InvalidCenter));
    }
}
