// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic node regions and child bound derivation.

use crate::octant::Octant;
use crate::types::{Aabb3D, Scalar, Vec3};

/// The cubic region covered by an octree node.
///
/// Nodes store a center and a uniform half-size rather than corners. Child
/// regions then follow from exact halving (see [`NodeBound::child`]).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeBound<T> {
    /// Center of the cube.
    pub center: Vec3<T>,
    /// Distance from the center to each face.
    pub half_size: T,
}

impl<T> NodeBound<T> {
    /// Create a bound from its center and half-size.
    #[inline(always)]
    pub const fn new(center: Vec3<T>, half_size: T) -> Self {
        Self { center, half_size }
    }
}

impl<T: Scalar> NodeBound<T> {
    /// The bound as an axis-aligned box (`center ± half_size`).
    #[inline]
    pub fn to_aabb(&self) -> Aabb3D<T> {
        Aabb3D::from_center_half_size(self.center, self.half_size)
    }

    /// Whether the region fully contains `aabb`, faces included.
    #[inline]
    pub fn contains(&self, aabb: &Aabb3D<T>) -> bool {
        self.to_aabb().contains(aabb)
    }

    /// Bound of the child in `octant`.
    ///
    /// This depends only on `self` and `octant`, so it can be evaluated for
    /// slots that hold no node yet.
    ///
    /// # Examples
    ///
    /// ```
    /// use understory_octree::{NodeBound, Octant, Vec3};
    ///
    /// let root = NodeBound::new(Vec3::splat(0.0_f32), 4.0);
    /// let child = root.child(Octant::POS_X | Octant::POS_Z);
    /// assert_eq!(child.center, Vec3::new(2.0, -2.0, 2.0));
    /// assert_eq!(child.half_size, 2.0);
    /// ```
    #[inline]
    pub fn child(&self, octant: Octant) -> Self {
        Self {
            center: self.center + octant.offset::<T>() * Vec3::splat(self.half_size),
            half_size: self.half_size * T::half(),
        }
    }

    /// The octant whose half-space holds `point` on every axis.
    ///
    /// Coordinates equal to the center count as positive.
    #[inline]
    pub fn octant_of(&self, point: Vec3<T>) -> Octant {
        let mut octant = Octant::empty();
        octant.set(Octant::POS_X, point.x >= self.center.x);
        octant.set(Octant::POS_Y, point.y >= self.center.y);
        octant.set(Octant::POS_Z, point.z >= self.center.z);
        octant
    }

    /// A bound twice this size that holds `self` as one of its children,
    /// extended toward `target`.
    ///
    /// Returns the enclosing bound and the octant `self` occupies in it.
    /// Deriving that octant from the result gives back `self` exactly when the
    /// coordinates are dyadic at this scale; otherwise it can be off by one
    /// rounding step, as the new center may not be representable exactly.
    pub(crate) fn grown_toward(&self, target: Vec3<T>) -> (Self, Octant) {
        // The old region sits on the side of the new one facing away from `target`.
        let slot = !self.octant_of(target);
        let offset = slot.offset::<T>() * Vec3::splat(T::two() * self.half_size);
        let grown = Self {
            center: self.center - offset,
            half_size: self.half_size * T::two(),
        };
        (grown, slot)
    }
}

impl<T: Scalar> From<NodeBound<T>> for Aabb3D<T> {
    #[inline]
    fn from(bound: NodeBound<T>) -> Self {
        bound.to_aabb()
    }
}
