// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A three-component vector.
///
/// Arithmetic is component-wise, except multiplication and division by a bare
/// scalar, which broadcast the scalar to every component.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec3<T> {
    /// X component.
    pub x: T,
    /// Y component.
    pub y: T,
    /// Z component.
    pub z: T,
}

impl<T> Vec3<T> {
    /// Create a vector from its components.
    #[inline(always)]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Apply `f` to every component.
    #[inline]
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Vec3<U> {
        Vec3 {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
        }
    }
}

impl<T: Copy> Vec3<T> {
    /// A vector with all components set to `v`.
    #[inline(always)]
    pub const fn splat(v: T) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// The components as `[x, y, z]`.
    #[inline]
    pub const fn to_array(self) -> [T; 3] {
        [self.x, self.y, self.z]
    }
}

impl<T> Vec3<T>
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl<T> From<[T; 3]> for Vec3<T> {
    #[inline]
    fn from([x, y, z]: [T; 3]) -> Self {
        Self { x, y, z }
    }
}

impl<T> From<Vec3<T>> for [T; 3] {
    #[inline]
    fn from(v: Vec3<T>) -> Self {
        [v.x, v.y, v.z]
    }
}

impl<T: Add<Output = T>> Add for Vec3<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Vec3<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl<T: Mul<Output = T>> Mul for Vec3<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            z: self.z * rhs.z,
        }
    }
}

impl<T: Neg<Output = T>> Neg for Vec3<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl<T: AddAssign> AddAssign for Vec3<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T: SubAssign> SubAssign for Vec3<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

// Scalar broadcast is implemented per primitive so it cannot overlap with the
// component-wise `Mul<Vec3<T>>` impl above.
macro_rules! impl_scalar_ops {
    ($($t:ty),*) => {$(
        impl Mul<$t> for Vec3<$t> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: $t) -> Self {
                Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
            }
        }

        impl Mul<Vec3<$t>> for $t {
            type Output = Vec3<$t>;

            #[inline]
            fn mul(self, rhs: Vec3<$t>) -> Vec3<$t> {
                Vec3::new(self * rhs.x, self * rhs.y, self * rhs.z)
            }
        }

        impl Div<$t> for Vec3<$t> {
            type Output = Self;

            #[inline]
            fn div(self, rhs: $t) -> Self {
                Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
            }
        }
    )*};
}

impl_scalar_ops!(f32, f64, i32, i64);

/// Axis-aligned bounding box in 3D.
///
/// Well-formed boxes have `min <= max` on every axis. Construction does not
/// enforce this; see [`Aabb3D::is_well_formed`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Aabb3D<T> {
    /// Minimum corner.
    pub min: Vec3<T>,
    /// Maximum corner.
    pub max: Vec3<T>,
}

impl<T> Aabb3D<T> {
    /// Create a new AABB from min/max corners.
    #[inline(always)]
    pub const fn new(min: Vec3<T>, max: Vec3<T>) -> Self {
        Self { min, max }
    }
}

impl<T: Copy + PartialOrd> Aabb3D<T> {
    /// Whether this AABB contains the point.
    ///
    /// Points on a face are contained.
    #[inline]
    pub fn contains_point(&self, p: Vec3<T>) -> bool {
        self.min.x <= p.x
            && p.x <= self.max.x
            && self.min.y <= p.y
            && p.y <= self.max.y
            && self.min.z <= p.z
            && p.z <= self.max.z
    }

    /// Whether `other` lies entirely inside this AABB.
    ///
    /// The test is inclusive, so a box sharing a face with this one is still
    /// contained, and every well-formed box contains itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use understory_octree::{Aabb3D, Vec3};
    ///
    /// let outer = Aabb3D::new(Vec3::splat(0.0), Vec3::splat(4.0));
    /// let flush = Aabb3D::new(Vec3::new(0.0, 1.0, 1.0), Vec3::new(2.0, 4.0, 2.0));
    /// assert!(outer.contains(&flush));
    /// assert!(outer.contains(&outer));
    ///
    /// let poking_out = Aabb3D::new(Vec3::splat(1.0), Vec3::new(2.0, 2.0, 4.5));
    /// assert!(!outer.contains(&poking_out));
    /// ```
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.min.x <= other.min.x
            && other.max.x <= self.max.x
            && self.min.y <= other.min.y
            && other.max.y <= self.max.y
            && self.min.z <= other.min.z
            && other.max.z <= self.max.z
    }

    /// Determines whether this AABB overlaps with another in any way.
    ///
    /// Faces are considered part of the box, so two AABBs that only touch
    /// overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Whether `min <= max` on every axis.
    ///
    /// Any NaN component makes the box malformed.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// The smallest AABB enclosing both boxes.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Vec3::new(
                min_t(self.min.x, other.min.x),
                min_t(self.min.y, other.min.y),
                min_t(self.min.z, other.min.z),
            ),
            max: Vec3::new(
                max_t(self.max.x, other.max.x),
                max_t(self.max.y, other.max.y),
                max_t(self.max.z, other.max.z),
            ),
        }
    }
}

impl<T: Scalar> Aabb3D<T> {
    /// Create a cube around `center` extending `half_size` along every axis.
    #[inline]
    pub fn from_center_half_size(center: Vec3<T>, half_size: T) -> Self {
        let h = Vec3::splat(half_size);
        Self {
            min: center - h,
            max: center + h,
        }
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> Vec3<T> {
        Vec3::new(
            T::mid(self.min.x, self.max.x),
            T::mid(self.min.y, self.max.y),
            T::mid(self.min.z, self.max.z),
        )
    }

    /// Extent along each axis (`max - min`).
    #[inline]
    pub fn size(&self) -> Vec3<T> {
        self.max - self.min
    }

    /// Whether every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        let Self { min, max } = *self;
        [min.x, min.y, min.z, max.x, max.y, max.z]
            .into_iter()
            .all(T::is_finite)
    }
}

/// Floating-point scalar abstraction used by bounds and octree math.
///
/// Child derivation halves extents, so only binary floating-point types
/// implement this trait; there, halving and doubling are exact.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// One half.
    fn half() -> Self;

    /// Two.
    fn two() -> Self;

    /// Whether the value is neither infinite nor NaN.
    fn is_finite(v: Self) -> bool;

    /// Midpoint between a and b.
    fn mid(a: Self, b: Self) -> Self;
}

impl Scalar for f32 {
    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline(always)]
    fn half() -> Self {
        0.5
    }

    #[inline(always)]
    fn two() -> Self {
        2.0
    }

    #[inline]
    fn is_finite(v: Self) -> bool {
        v.is_finite()
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for f64 {
    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline(always)]
    fn half() -> Self {
        0.5
    }

    #[inline(always)]
    fn two() -> Self {
        2.0
    }

    #[inline]
    fn is_finite(v: Self) -> bool {
        v.is_finite()
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

/// Objects that can be placed in an [`Octree`][crate::Octree].
///
/// The returned box must be expressed in the tree's coordinate space and must
/// stay stable while the object is indexed; the tree does not re-place objects
/// whose bounds change after insertion.
pub trait Bounded<T> {
    /// Bounding box of the object.
    fn aabb(&self) -> Aabb3D<T>;
}

impl<T: Copy> Bounded<T> for Aabb3D<T> {
    #[inline]
    fn aabb(&self) -> Self {
        *self
    }
}

/// A value paired with its bounds, such as an entity id.
impl<T: Copy, V> Bounded<T> for (V, Aabb3D<T>) {
    #[inline]
    fn aabb(&self) -> Aabb3D<T> {
        self.1
    }
}

impl<T, O: Bounded<T> + ?Sized> Bounded<T> for &O {
    #[inline]
    fn aabb(&self) -> Aabb3D<T> {
        (**self).aabb()
    }
}

impl<T, O: Bounded<T> + ?Sized> Bounded<T> for &mut O {
    #[inline]
    fn aabb(&self) -> Aabb3D<T> {
        (**self).aabb()
    }
}

impl<T, O: Bounded<T> + ?Sized> Bounded<T> for Box<O> {
    #[inline]
    fn aabb(&self) -> Aabb3D<T> {
        (**self).aabb()
    }
}

impl<T, O: Bounded<T> + ?Sized> Bounded<T> for Rc<O> {
    #[inline]
    fn aabb(&self) -> Aabb3D<T> {
        (**self).aabb()
    }
}

impl<T, O: Bounded<T> + ?Sized> Bounded<T> for Arc<O> {
    #[inline]
    fn aabb(&self) -> Aabb3D<T> {
        (**self).aabb()
    }
}

#[cfg(feature = "glam")]
mod glam_interop {
    use super::Vec3;

    impl From<glam::Vec3> for Vec3<f32> {
        #[inline]
        fn from(v: glam::Vec3) -> Self {
            Self::new(v.x, v.y, v.z)
        }
    }

    impl From<Vec3<f32>> for glam::Vec3 {
        #[inline]
        fn from(v: Vec3<f32>) -> Self {
            Self::new(v.x, v.y, v.z)
        }
    }

    impl From<glam::DVec3> for Vec3<f64> {
        #[inline]
        fn from(v: glam::DVec3) -> Self {
            Self::new(v.x, v.y, v.z)
        }
    }

    impl From<Vec3<f64>> for glam::DVec3 {
        #[inline]
        fn from(v: Vec3<f64>) -> Self {
            Self::new(v.x, v.y, v.z)
        }
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

#[cfg(test)]
mod tests {
    use super::{Aabb3D, Vec3};

    fn cube(min: f32, max: f32) -> Aabb3D<f32> {
        Aabb3D::new(Vec3::splat(min), Vec3::splat(max))
    }

    #[test]
    fn vector_arithmetic() {
        let a = Vec3::new(1.0_f32, 2.0, 3.0);
        let b = Vec3::new(4.0_f32, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(b / 2.0, Vec3::new(2.0, 2.5, 3.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn integer_vectors() {
        let a = Vec3::new(1_i32, -2, 3);
        assert_eq!(a * 3, Vec3::new(3, -6, 9));
        assert_eq!(a.dot(a), 14);
        assert_eq!(a.map(i64::from), Vec3::new(1_i64, -2, 3));
    }

    #[test]
    fn dot_and_cross_are_right_handed() {
        let x = Vec3::new(1.0_f64, 0.0, 0.0);
        let y = Vec3::new(0.0_f64, 1.0, 0.0);
        let z = Vec3::new(0.0_f64, 0.0, 1.0);
        assert_eq!(x.cross(y), z);
        assert_eq!(y.cross(z), x);
        assert_eq!(z.cross(x), y);
        assert_eq!(y.cross(x), -z);
        assert_eq!(x.dot(y), 0.0);
        assert_eq!(Vec3::new(1.0, 2.0, 3.0).dot(Vec3::new(4.0, -5.0, 6.0)), 12.0);
    }

    #[test]
    fn center_half_size_constructor() {
        let b = Aabb3D::from_center_half_size(Vec3::new(1.0_f32, -1.0, 0.0), 2.0);
        assert_eq!(b.min, Vec3::new(-1.0, -3.0, -2.0));
        assert_eq!(b.max, Vec3::new(3.0, 1.0, 2.0));
        assert_eq!(b.center(), Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(b.size(), Vec3::splat(4.0));
    }

    #[test]
    fn point_containment_is_inclusive() {
        let b = cube(0.0, 1.0);
        assert!(b.contains_point(Vec3::splat(0.0)));
        assert!(b.contains_point(Vec3::splat(1.0)));
        assert!(b.contains_point(Vec3::new(0.5, 1.0, 0.0)));
        assert!(!b.contains_point(Vec3::new(0.5, 1.0, 1.01)));
        assert!(!b.contains_point(Vec3::new(-0.01, 0.5, 0.5)));
    }

    #[test]
    fn box_containment_checks_every_axis() {
        let outer = cube(-1.0, 1.0);
        assert!(outer.contains(&outer), "containment is reflexive");
        assert!(outer.contains(&cube(-0.5, 0.5)));
        assert!(outer.contains(&Aabb3D::new(
            Vec3::new(-1.0, -0.2, 0.0),
            Vec3::new(0.0, 0.2, 1.0)
        )));
        // Only the z extent leaves the box.
        let z_out = Aabb3D::new(Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.5, 0.5, 0.5));
        assert!(!outer.contains(&z_out));
        let z_out_max = Aabb3D::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.5, 0.5, 1.5));
        assert!(!outer.contains(&z_out_max));
        assert!(!cube(-0.5, 0.5).contains(&outer));
    }

    #[test]
    fn overlap_and_union() {
        let a = cube(0.0, 1.0);
        let b = cube(1.0, 2.0);
        let c = cube(1.5, 3.0);
        assert!(a.overlaps(&b), "touching faces overlap");
        assert!(!a.overlaps(&c));
        assert_eq!(a.union(&c), cube(0.0, 3.0));
    }

    #[test]
    fn well_formed_and_finite() {
        assert!(cube(0.0, 0.0).is_well_formed());
        assert!(!cube(1.0, 0.0).is_well_formed());
        let nan = Aabb3D::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::splat(1.0));
        assert!(!nan.is_well_formed());
        assert!(!nan.is_finite());
        let inf = Aabb3D::new(Vec3::splat(0.0), Vec3::new(1.0, f32::INFINITY, 1.0));
        assert!(inf.is_well_formed());
        assert!(!inf.is_finite());
    }
}
