// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child slot addressing.

use crate::types::{Scalar, Vec3};

bitflags::bitflags! {
    /// One of the eight child regions of a node.
    ///
    /// Each set bit selects the positive half of its axis; the empty set is the
    /// all-negative octant. The raw bits double as the child slot index, so
    /// `POS_X` is bit 0, `POS_Y` bit 1 and `POS_Z` bit 2.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Octant: u8 {
        /// Positive half of the X axis.
        const POS_X = 0b001;
        /// Positive half of the Y axis.
        const POS_Y = 0b010;
        /// Positive half of the Z axis.
        const POS_Z = 0b100;
    }
}

impl Octant {
    /// All octants in ascending slot order.
    pub const ALL: [Self; 8] = [
        Self::from_bits_retain(0),
        Self::from_bits_retain(1),
        Self::from_bits_retain(2),
        Self::from_bits_retain(3),
        Self::from_bits_retain(4),
        Self::from_bits_retain(5),
        Self::from_bits_retain(6),
        Self::from_bits_retain(7),
    ];

    /// Slot index in `0..8`.
    #[inline]
    pub const fn index(self) -> usize {
        self.bits() as usize
    }

    /// The octant for a slot index, or `None` if `index >= 8`.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_bits)
    }

    /// Per-axis offset of the child center from the parent center, in units of
    /// the parent's half-size: `-0.5` for a negative half, `+0.5` for a positive one.
    #[inline]
    pub fn offset<T: Scalar>(self) -> Vec3<T> {
        let axis = |flag: Self| {
            if self.contains(flag) {
                T::half()
            } else {
                -T::half()
            }
        };
        Vec3::new(axis(Self::POS_X), axis(Self::POS_Y), axis(Self::POS_Z))
    }
}

#[cfg(test)]
mod tests {
    use super::Octant;
    use crate::types::Vec3;

    #[test]
    fn index_round_trip_and_bits() {
        for (i, o) in Octant::ALL.into_iter().enumerate() {
            assert_eq!(o.index(), i);
            assert_eq!(Octant::from_index(i), Some(o));
        }
        assert_eq!(Octant::from_index(8), None);
        assert_eq!(Octant::from_index(300), None);
        assert_eq!(Octant::ALL[7], Octant::all());
        assert_eq!(Octant::ALL[0], Octant::empty());
        assert_eq!((Octant::POS_Y | Octant::POS_Z).index(), 6);
    }

    #[test]
    fn offsets_follow_bit_per_axis() {
        assert_eq!(Octant::empty().offset::<f32>(), Vec3::splat(-0.5));
        assert_eq!(Octant::all().offset::<f32>(), Vec3::splat(0.5));
        assert_eq!(
            Octant::POS_X.offset::<f64>(),
            Vec3::new(0.5, -0.5, -0.5),
            "bit 0 selects +X"
        );
        assert_eq!(Octant::POS_Y.offset::<f64>(), Vec3::new(-0.5, 0.5, -0.5));
        assert_eq!(Octant::POS_Z.offset::<f64>(), Vec3::new(-0.5, -0.5, 0.5));
    }
}
