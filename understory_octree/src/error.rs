// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for tree construction and insertion.

use thiserror::Error;

/// Errors returned by [`Octree::new`][crate::Octree::new] and
/// [`Octree::insert`][crate::Octree::insert].
///
/// A failed insertion leaves the tree unchanged.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum OctreeError {
    /// The root half-size is zero, negative, infinite, or NaN.
    #[error("root half-size must be finite and strictly positive")]
    InvalidHalfSize,
    /// The root center has an infinite or NaN component.
    #[error("root center must be finite")]
    InvalidCenter,
    /// The object's bounds have `min > max` on some axis or are not finite.
    #[error("object bounds are malformed (min > max or non-finite)")]
    MalformedBounds,
    /// The object does not fit in the root and the tree rejects overflow.
    #[error("object bounds are not contained by the root bound")]
    OutsideRoot,
    /// Regrowing the root did not enclose the object within the step limit.
    #[error("root could not grow to enclose the object within {steps} doublings")]
    GrowthLimit {
        /// Number of doublings attempted.
        steps: u32,
    },
}
