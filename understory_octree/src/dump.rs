// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bracketed text rendering of a tree, for logs and debugging.

use core::fmt::{self, Display, Formatter};

use crate::octant::Octant;
use crate::tree::{NodeId, Octree};
use crate::types::{Aabb3D, Scalar};

const INDENT: &str = "    ";

/// Display adapter created by [`Octree::display_with`].
pub struct DisplayTree<'a, T, P, F> {
    tree: &'a Octree<T, P>,
    label: F,
}

impl<T, P, F> fmt::Debug for DisplayTree<'_, T, P, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayTree").finish_non_exhaustive()
    }
}

impl<T: Scalar, P> Octree<T, P> {
    /// Render the tree as nested bracketed text.
    ///
    /// A leaf prints as `[ a b ]`, listing its objects most recent first.
    /// Any other node prints as a `{ ... }` block: its own objects come first,
    /// followed by one line per octant with the slot index, the slot's box as
    /// `(min x, min y, min z, max x, max y, max z)`, and the child's rendering
    /// when the child exists. `label` writes a single object.
    ///
    /// ```rust
    /// use understory_octree::{Aabb3D, Octree, Vec3};
    ///
    /// let mut tree = Octree::with_bounds(Vec3::splat(0.0_f32), 2.0, 0).unwrap();
    /// tree.insert(("a", Aabb3D::new(Vec3::splat(0.0), Vec3::splat(1.0)))).unwrap();
    /// tree.insert(("b", Aabb3D::new(Vec3::splat(-1.0), Vec3::splat(0.0)))).unwrap();
    ///
    /// let text = tree.display_with(|(name, _), f| f.write_str(name)).to_string();
    /// assert_eq!(text, "[ b a ]");
    /// ```
    pub fn display_with<F>(&self, label: F) -> DisplayTree<'_, T, P, F>
    where
        F: Fn(&P, &mut Formatter<'_>) -> fmt::Result,
    {
        DisplayTree { tree: self, label }
    }
}

impl<T, P, F> Display for DisplayTree<'_, T, P, F>
where
    T: Scalar + Display,
    F: Fn(&P, &mut Formatter<'_>) -> fmt::Result,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.tree.root(), 0)
    }
}

impl<T, P, F> DisplayTree<'_, T, P, F>
where
    T: Scalar + Display,
    F: Fn(&P, &mut Formatter<'_>) -> fmt::Result,
{
    fn write_node(&self, f: &mut Formatter<'_>, id: NodeId, level: usize) -> fmt::Result {
        if self.tree.is_leaf(id) {
            return self.write_objects(f, id);
        }
        if level > 0 {
            writeln!(f)?;
        }
        write_indent(f, level)?;
        f.write_str("{\n")?;
        if self.tree.head(id).is_some() {
            write_indent(f, level + 1)?;
            self.write_objects(f, id)?;
            writeln!(f)?;
        }
        for octant in Octant::ALL {
            write_indent(f, level + 1)?;
            write!(f, "{} ", octant.index())?;
            if let Some(bound) = self.tree.child_bound(id, octant) {
                write_aabb(f, &bound.to_aabb())?;
            }
            if let Some(child) = self.tree.child(id, octant) {
                if self.tree.is_leaf(child) {
                    f.write_str(" ")?;
                }
                self.write_node(f, child, level + 1)?;
            }
            writeln!(f)?;
        }
        write_indent(f, level)?;
        f.write_str("}")
    }

    fn write_objects(&self, f: &mut Formatter<'_>, id: NodeId) -> fmt::Result {
        f.write_str("[ ")?;
        for (_, object) in self.tree.objects(id) {
            (self.label)(object, f)?;
            f.write_str(" ")?;
        }
        f.write_str("]")
    }
}

fn write_indent(f: &mut Formatter<'_>, level: usize) -> fmt::Result {
    for _ in 0..level {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_aabb<T: Display>(f: &mut Formatter<'_>, aabb: &Aabb3D<T>) -> fmt::Result {
    let Aabb3D { min, max } = aabb;
    write!(
        f,
        "({}, {}, {}, {}, {}, {})",
        min.x, min.y, min.z, max.x, max.y, max.z
    )
}
