// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arena storage, insertion, traversal.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use smallvec::SmallVec;

use crate::bound::NodeBound;
use crate::config::{MAX_GROWTH_STEPS, OctreeConfig, OverflowPolicy};
use crate::error::OctreeError;
use crate::octant::Octant;
use crate::types::{Aabb3D, Bounded, Scalar, Vec3};

/// Identifier for a node in an [`Octree`].
///
/// Nodes are never freed, so an id stays valid for the lifetime of the tree
/// that produced it. Ids from another tree are not detected; lookups with them
/// either return `None` or refer to an unrelated node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Node ids are 32-bit; trees with more nodes are not supported."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct CellId(u32);

impl CellId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Cell ids are 32-bit; trees with more objects are not supported."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Handle to an inserted object.
///
/// Records the node that holds the object and the object's cell in that
/// node's list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    node: NodeId,
    cell: CellId,
}

impl ObjectKey {
    /// The node whose list holds the object.
    pub const fn node(self) -> NodeId {
        self.node
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    bound: NodeBound<T>,
    /// Weak back-link; the parent owns this node, not the other way around.
    parent: Option<NodeId>,
    /// `None` for leaves. Once allocated, individual slots fill in lazily.
    children: Option<Box<[Option<NodeId>; 8]>>,
    /// Most recently inserted object at this node.
    head: Option<CellId>,
}

impl<T> Node<T> {
    fn new(bound: NodeBound<T>, parent: Option<NodeId>) -> Self {
        Self {
            bound,
            parent,
            children: None,
            head: None,
        }
    }
}

#[derive(Clone, Debug)]
struct Cell<P> {
    next: Option<CellId>,
    payload: P,
}

/// A bounded-depth octree over objects with axis-aligned bounds.
///
/// Each object is stored at the deepest node whose region fully contains its
/// bounds, subject to the depth limit. Objects that straddle the boundary
/// between two children stay at the parent. Nodes and per-node object lists
/// live in flat arenas owned by the tree and are released together when the
/// tree is dropped.
///
/// `P` is whatever handle the caller wants to store: a reference, an `Rc`, an
/// entity id with bounds attached, or the object itself. It only has to
/// implement [`Bounded`].
///
/// Insertion takes `&mut self` and traversal `&self`, so readers never observe
/// a partially applied insertion.
///
/// ## Example
///
/// ```rust
/// use understory_octree::{Aabb3D, Octant, Octree, Vec3};
///
/// let mut tree = Octree::with_bounds(Vec3::splat(0.0_f32), 4.0, 3).unwrap();
/// let key = tree
///     .insert(Aabb3D::new(Vec3::splat(0.1), Vec3::splat(0.9)))
///     .unwrap();
///
/// assert_eq!(tree.depth_of(key.node()), Some(3));
/// let first = tree.child(tree.root(), Octant::all()).unwrap();
/// assert_eq!(tree.parent_of(first), Some(tree.root()));
/// ```
pub struct Octree<T, P> {
    nodes: Vec<Node<T>>,
    cells: Vec<Cell<P>>,
    root: NodeId,
    max_depth: u32,
    on_overflow: OverflowPolicy,
}

impl<T: Debug, P> Debug for Octree<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Octree")
            .field("root", &self.nodes[self.root.idx()].bound)
            .field("nodes", &self.nodes.len())
            .field("objects", &self.cells.len())
            .field("max_depth", &self.max_depth)
            .field("on_overflow", &self.on_overflow)
            .finish_non_exhaustive()
    }
}

impl<T: Scalar, P> Octree<T, P> {
    /// Create a tree holding only a root node.
    ///
    /// Fails if the configured root region is unusable (see
    /// [`OctreeConfig::validate`]).
    pub fn new(config: OctreeConfig<T>) -> Result<Self, OctreeError> {
        config.validate()?;
        Ok(Self {
            nodes: alloc::vec![Node::new(config.root_bound(), None)],
            cells: Vec::new(),
            root: NodeId::new(0),
            max_depth: config.max_depth,
            on_overflow: config.on_overflow,
        })
    }

    /// Create a tree with the given root region and depth limit that rejects
    /// objects outside the root.
    pub fn with_bounds(center: Vec3<T>, half_size: T, max_depth: u32) -> Result<Self, OctreeError> {
        Self::new(OctreeConfig::new(center, half_size).with_max_depth(max_depth))
    }

    /// Reserve space for at least `n` more objects.
    pub fn reserve(&mut self, n: usize) {
        self.cells.reserve(n);
    }
}

impl<T: Scalar, P: Bounded<T>> Octree<T, P> {
    /// Insert an object and return a handle to it.
    ///
    /// The object descends from the root through the first child (in ascending
    /// [`Octant`] order) whose region contains its bounds, creating missing
    /// children on the way. It stops when the depth limit is reached or when no
    /// single child contains it, and is prepended to that node's list.
    ///
    /// Bounds outside the root are handled according to the tree's
    /// [`OverflowPolicy`]. On error the tree is unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, name = "octree::insert")
    )]
    pub fn insert(&mut self, payload: P) -> Result<ObjectKey, OctreeError> {
        let aabb = payload.aabb();
        if !(aabb.is_well_formed() && aabb.is_finite()) {
            return Err(OctreeError::MalformedBounds);
        }
        if !self.nodes[self.root.idx()].bound.contains(&aabb) {
            match self.on_overflow {
                OverflowPolicy::Reject => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(?aabb, "rejecting object outside the root bound");
                    return Err(OctreeError::OutsideRoot);
                }
                OverflowPolicy::Regrow => self.grow_to_contain(&aabb)?,
            }
        }
        let node = self.descend(&aabb);
        Ok(self.push_object(node, payload))
    }

    /// Insert every object from `iter`, in order.
    ///
    /// Stops at the first error; objects inserted before it stay in the tree.
    pub fn insert_all<I>(&mut self, iter: I) -> Result<Vec<ObjectKey>, OctreeError>
    where
        I: IntoIterator<Item = P>,
    {
        let iter = iter.into_iter();
        let mut keys = Vec::with_capacity(iter.size_hint().0);
        for payload in iter {
            keys.push(self.insert(payload)?);
        }
        Ok(keys)
    }
}

impl<T: Scalar, P> Octree<T, P> {
    /// Walk down from the root to the node that should hold `aabb`.
    ///
    /// `aabb` must be contained by the root.
    fn descend(&mut self, aabb: &Aabb3D<T>) -> NodeId {
        let mut node = self.root;
        let mut remaining = self.max_depth;
        while remaining > 0 {
            let Some(octant) = Octant::ALL
                .into_iter()
                .find(|&o| self.derive_child_bound(node, o).contains(aabb))
            else {
                // Straddles a child boundary: keep it here.
                break;
            };
            node = self.child_or_insert(node, octant);
            remaining -= 1;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            node = node.idx(),
            depth = self.max_depth - remaining,
            "placed object"
        );
        node
    }

    fn push_object(&mut self, node: NodeId, payload: P) -> ObjectKey {
        let cell = CellId::new(self.cells.len());
        let n = &mut self.nodes[node.idx()];
        self.cells.push(Cell {
            next: n.head,
            payload,
        });
        n.head = Some(cell);
        ObjectKey { node, cell }
    }

    fn push_node(&mut self, bound: NodeBound<T>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(bound, parent));
        id
    }

    fn child_or_insert(&mut self, parent: NodeId, octant: Octant) -> NodeId {
        if let Some(child) = self.child(parent, octant) {
            return child;
        }
        let bound = self.nodes[parent.idx()].bound.child(octant);
        let child = self.push_node(bound, Some(parent));
        self.set_child(parent, octant, child);
        child
    }

    fn set_child(&mut self, parent: NodeId, octant: Octant, child: NodeId) {
        let slots = self.nodes[parent.idx()]
            .children
            .get_or_insert_with(|| Box::new([None; 8]));
        slots[octant.index()] = Some(child);
    }

    /// Bound of a child slot of a node known to be in this tree.
    fn derive_child_bound(&self, id: NodeId, octant: Octant) -> NodeBound<T> {
        match self.child(id, octant) {
            Some(child) => self.nodes[child.idx()].bound,
            None => self.nodes[id.idx()].bound.child(octant),
        }
    }

    /// Replace the root with successively larger regions until `aabb` fits.
    ///
    /// The number of doublings is worked out before anything is allocated, so
    /// a failure leaves the tree untouched.
    fn grow_to_contain(&mut self, aabb: &Aabb3D<T>) -> Result<(), OctreeError> {
        let target = aabb.center();
        let mut bound = self.nodes[self.root.idx()].bound;
        let mut steps = 0;
        while !bound.contains(aabb) {
            if steps == MAX_GROWTH_STEPS {
                return Err(OctreeError::GrowthLimit { steps });
            }
            bound = bound.grown_toward(target).0;
            if !T::is_finite(bound.half_size) {
                return Err(OctreeError::GrowthLimit { steps });
            }
            steps += 1;
        }

        for _ in 0..steps {
            let old_root = self.root;
            let (bound, slot) = self.nodes[old_root.idx()].bound.grown_toward(target);
            let new_root = self.push_node(bound, None);
            self.set_child(new_root, slot, old_root);
            self.nodes[old_root.idx()].parent = Some(new_root);
            self.root = new_root;
            self.max_depth = self.max_depth.saturating_add(1);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                ?bound,
                old_root = old_root.idx(),
                slot = slot.index(),
                "grew octree root"
            );
        }
        Ok(())
    }

    // --- traversal ---

    /// The current root node.
    ///
    /// This only changes when [`OverflowPolicy::Regrow`] replaces it.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Depth limit measured from the current root.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// The overflow policy this tree was built with.
    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.on_overflow
    }

    /// Number of inserted objects.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no objects have been inserted.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of materialized nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Region covered by a node, or `None` for an unknown id.
    pub fn bound(&self, id: NodeId) -> Option<NodeBound<T>> {
        self.nodes.get(id.idx()).map(|n| n.bound)
    }

    /// Whether the node has no children slots allocated.
    ///
    /// A node that is not a leaf may still hold objects of its own; those are
    /// the objects that straddle its children. Unknown ids report `true`.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children_of(id).is_none()
    }

    /// The eight child slots of a node in [`Octant`] order, or `None` for a
    /// leaf or an unknown id. Unpopulated slots are `None`.
    pub fn children_of(&self, id: NodeId) -> Option<&[Option<NodeId>; 8]> {
        self.nodes.get(id.idx())?.children.as_deref()
    }

    /// The child in `octant`, if it has been created.
    pub fn child(&self, id: NodeId, octant: Octant) -> Option<NodeId> {
        self.children_of(id)?[octant.index()]
    }

    /// Region of the child slot `octant` of node `id`.
    ///
    /// This is available whether or not the child exists yet and gives the
    /// same answer before and after it is created. `None` only for unknown ids.
    ///
    /// A materialized child reports its stored bound, which is authoritative.
    /// It matches [`NodeBound::child`] of the parent's bound, except in a root
    /// grown by [`OverflowPolicy::Regrow`] around coordinates that are not exact
    /// binary fractions: there the old root keeps its original bound and the
    /// derivation from the new root may differ from it by a rounding step.
    pub fn child_bound(&self, id: NodeId, octant: Octant) -> Option<NodeBound<T>> {
        self.nodes.get(id.idx())?;
        Some(self.derive_child_bound(id, octant))
    }

    /// Parent of a node, or `None` for the root and unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.idx())?.parent
    }

    /// Number of edges between the current root and `id`.
    pub fn depth_of(&self, id: NodeId) -> Option<u32> {
        self.nodes.get(id.idx())?;
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            depth += 1;
            current = parent;
        }
        Some(depth)
    }

    /// Handle to the most recently inserted object stored at `id`.
    pub fn head(&self, id: NodeId) -> Option<ObjectKey> {
        let cell = self.nodes.get(id.idx())?.head?;
        Some(ObjectKey { node: id, cell })
    }

    /// Iterate over the objects stored at `id`, most recently inserted first.
    ///
    /// Objects held by descendants are not included.
    pub fn objects(&self, id: NodeId) -> Objects<'_, T, P> {
        Objects {
            tree: self,
            node: id,
            next: self.nodes.get(id.idx()).and_then(|n| n.head),
        }
    }

    /// The object behind a handle.
    pub fn get(&self, key: ObjectKey) -> Option<&P> {
        self.cells.get(key.cell.idx()).map(|c| &c.payload)
    }

    /// Iterate over all nodes in pre-order, with children visited in ascending
    /// [`Octant`] order. Yields each node with its depth below the root.
    pub fn depth_first(&self) -> DepthFirst<'_, T, P> {
        let mut stack = SmallVec::new();
        stack.push((self.root, 0));
        DepthFirst { tree: self, stack }
    }
}

/// Iterator over the objects stored at one node.
///
/// Created by [`Octree::objects`].
pub struct Objects<'a, T, P> {
    tree: &'a Octree<T, P>,
    node: NodeId,
    next: Option<CellId>,
}

impl<T, P> Debug for Objects<'_, T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Objects")
            .field("node", &self.node)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl<'a, T, P> Iterator for Objects<'a, T, P> {
    type Item = (ObjectKey, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.next?;
        let c = &self.tree.cells[cell.idx()];
        self.next = c.next;
        Some((
            ObjectKey {
                node: self.node,
                cell,
            },
            &c.payload,
        ))
    }
}

/// Pre-order node iterator.
///
/// Created by [`Octree::depth_first`].
pub struct DepthFirst<'a, T, P> {
    tree: &'a Octree<T, P>,
    stack: SmallVec<[(NodeId, u32); 32]>,
}

impl<T, P> Debug for DepthFirst<'_, T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DepthFirst")
            .field("pending", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl<T, P> Iterator for DepthFirst<'_, T, P> {
    type Item = (NodeId, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        if let Some(children) = &self.tree.nodes[id.idx()].children {
            // Reverse so the lowest octant is popped first.
            for child in children.iter().rev().flatten() {
                self.stack.push((*child, depth + 1));
            }
        }
        Some((id, depth))
    }
}
