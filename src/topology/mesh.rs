//! The half-edge mesh and its Euler operators.
//!
//! [`Mesh`] owns three `slotmap` arenas (nodes, edges, faces). Half-edges live
//! inside their edge record, so allocating or freeing an edge always allocates
//! or frees both twins together.
//!
//! # Invariants
//! After every successful mutator, for every live half-edge `h`:
//! - `pair(pair(h)) == h` (structural, see [`HalfedgeId::pair`]);
//! - `next(prev(h)) == h` and `prev(next(h)) == h`;
//! - `origin(next(h)) == origin(pair(h))`;
//! - following `h -> next(pair(h))` from a node's representative half-edge
//!   visits every half-edge leaving that node and returns to the start;
//! - a face's half-edge loop has length three and every member reports the face.
//!
//! The adjacency splices live in [`super::adjacency`]; split operators in
//! [`super::refine`]; point location in [`crate::geometry::locate`].

use crate::debug_invariants::DebugInvariants;
use crate::geometry::bbox::BoundingBox;
use crate::geometry::kernel::{ExactKernel, Point2};
use crate::mesh_error::{AddFaceReason, MeshError};
use crate::topology::cache::InvalidateCache;
use crate::topology::handle::{EdgeId, FaceId, HalfedgeId, NodeId};
use crate::topology::validation::{ValidationOptions, validate_topology};
use itertools::Itertools;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::marker::PhantomData;

/// A mesh vertex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) position: Point2,
    pub(crate) halfedge: Option<HalfedgeId>,
}

impl Node {
    #[inline]
    pub fn position(&self) -> Point2 {
        self.position
    }

    /// Representative outgoing half-edge; `None` when the node is isolated.
    #[inline]
    pub fn halfedge(&self) -> Option<HalfedgeId> {
        self.halfedge
    }

    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.halfedge.is_none()
    }
}

/// One directed side of an edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Halfedge {
    pub(crate) origin: NodeId,
    pub(crate) next: HalfedgeId,
    pub(crate) prev: HalfedgeId,
    pub(crate) face: Option<FaceId>,
}

impl Halfedge {
    /// A fresh half-edge whose loop is the 2-cycle with its twin.
    fn new(origin: NodeId, twin: HalfedgeId) -> Self {
        Self {
            origin,
            next: twin,
            prev: twin,
            face: None,
        }
    }

    #[inline]
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    #[inline]
    pub fn next(&self) -> HalfedgeId {
        self.next
    }

    #[inline]
    pub fn prev(&self) -> HalfedgeId {
        self.prev
    }

    /// Incident face; `None` on the mesh boundary.
    #[inline]
    pub fn face(&self) -> Option<FaceId> {
        self.face
    }

    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.face.is_none()
    }
}

/// An undirected edge: its two twin half-edges.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub(crate) halfedges: [Halfedge; 2],
}

impl Edge {
    #[inline]
    pub fn he1(&self) -> &Halfedge {
        &self.halfedges[0]
    }

    #[inline]
    pub fn he2(&self) -> &Halfedge {
        &self.halfedges[1]
    }

    /// True when at least one side has no face.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.halfedges.iter().any(Halfedge::is_boundary)
    }
}

/// A triangular face.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub(crate) halfedge: HalfedgeId,
}

impl Face {
    #[inline]
    pub fn halfedge(&self) -> HalfedgeId {
        self.halfedge
    }
}

/// Planar triangulated mesh over a half-edge data structure.
///
/// `K` selects the orientation kernel used by point location and by
/// orientation validation; topology operators do not depend on it.
///
/// # Example
/// ```rust
/// use mesh_hds::prelude::*;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_node(Point2::new(0.0, 0.0));
/// let b = mesh.add_node(Point2::new(1.0, 0.0));
/// let c = mesh.add_node(Point2::new(0.0, 1.0));
/// let ab = mesh.add_edge(a, b)?;
/// let bc = mesh.add_edge(b, c)?;
/// let ca = mesh.add_edge(c, a)?;
/// let face = mesh.add_face(ab, bc, ca)?;
///
/// assert_eq!(mesh.locate(Point2::new(0.25, 0.25), None)?, PointLocation::InFace(face));
/// # Ok::<(), mesh_hds::mesh_error::MeshError>(())
/// ```
///
/// # Snapshots
/// `Mesh` serializes its three arenas, slot versions included, so handles
/// stay valid across a round trip. Deserializing re-runs the topology checks
/// of [`validate_topology`]; a snapshot whose records do not form a valid
/// half-edge graph is rejected instead of loaded.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "", try_from = "MeshSnapshot")]
pub struct Mesh<K = ExactKernel> {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) edges: SlotMap<EdgeId, Edge>,
    pub(crate) faces: SlotMap<FaceId, Face>,
    #[serde(skip)]
    pub(crate) bbox: OnceCell<BoundingBox>,
    #[serde(skip)]
    _kernel: PhantomData<fn() -> K>,
}

/// Raw arenas as read from a snapshot, before validation.
#[derive(Deserialize)]
struct MeshSnapshot {
    nodes: SlotMap<NodeId, Node>,
    edges: SlotMap<EdgeId, Edge>,
    faces: SlotMap<FaceId, Face>,
}

impl<K> TryFrom<MeshSnapshot> for Mesh<K> {
    type Error = MeshError;

    fn try_from(snapshot: MeshSnapshot) -> Result<Self, MeshError> {
        let mesh = Self {
            nodes: snapshot.nodes,
            edges: snapshot.edges,
            faces: snapshot.faces,
            ..Self::default()
        };
        validate_topology(&mesh, ValidationOptions::default())?;
        Ok(mesh)
    }
}

impl<K> Default for Mesh<K> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            bbox: OnceCell::new(),
            _kernel: PhantomData,
        }
    }
}

impl Mesh<ExactKernel> {
    /// Empty mesh using the exact kernel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty mesh with preallocated arenas.
    pub fn with_capacity(nodes: usize, edges: usize, faces: usize) -> Self {
        Self::with_kernel_and_capacity(nodes, edges, faces)
    }
}

impl<K> InvalidateCache for Mesh<K> {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.bbox.take();
    }
}

impl<K> Mesh<K> {
    /// Empty mesh for an explicit kernel, e.g. `Mesh::<FloatKernel>::with_kernel()`.
    pub fn with_kernel() -> Self {
        Self::default()
    }

    pub fn with_kernel_and_capacity(nodes: usize, edges: usize, faces: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(nodes),
            edges: SlotMap::with_capacity_and_key(edges),
            faces: SlotMap::with_capacity_and_key(faces),
            ..Self::default()
        }
    }

    // ---------------------------------------------------------------------
    // Counts and iteration
    // ---------------------------------------------------------------------

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn halfedge_count(&self) -> usize {
        2 * self.edges.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Live nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys()
    }

    /// Live edges in slot order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys()
    }

    /// Live half-edges, `he1` before `he2` for each edge.
    pub fn halfedges(&self) -> impl Iterator<Item = HalfedgeId> + '_ {
        self.edges.keys().flat_map(EdgeId::halfedges)
    }

    /// Live faces in slot order.
    pub fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys()
    }

    // ---------------------------------------------------------------------
    // Checked record access
    // ---------------------------------------------------------------------

    #[inline]
    pub fn node(&self, n: NodeId) -> Result<&Node, MeshError> {
        self.nodes.get(n).ok_or(MeshError::InvalidNode(n))
    }

    #[inline]
    pub fn edge(&self, e: EdgeId) -> Result<&Edge, MeshError> {
        self.edges.get(e).ok_or(MeshError::InvalidEdge(e))
    }

    #[inline]
    pub fn halfedge(&self, h: HalfedgeId) -> Result<&Halfedge, MeshError> {
        self.edges
            .get(h.edge())
            .map(|edge| &edge.halfedges[h.side().index()])
            .ok_or(MeshError::InvalidHalfedge(h))
    }

    #[inline]
    pub fn face(&self, f: FaceId) -> Result<&Face, MeshError> {
        self.faces.get(f).ok_or(MeshError::InvalidFace(f))
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, n: NodeId) -> Result<&mut Node, MeshError> {
        self.nodes.get_mut(n).ok_or(MeshError::InvalidNode(n))
    }

    #[inline]
    pub(crate) fn halfedge_mut(&mut self, h: HalfedgeId) -> Result<&mut Halfedge, MeshError> {
        self.edges
            .get_mut(h.edge())
            .map(|edge| &mut edge.halfedges[h.side().index()])
            .ok_or(MeshError::InvalidHalfedge(h))
    }

    pub fn contains_node(&self, n: NodeId) -> bool {
        self.nodes.contains_key(n)
    }

    pub fn contains_edge(&self, e: EdgeId) -> bool {
        self.edges.contains_key(e)
    }

    pub fn contains_halfedge(&self, h: HalfedgeId) -> bool {
        self.edges.contains_key(h.edge())
    }

    pub fn contains_face(&self, f: FaceId) -> bool {
        self.faces.contains_key(f)
    }

    // ---------------------------------------------------------------------
    // Navigation shorthands
    // ---------------------------------------------------------------------

    #[inline]
    pub fn position(&self, n: NodeId) -> Result<Point2, MeshError> {
        Ok(self.node(n)?.position)
    }

    #[inline]
    pub fn next(&self, h: HalfedgeId) -> Result<HalfedgeId, MeshError> {
        Ok(self.halfedge(h)?.next)
    }

    #[inline]
    pub fn prev(&self, h: HalfedgeId) -> Result<HalfedgeId, MeshError> {
        Ok(self.halfedge(h)?.prev)
    }

    #[inline]
    pub fn origin(&self, h: HalfedgeId) -> Result<NodeId, MeshError> {
        Ok(self.halfedge(h)?.origin)
    }

    /// Node the half-edge points to.
    #[inline]
    pub fn target(&self, h: HalfedgeId) -> Result<NodeId, MeshError> {
        self.origin(h.pair())
    }

    #[inline]
    pub fn face_of(&self, h: HalfedgeId) -> Result<Option<FaceId>, MeshError> {
        Ok(self.halfedge(h)?.face)
    }

    #[inline]
    pub fn is_boundary(&self, h: HalfedgeId) -> Result<bool, MeshError> {
        Ok(self.halfedge(h)?.is_boundary())
    }

    #[inline]
    pub fn is_boundary_edge(&self, e: EdgeId) -> Result<bool, MeshError> {
        Ok(self.edge(e)?.is_boundary())
    }

    #[inline]
    pub fn is_isolated(&self, n: NodeId) -> Result<bool, MeshError> {
        Ok(self.node(n)?.is_isolated())
    }

    /// Positions of the half-edge's origin and target.
    pub fn segment(&self, h: HalfedgeId) -> Result<(Point2, Point2), MeshError> {
        Ok((
            self.position(self.origin(h)?)?,
            self.position(self.target(h)?)?,
        ))
    }

    /// Set `from.next = to` and `to.prev = from`.
    #[inline]
    pub(crate) fn link(&mut self, from: HalfedgeId, to: HalfedgeId) -> Result<(), MeshError> {
        self.halfedge_mut(from)?.next = to;
        self.halfedge_mut(to)?.prev = from;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Geometric queries
    // ---------------------------------------------------------------------

    /// Smallest axis-aligned box containing every node; inverse when empty.
    ///
    /// Cached until the next node insertion or removal.
    pub fn bounding_box(&self) -> BoundingBox {
        *self
            .bbox
            .get_or_init(|| self.nodes.iter().map(|(_, node)| node.position).collect())
    }

    /// First boundary half-edge in edge order (`he1` before `he2`), or `None`
    /// when every half-edge borders a face.
    pub fn boundary_halfedge(&self) -> Option<HalfedgeId> {
        self.edges.iter().find_map(|(e, edge)| {
            if edge.he1().is_boundary() {
                Some(e.he1())
            } else if edge.he2().is_boundary() {
                Some(e.he2())
            } else {
                None
            }
        })
    }

    // ---------------------------------------------------------------------
    // Euler operators
    // ---------------------------------------------------------------------

    /// Insert an isolated node at `position`.
    pub fn add_node(&mut self, position: Point2) -> NodeId {
        let n = self.nodes.insert(Node {
            position,
            halfedge: None,
        });
        self.invalidate_cache();
        log::trace!("add_node {n} at ({}, {})", position.x, position.y);
        n
    }

    /// Remove `n` together with every incident edge (and the faces those
    /// edges bound).
    pub fn remove_node(&mut self, n: NodeId) -> Result<(), MeshError> {
        let mut removed = 0usize;
        loop {
            let representative = self.node(n)?.halfedge;
            let Some(h) = representative else { break };
            self.remove_edge(h.edge())?;
            removed += 1;
        }
        self.nodes.remove(n);
        self.invalidate_cache();
        log::debug!("remove_node {n}: removed {removed} incident edges");
        crate::debug_invariants!(self.validate_invariants(), "remove_node");
        Ok(())
    }

    /// Connect `n1` and `n2` with a new edge and return the half-edge leaving `n1`.
    ///
    /// Fails with [`MeshError::SelfLoop`] when `n1 == n2` and with
    /// [`MeshError::AttachToCompleteMesh`] when either node is enclosed by faces.
    /// On failure the mesh is left exactly as it was.
    pub fn add_edge(&mut self, n1: NodeId, n2: NodeId) -> Result<HalfedgeId, MeshError> {
        self.node(n1)?;
        self.node(n2)?;
        if n1 == n2 {
            return Err(MeshError::SelfLoop(n1));
        }

        let e = self.edges.insert_with_key(|e| Edge {
            halfedges: [Halfedge::new(n1, e.he2()), Halfedge::new(n2, e.he1())],
        });
        let (he1, he2) = (e.he1(), e.he2());

        if let Err(err) = self.attach(he1, n1) {
            self.edges.remove(e);
            return Err(attach_error(err));
        }
        if let Err(err) = self.attach(he2, n2) {
            self.detach(he1)?;
            self.edges.remove(e);
            return Err(attach_error(err));
        }

        log::debug!("add_edge {n1} -> {n2}: edge {e}");
        crate::debug_invariants!(self.validate_invariants(), "add_edge");
        Ok(he1)
    }

    /// Remove an edge, first removing the faces on either side of it.
    pub fn remove_edge(&mut self, e: EdgeId) -> Result<(), MeshError> {
        self.edge(e)?;
        for h in e.halfedges() {
            let face = self.halfedge(h)?.face;
            if let Some(f) = face {
                self.remove_face(f)?;
            }
        }
        self.detach(e.he1())?;
        self.detach(e.he2())?;
        self.edges.remove(e);
        log::debug!("remove_edge {e}");
        crate::debug_invariants!(self.validate_invariants(), "remove_edge");
        Ok(())
    }

    /// Create a triangular face bounded by the chain `h1 -> h2 -> h3`.
    ///
    /// All three half-edges must be boundary half-edges and each must end where
    /// the next one starts. The incidence cycles at the three corners are
    /// re-spliced so the half-edges become `next`-adjacent; the face record then
    /// points at `h1`.
    pub fn add_face(
        &mut self,
        h1: HalfedgeId,
        h2: HalfedgeId,
        h3: HalfedgeId,
    ) -> Result<FaceId, MeshError> {
        let loop_ = [h1, h2, h3];
        for h in loop_ {
            if !self.is_boundary(h)? {
                return Err(MeshError::add_face(AddFaceReason::NotFree));
            }
        }
        let chained = self.target(h1)? == self.origin(h2)?
            && self.target(h2)? == self.origin(h3)?
            && self.target(h3)? == self.origin(h1)?;
        if !chained {
            return Err(MeshError::add_face(AddFaceReason::NotAChain));
        }

        for (incoming, outgoing) in [(h1, h2), (h2, h3), (h3, h1)] {
            self.merge_adjacent(incoming, outgoing).map_err(|err| match err {
                MeshError::Topology(_) => MeshError::add_face(AddFaceReason::NonManifold),
                other => other,
            })?;
        }

        let f = self.faces.insert(Face { halfedge: h1 });
        for h in loop_ {
            self.halfedge_mut(h)?.face = Some(f);
        }
        log::debug!("add_face {f}: {h1} -> {h2} -> {h3}");
        crate::debug_invariants!(self.validate_invariants(), "add_face");
        Ok(f)
    }

    /// Remove a face. Its half-edges become boundary; adjacency is untouched.
    pub fn remove_face(&mut self, f: FaceId) -> Result<(), MeshError> {
        let h = self.face(f)?.halfedge;
        let loop_ = [h, self.next(h)?, self.prev(h)?];
        for h in loop_ {
            self.halfedge_mut(h)?.face = None;
        }
        self.faces.remove(f);
        log::debug!("remove_face {f}");
        crate::debug_invariants!(self.validate_invariants(), "remove_face");
        Ok(())
    }

    /// The half-edge `from -> to`, if the two nodes share an edge.
    pub fn find_halfedge(&self, from: NodeId, to: NodeId) -> Result<Option<HalfedgeId>, MeshError> {
        for h in self.outgoing_halfedges(from)? {
            if self.target(h)? == to {
                return Ok(Some(h));
            }
        }
        Ok(None)
    }

    /// Add the triangle `a, b, c`, reusing existing boundary half-edges and
    /// creating missing edges.
    ///
    /// Edges created here are removed again if the face cannot be added.
    pub fn add_triangle(&mut self, a: NodeId, b: NodeId, c: NodeId) -> Result<FaceId, MeshError> {
        let mut created = Vec::with_capacity(3);
        let mut sides = [None; 3];
        let mut outcome = Ok(());
        for (slot, (from, to)) in sides
            .iter_mut()
            .zip([a, b, c].into_iter().circular_tuple_windows())
        {
            let found = match self.find_halfedge(from, to) {
                Ok(Some(h)) => Ok(h),
                Ok(None) => self.add_edge(from, to).inspect(|h| created.push(h.edge())),
                Err(err) => Err(err),
            };
            match found {
                Ok(h) => *slot = Some(h),
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }

        let result = match (outcome, sides) {
            (Ok(()), [Some(h1), Some(h2), Some(h3)]) => self.add_face(h1, h2, h3),
            (Err(err), _) => Err(err),
            (Ok(()), _) => Err(MeshError::InvariantViolation(
                "add_triangle: missing side half-edge".into(),
            )),
        };
        if result.is_err() {
            for e in created.into_iter().rev() {
                self.remove_edge(e)?;
            }
        }
        result
    }
}

fn attach_error(err: MeshError) -> MeshError {
    match err {
        MeshError::Topology(topology) => MeshError::AttachToCompleteMesh(topology),
        other => other,
    }
}
