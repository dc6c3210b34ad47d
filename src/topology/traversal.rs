//! Local iterators: incidence cycles, face loops and boundary loops.
//!
//! Iterators borrow the mesh immutably. They stop early instead of failing if
//! they meet a dangling handle, and never yield more half-edges than the mesh
//! holds; use [`crate::topology::validation`] to diagnose a corrupted mesh.

use crate::geometry::kernel::Point2;
use crate::mesh_error::MeshError;
use crate::topology::handle::{FaceId, HalfedgeId, NodeId};
use crate::topology::mesh::Mesh;

/// Half-edges leaving a node, in incidence-cycle order `h -> next(pair(h))`.
pub struct OutgoingHalfedges<'a, K> {
    mesh: &'a Mesh<K>,
    start: Option<HalfedgeId>,
    current: Option<HalfedgeId>,
    remaining: usize,
}

impl<K> Iterator for OutgoingHalfedges<'_, K> {
    type Item = HalfedgeId;

    fn next(&mut self) -> Option<HalfedgeId> {
        let current = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;
        self.current = self
            .mesh
            .next(current.pair())
            .ok()
            .filter(|&h| Some(h) != self.start);
        Some(current)
    }
}

/// Half-edges of a `next` loop, starting at a given half-edge.
pub struct LoopHalfedges<'a, K> {
    mesh: &'a Mesh<K>,
    start: HalfedgeId,
    current: Option<HalfedgeId>,
    remaining: usize,
}

impl<K> Iterator for LoopHalfedges<'_, K> {
    type Item = HalfedgeId;

    fn next(&mut self) -> Option<HalfedgeId> {
        let current = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;
        self.current = self
            .mesh
            .next(current)
            .ok()
            .filter(|&h| h != self.start);
        Some(current)
    }
}

impl<K> Mesh<K> {
    /// Outgoing half-edges of `n`; empty for an isolated node.
    pub fn outgoing_halfedges(&self, n: NodeId) -> Result<OutgoingHalfedges<'_, K>, MeshError> {
        let start = self.node(n)?.halfedge;
        Ok(OutgoingHalfedges {
            mesh: self,
            start,
            current: start,
            remaining: self.halfedge_count(),
        })
    }

    /// Half-edges arriving at `n`.
    pub fn incoming_halfedges(
        &self,
        n: NodeId,
    ) -> Result<impl Iterator<Item = HalfedgeId> + '_, MeshError> {
        Ok(self.outgoing_halfedges(n)?.map(HalfedgeId::pair))
    }

    /// Number of edges incident to `n`.
    pub fn degree(&self, n: NodeId) -> Result<usize, MeshError> {
        Ok(self.outgoing_halfedges(n)?.count())
    }

    /// Nodes sharing an edge with `n`, in incidence-cycle order.
    pub fn neighbors(&self, n: NodeId) -> Result<Vec<NodeId>, MeshError> {
        self.outgoing_halfedges(n)?
            .map(|h| self.target(h))
            .collect()
    }

    /// Faces around `n`, each listed once per incident corner.
    pub fn incident_faces(&self, n: NodeId) -> Result<Vec<FaceId>, MeshError> {
        let mut faces = Vec::new();
        for h in self.outgoing_halfedges(n)? {
            if let Some(f) = self.face_of(h)? {
                faces.push(f);
            }
        }
        Ok(faces)
    }

    /// True when `n` touches a boundary half-edge. Isolated nodes are not on
    /// the boundary.
    pub fn is_on_boundary(&self, n: NodeId) -> Result<bool, MeshError> {
        for h in self.outgoing_halfedges(n)? {
            if self.is_boundary(h)? || self.is_boundary(h.pair())? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The `next` loop through `h`, starting at `h`.
    pub fn loop_halfedges(&self, h: HalfedgeId) -> Result<LoopHalfedges<'_, K>, MeshError> {
        self.halfedge(h)?;
        Ok(LoopHalfedges {
            mesh: self,
            start: h,
            current: Some(h),
            remaining: self.halfedge_count(),
        })
    }

    /// The three half-edges of `f`, starting with its representative.
    pub fn face_halfedges(&self, f: FaceId) -> Result<[HalfedgeId; 3], MeshError> {
        let h1 = self.face(f)?.halfedge();
        let h2 = self.next(h1)?;
        let h3 = self.next(h2)?;
        Ok([h1, h2, h3])
    }

    /// Corner nodes of `f` in loop order.
    pub fn face_nodes(&self, f: FaceId) -> Result<[NodeId; 3], MeshError> {
        let [h1, h2, h3] = self.face_halfedges(f)?;
        Ok([self.origin(h1)?, self.origin(h2)?, self.origin(h3)?])
    }

    /// Corner positions of `f` in loop order.
    pub fn face_positions(&self, f: FaceId) -> Result<[Point2; 3], MeshError> {
        let [a, b, c] = self.face_nodes(f)?;
        Ok([self.position(a)?, self.position(b)?, self.position(c)?])
    }

    /// Faces sharing an edge with `f`.
    pub fn face_neighbors(&self, f: FaceId) -> Result<Vec<FaceId>, MeshError> {
        let mut out = Vec::with_capacity(3);
        for h in self.face_halfedges(f)? {
            if let Some(g) = self.face_of(h.pair())? {
                out.push(g);
            }
        }
        Ok(out)
    }

    /// Centroid of `f`.
    pub fn face_centroid(&self, f: FaceId) -> Result<Point2, MeshError> {
        let [a, b, c] = self.face_positions(f)?;
        Ok((a + b + c) / 3.0)
    }
}
