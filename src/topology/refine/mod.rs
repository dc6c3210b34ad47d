//! Composite refinement operators built from the Euler operators.
//!
//! # Expected invariants
//! - The input mesh satisfies the half-edge invariants listed in
//!   [`crate::topology::mesh`].
//! - Every face is a counter-clockwise triangle if the caller wants the result
//!   to be counter-clockwise too; the operators rebuild faces with the winding of
//!   the half-edges they replace and never consult the geometric kernel.
//! - The inserted position is not checked against the split element.
//!
//! ```text
//!  split_edge                         split_face
//!
//!        n3                                c
//!       /  \                             / | \
//!      /    \                           /  |  \
//!    n1--x--n2                         /   x   \
//!      \    /                         /  /   \  \
//!       \  /                         a ---------- b
//!        n4
//! ```

use crate::debug_invariants::DebugInvariants;
use crate::geometry::kernel::Point2;
use crate::mesh_error::MeshError;
use crate::topology::handle::{EdgeId, FaceId, HalfedgeId, NodeId};
use crate::topology::mesh::Mesh;

/// One faced side of an edge about to be split.
#[derive(Clone, Copy, Debug)]
struct Wing {
    /// Half-edge after the split one in its face loop.
    next: HalfedgeId,
    /// Half-edge before the split one in its face loop.
    prev: HalfedgeId,
    /// Corner opposite the split edge.
    apex: NodeId,
}

impl<K> Mesh<K> {
    fn wing(&self, h: HalfedgeId) -> Result<Option<Wing>, MeshError> {
        if self.is_boundary(h)? {
            return Ok(None);
        }
        let prev = self.prev(h)?;
        Ok(Some(Wing {
            next: self.next(h)?,
            prev,
            apex: self.origin(prev)?,
        }))
    }

    /// Insert a node at `position` on `edge`, replacing the edge with two edges
    /// and each adjacent triangle with two triangles.
    ///
    /// Returns the new node. An interior edge gains the mesh two faces, a
    /// boundary edge one.
    pub fn split_edge(&mut self, edge: EdgeId, position: Point2) -> Result<NodeId, MeshError> {
        let (h1, h2) = (edge.he1(), edge.he2());
        let n1 = self.origin(h1).map_err(|_| MeshError::InvalidEdge(edge))?;
        let n2 = self.origin(h2)?;
        let left = self.wing(h1)?;
        let right = self.wing(h2)?;

        self.remove_edge(edge)?;
        let mid = self.add_node(position);
        let to_n1 = self.add_edge(mid, n1)?;
        let to_n2 = self.add_edge(mid, n2)?;

        if let Some(Wing { next, prev, apex }) = left {
            let to_apex = self.add_edge(mid, apex)?;
            self.add_face(to_n2, next, to_apex.pair())?;
            self.add_face(to_apex, prev, to_n1.pair())?;
        }
        if let Some(Wing { next, prev, apex }) = right {
            let to_apex = self.add_edge(mid, apex)?;
            self.add_face(to_n1, next, to_apex.pair())?;
            self.add_face(to_apex, prev, to_n2.pair())?;
        }

        log::debug!(
            "split_edge {edge}: node {mid}, {} adjacent face(s) split",
            usize::from(left.is_some()) + usize::from(right.is_some())
        );
        crate::debug_invariants!(self.validate_invariants(), "split_edge");
        Ok(mid)
    }

    /// Insert a node at `position` inside `face`, replacing the triangle with
    /// three triangles fanned around the new node.
    pub fn split_face(&mut self, face: FaceId, position: Point2) -> Result<NodeId, MeshError> {
        let h1 = self.face(face)?.halfedge();
        let h2 = self.next(h1)?;
        let h3 = self.prev(h1)?;
        let corners = [self.origin(h1)?, self.origin(h2)?, self.origin(h3)?];

        self.remove_face(face)?;
        let centre = self.add_node(position);
        let h4 = self.add_edge(centre, corners[0])?;
        let h5 = self.add_edge(centre, corners[1])?;
        let h6 = self.add_edge(centre, corners[2])?;
        let faces = [
            self.add_face(h4, h1, h5.pair())?,
            self.add_face(h5, h2, h6.pair())?,
            self.add_face(h6, h3, h4.pair())?,
        ];

        log::debug!("split_face {face}: node {centre}, faces {faces:?}");
        crate::debug_invariants!(self.validate_invariants(), "split_face");
        Ok(centre)
    }
}
