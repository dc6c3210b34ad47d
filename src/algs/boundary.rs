//! Boundary classification utilities.
//!
//! A half-edge without a face is on the boundary. Boundary half-edges link to
//! each other through `next`, so every boundary component is one closed loop.

use std::collections::HashSet;

use crate::mesh_error::MeshError;
use crate::topology::handle::{EdgeId, HalfedgeId, NodeId};
use crate::topology::mesh::Mesh;

/// Classified node sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundaryClassification {
    /// Nodes touching at least one boundary half-edge.
    pub boundary: Vec<NodeId>,
    /// Nodes whose every incident half-edge borders a face.
    pub interior: Vec<NodeId>,
    /// Nodes without edges.
    pub isolated: Vec<NodeId>,
}

/// Classify every node of `mesh`. Each list is sorted.
pub fn classify_boundary_nodes<K>(mesh: &Mesh<K>) -> Result<BoundaryClassification, MeshError> {
    let mut out = BoundaryClassification::default();
    for n in mesh.nodes() {
        if mesh.is_isolated(n)? {
            out.isolated.push(n);
        } else if mesh.is_on_boundary(n)? {
            out.boundary.push(n);
        } else {
            out.interior.push(n);
        }
    }
    out.boundary.sort_unstable();
    out.interior.sort_unstable();
    out.isolated.sort_unstable();
    Ok(out)
}

/// Edges with at least one boundary half-edge, in edge order.
pub fn boundary_edges<K>(mesh: &Mesh<K>) -> Result<Vec<EdgeId>, MeshError> {
    let mut out = Vec::new();
    for e in mesh.edges() {
        if mesh.is_boundary_edge(e)? {
            out.push(e);
        }
    }
    Ok(out)
}

/// The boundary loop through the boundary half-edge `h`, starting at `h`.
pub fn boundary_loop<K>(mesh: &Mesh<K>, h: HalfedgeId) -> Result<Vec<HalfedgeId>, MeshError> {
    if !mesh.is_boundary(h)? {
        return Err(MeshError::InvalidInput(format!(
            "half-edge {h} borders a face"
        )));
    }
    let mut out = Vec::new();
    for g in mesh.loop_halfedges(h)? {
        if !mesh.is_boundary(g)? {
            return Err(MeshError::InvariantViolation(format!(
                "boundary loop through {h} reaches faced half-edge {g}"
            )));
        }
        out.push(g);
    }
    Ok(out)
}

/// Every boundary loop, each starting at its first half-edge in edge order.
///
/// A lone edge contributes one loop of length two; an isolated node none.
pub fn boundary_loops<K>(mesh: &Mesh<K>) -> Result<Vec<Vec<HalfedgeId>>, MeshError> {
    let mut seen: HashSet<HalfedgeId> = HashSet::new();
    let mut loops = Vec::new();
    for h in mesh.halfedges() {
        if seen.contains(&h) || !mesh.is_boundary(h)? {
            continue;
        }
        let ring = boundary_loop(mesh, h)?;
        seen.extend(ring.iter().copied());
        loops.push(ring);
    }
    Ok(loops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::meshgen::structured_rectangle;
    use crate::geometry::kernel::Point2;

    #[test]
    fn rectangle_has_one_boundary_loop() {
        let mesh = structured_rectangle(3, 2, Point2::ZERO, Point2::new(3.0, 2.0)).unwrap();
        let loops = boundary_loops(&mesh).unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 2 * (3 + 2));
        assert_eq!(boundary_edges(&mesh).unwrap().len(), 10);

        let classes = classify_boundary_nodes(&mesh).unwrap();
        assert_eq!(classes.boundary.len(), 10);
        assert_eq!(classes.interior.len(), 2);
        assert!(classes.isolated.is_empty());
    }

    #[test]
    fn lone_edge_and_isolated_node() {
        let mut mesh = Mesh::new();
        let a = mesh.add_node(Point2::ZERO);
        let b = mesh.add_node(Point2::X);
        let c = mesh.add_node(Point2::Y);
        let h = mesh.add_edge(a, b).unwrap();
        let loops = boundary_loops(&mesh).unwrap();
        assert_eq!(loops, vec![vec![h, h.pair()]]);
        let classes = classify_boundary_nodes(&mesh).unwrap();
        assert_eq!(classes.isolated, vec![c]);
        assert_eq!(classes.boundary.len(), 2);
    }

    #[test]
    fn faced_halfedge_is_not_a_loop_start() {
        let mut mesh = Mesh::new();
        let a = mesh.add_node(Point2::ZERO);
        let b = mesh.add_node(Point2::X);
        let c = mesh.add_node(Point2::Y);
        mesh.add_triangle(a, b, c).unwrap();
        let ab = mesh.find_halfedge(a, b).unwrap().unwrap();
        assert!(matches!(
            boundary_loop(&mesh, ab),
            Err(MeshError::InvalidInput(_))
        ));
        assert_eq!(boundary_loop(&mesh, ab.pair()).unwrap().len(), 3);
    }
}
