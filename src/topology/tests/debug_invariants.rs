#![cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]

use crate::debug_invariants::DebugInvariants;
use crate::geometry::kernel::Point2;
use crate::topology::mesh::Mesh;

fn triangle() -> Mesh {
    let mut mesh = Mesh::new();
    let a = mesh.add_node(Point2::new(0.0, 0.0));
    let b = mesh.add_node(Point2::new(1.0, 0.0));
    let c = mesh.add_node(Point2::new(0.0, 1.0));
    mesh.add_triangle(a, b, c).unwrap();
    mesh
}

#[test]
fn intact_mesh_passes() {
    triangle().debug_assert_invariants();
}

#[test]
#[should_panic(expected = "[invariants]")]
fn broken_prev_panics_in_debug() {
    let mut mesh = triangle();
    let h = mesh.halfedges().next().unwrap();
    mesh.halfedge_mut(h).unwrap().prev = h;
    mesh.debug_assert_invariants();
}

#[test]
#[should_panic(expected = "[invariants]")]
fn dangling_face_panics_in_debug() {
    let mut mesh = triangle();
    let f = mesh.faces().next().unwrap();
    mesh.faces.remove(f);
    mesh.debug_assert_invariants();
}

#[test]
#[should_panic(expected = "[invariants]")]
fn wrong_representative_panics_in_debug() {
    let mut mesh = triangle();
    let n = mesh.nodes().next().unwrap();
    let h = mesh.node(n).unwrap().halfedge().unwrap();
    mesh.node_mut(n).unwrap().halfedge = Some(h.pair());
    mesh.debug_assert_invariants();
}
