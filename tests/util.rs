#![allow(dead_code)]
use mesh_hds::prelude::*;

pub fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

/// A(0,0), B(1,0), C(0,1) with the counter-clockwise face ABC.
pub fn unit_triangle() -> (Mesh, [NodeId; 3], FaceId) {
    let mut mesh = Mesh::new();
    let a = mesh.add_node(p(0.0, 0.0));
    let b = mesh.add_node(p(1.0, 0.0));
    let c = mesh.add_node(p(0.0, 1.0));
    let f = mesh.add_triangle(a, b, c).unwrap();
    (mesh, [a, b, c], f)
}

/// Unit square split along its (0,0)-(1,1) diagonal.
pub fn unit_square() -> Mesh {
    from_triangles(
        &[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
        &[[0, 1, 2], [0, 2, 3]],
    )
    .unwrap()
}

pub fn grid(n: usize) -> Mesh {
    structured_rectangle(n, n, Point2::ZERO, Point2::splat(n as f64)).unwrap()
}

/// `V - E + F` over live records.
pub fn euler_characteristic<K>(mesh: &Mesh<K>) -> i64 {
    mesh.node_count() as i64 - mesh.edge_count() as i64 + mesh.face_count() as i64
}

/// Full validation including counter-clockwise faces.
pub fn assert_valid<K: Kernel>(mesh: &Mesh<K>) {
    if let Err(e) = mesh.validate(ValidationOptions::all()) {
        panic!("mesh failed validation: {e}");
    }
}

/// Arena slot of a handle, ignoring its version.
pub fn slot_of<H: slotmap::Key>(handle: H) -> u32 {
    handle.data().as_ffi() as u32
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
