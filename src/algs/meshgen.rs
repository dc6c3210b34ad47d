//! Basic mesh builders: indexed triangle lists and structured rectangles.
//!
//! No quality control is performed; the builders only connect what they are
//! given.

use crate::geometry::kernel::{ExactKernel, Point2};
use crate::mesh_error::MeshError;
use crate::topology::handle::NodeId;
use crate::topology::mesh::Mesh;

fn invalid_input(message: impl Into<String>) -> MeshError {
    MeshError::InvalidInput(message.into())
}

/// Add `points` and `triangles` (indices into `points`) to `mesh`.
///
/// Triangles are added in order with [`Mesh::add_triangle`], so shared edges
/// are reused. Returns the node handles in `points` order.
pub fn build_into<K>(
    mesh: &mut Mesh<K>,
    points: &[Point2],
    triangles: &[[usize; 3]],
) -> Result<Vec<NodeId>, MeshError> {
    for (t, tri) in triangles.iter().enumerate() {
        if let Some(&v) = tri.iter().find(|&&v| v >= points.len()) {
            return Err(invalid_input(format!(
                "triangle {t} references missing vertex {v}"
            )));
        }
        if tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0] {
            return Err(invalid_input(format!("triangle {t} repeats a vertex: {tri:?}")));
        }
    }

    let nodes: Vec<NodeId> = points.iter().map(|&p| mesh.add_node(p)).collect();
    for [a, b, c] in triangles {
        mesh.add_triangle(nodes[*a], nodes[*b], nodes[*c])?;
    }
    log::debug!(
        "build_into: {} nodes, {} triangles",
        points.len(),
        triangles.len()
    );
    Ok(nodes)
}

/// Build a fresh mesh from points and triangles.
pub fn from_triangles(points: &[Point2], triangles: &[[usize; 3]]) -> Result<Mesh, MeshError> {
    let mut mesh = Mesh::with_capacity(points.len(), points.len() + triangles.len(), triangles.len());
    build_into(&mut mesh, points, triangles)?;
    Ok(mesh)
}

/// Vertices and counter-clockwise triangles of an `nx`×`ny` cell grid over
/// `[min, max]`, each cell split along its `v0 -> v2` diagonal.
pub fn structured_rectangle_data(
    nx: usize,
    ny: usize,
    min: Point2,
    max: Point2,
) -> Result<(Vec<Point2>, Vec<[usize; 3]>), MeshError> {
    if nx == 0 || ny == 0 {
        return Err(invalid_input("nx and ny must be positive"));
    }
    if !(min.x < max.x && min.y < max.y) {
        return Err(invalid_input(format!(
            "empty rectangle [{min}, {max}]"
        )));
    }

    let dx = (max.x - min.x) / nx as f64;
    let dy = (max.y - min.y) / ny as f64;
    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        let y = if j == ny { max.y } else { min.y + dy * j as f64 };
        for i in 0..=nx {
            let x = if i == nx { max.x } else { min.x + dx * i as f64 };
            vertices.push(Point2::new(x, y));
        }
    }

    let mut triangles = Vec::with_capacity(2 * nx * ny);
    let row_stride = nx + 1;
    for j in 0..ny {
        for i in 0..nx {
            let v0 = j * row_stride + i;
            let v1 = v0 + 1;
            let v3 = v0 + row_stride;
            let v2 = v3 + 1;
            triangles.push([v0, v1, v2]);
            triangles.push([v0, v2, v3]);
        }
    }
    Ok((vertices, triangles))
}

/// Generate a structured triangle mesh over `[min, max]` with `nx`×`ny` cells.
pub fn structured_rectangle(nx: usize, ny: usize, min: Point2, max: Point2) -> Result<Mesh, MeshError> {
    structured_rectangle_with::<ExactKernel>(nx, ny, min, max)
}

/// [`structured_rectangle`] for an explicit kernel.
pub fn structured_rectangle_with<K>(
    nx: usize,
    ny: usize,
    min: Point2,
    max: Point2,
) -> Result<Mesh<K>, MeshError> {
    let (vertices, triangles) = structured_rectangle_data(nx, ny, min, max)?;
    let edges = nx * (ny + 1) + ny * (nx + 1) + nx * ny;
    let mut mesh = Mesh::with_kernel_and_capacity(vertices.len(), edges, triangles.len());
    build_into(&mut mesh, &vertices, &triangles)?;
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::kernel::FloatKernel;
    use crate::topology::validation::ValidationOptions;

    #[test]
    fn structured_rectangle_counts() {
        let mesh = structured_rectangle(3, 2, Point2::ZERO, Point2::new(3.0, 2.0)).unwrap();
        assert_eq!(mesh.node_count(), 12);
        assert_eq!(mesh.edge_count(), 3 * 3 + 2 * 4 + 6);
        assert_eq!(mesh.face_count(), 12);
        mesh.validate(ValidationOptions::all()).unwrap();
        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, Point2::ZERO);
        assert_eq!(bbox.max, Point2::new(3.0, 2.0));
    }

    #[test]
    fn float_kernel_rectangle() {
        let mesh = structured_rectangle_with::<FloatKernel>(2, 2, Point2::ZERO, Point2::ONE).unwrap();
        mesh.validate(ValidationOptions::all()).unwrap();
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            structured_rectangle(0, 1, Point2::ZERO, Point2::ONE),
            Err(MeshError::InvalidInput(_))
        ));
        assert!(matches!(
            structured_rectangle(1, 1, Point2::ONE, Point2::ZERO),
            Err(MeshError::InvalidInput(_))
        ));
        let points = [Point2::ZERO, Point2::X, Point2::Y];
        assert!(matches!(
            from_triangles(&points, &[[0, 1, 3]]),
            Err(MeshError::InvalidInput(_))
        ));
        assert!(matches!(
            from_triangles(&points, &[[0, 1, 1]]),
            Err(MeshError::InvalidInput(_))
        ));
    }

    #[test]
    fn from_triangles_shares_edges() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let mesh = from_triangles(&points, &[[0, 1, 2], [0, 2, 3]]).unwrap();
        assert_eq!(mesh.edge_count(), 5);
        assert_eq!(mesh.face_count(), 2);
    }
}
