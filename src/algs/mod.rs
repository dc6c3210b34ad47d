//! Mesh-level algorithms built on the half-edge topology.

pub mod boundary;
pub mod meshgen;
pub mod traversal;

pub use boundary::{BoundaryClassification, boundary_loops, classify_boundary_nodes};
pub use meshgen::{from_triangles, structured_rectangle};
