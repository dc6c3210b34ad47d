//! Top-level module for the half-edge mesh topology.
//!
//! It includes:
//! - typed `slotmap` key handles for nodes, edges and faces, plus half-edge handles
//! - the [`Mesh`] records and Euler operators
//! - the adjacency splices behind those operators
//! - composite refinement (edge and face splits)
//! - local traversal iterators and validation
//!
//! Most users will interact with [`Mesh`] and the handle aliases
//! [`NodeId`], [`HalfedgeId`], [`EdgeId`] and [`FaceId`].

mod adjacency;
pub mod cache;
pub mod handle;
pub mod mesh;
pub mod refine;
pub mod traversal;
pub mod validation;

pub use cache::InvalidateCache;
pub use handle::{EdgeId, FaceId, HalfedgeId, NodeId, Side};
pub use mesh::{Edge, Face, Halfedge, Mesh, Node};
pub use validation::{OrientationHandling, ValidationOptions};

#[cfg(test)]
mod tests;
