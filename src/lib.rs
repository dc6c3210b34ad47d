#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-hds
//!
//! mesh-hds is a planar triangulated-mesh kernel built on a half-edge
//! (doubly-connected edge list) representation. It keeps nodes, edges and
//! triangular faces topologically consistent under Euler-style operators, splits
//! edges and faces, and locates arbitrary points by walking the mesh.
//!
//! ## Features
//! - Typed `slotmap` handles: stale handles are detected, never misread
//! - Euler operators (`add_*` / `remove_*`) and composite splits
//! - Point location with exact (`robust`) or plain floating-point predicates
//! - Full invariant validation, plus post-operation checks in debug builds
//! - Serde snapshots of the whole mesh
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mesh-hds = "0.1"
//! # Optional features:
//! # features = ["strict-invariants"]
//! ```
//!
//! ```rust
//! use mesh_hds::prelude::*;
//!
//! let mut mesh = structured_rectangle(4, 4, Point2::ZERO, Point2::ONE)?;
//! let face = match mesh.locate(Point2::new(0.3, 0.6), None)? {
//!     PointLocation::InFace(face) => face,
//!     other => panic!("unexpected {other:?}"),
//! };
//! let node = mesh.split_face(face, Point2::new(0.3, 0.6))?;
//! assert_eq!(mesh.degree(node)?, 3);
//! mesh.validate(ValidationOptions::all())?;
//! # Ok::<(), MeshError>(())
//! ```
//!
//! ## Invariant checking
//! Every successful mutator re-validates the mesh when `debug_assertions` are
//! on, or when the `strict-invariants` / `check-invariants` features are
//! enabled, and panics on the first violation. Release builds skip the check.
//!
//! ## Logging
//! Operators emit `log` records (`debug` per operator, `trace` per splice and
//! per point-location step). No logger is installed by the library.

pub mod algs;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::boundary::{BoundaryClassification, boundary_loops, classify_boundary_nodes};
    pub use crate::algs::meshgen::{from_triangles, structured_rectangle};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::bbox::BoundingBox;
    pub use crate::geometry::kernel::{ExactKernel, FloatKernel, Kernel, OrientedSide, Point2};
    pub use crate::geometry::locate::{LocateOptions, PointLocation};
    pub use crate::mesh_error::{AddFaceReason, MeshError, TopologyError};
    pub use crate::topology::cache::InvalidateCache;
    pub use crate::topology::handle::{EdgeId, FaceId, HalfedgeId, NodeId};
    pub use crate::topology::mesh::Mesh;
    pub use crate::topology::validation::{OrientationHandling, ValidationOptions};
}
