//! MeshError: Unified error type for mesh-hds public APIs
//!
//! Every fallible operator returns `Result<_, MeshError>`. Nothing in the crate
//! retries internally; errors surface to the direct caller.

use crate::topology::handle::{EdgeId, FaceId, HalfedgeId, NodeId};
use thiserror::Error;

/// Raised by the adjacency engine when a splice would need a non-manifold
/// configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    /// Every half-edge arriving at `node` already borders a face.
    #[error("bad topology: no free incident half-edge at node {node}")]
    NoFreeSlot { node: NodeId },
}

/// Why [`Mesh::add_face`](crate::topology::mesh::Mesh::add_face) rejected its input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AddFaceReason {
    #[error("half-edges are not free")]
    NotFree,
    #[error("half-edges do not form a chain")]
    NotAChain,
    #[error("attempting to create a non-manifold mesh")]
    NonManifold,
}

/// Unified error type for mesh-hds operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The node handle was removed or never issued by this mesh.
    #[error("invalid node handle {0}")]
    InvalidNode(NodeId),
    /// The half-edge handle was removed or never issued by this mesh.
    #[error("invalid half-edge handle {0}")]
    InvalidHalfedge(HalfedgeId),
    /// The edge handle was removed or never issued by this mesh.
    #[error("invalid edge handle {0}")]
    InvalidEdge(EdgeId),
    /// The face handle was removed or never issued by this mesh.
    #[error("invalid face handle {0}")]
    InvalidFace(FaceId),
    /// `add_edge` was asked to connect a node to itself.
    #[error("edge endpoints must differ (self-loop at node {0})")]
    SelfLoop(NodeId),
    /// An adjacency splice failed.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// `add_edge` could not splice one of its half-edges into a node.
    #[error("trying to attach an edge to a complete mesh: {0}")]
    AttachToCompleteMesh(TopologyError),
    /// `add_face` preconditions or splices failed.
    #[error("cannot add face: {reason}")]
    AddFace { reason: AddFaceReason },
    /// Point location needs at least one face to start from.
    #[error("point location requires a mesh with at least one face")]
    NoFaces,
    /// The location walk hit its configured step budget.
    #[error("point location did not terminate within {steps} steps")]
    WalkExhausted { steps: usize },
    /// Builder input (point or triangle lists, grid sizes) is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A structural invariant of the half-edge graph does not hold.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl MeshError {
    pub(crate) fn add_face(reason: AddFaceReason) -> Self {
        MeshError::AddFace { reason }
    }
}
