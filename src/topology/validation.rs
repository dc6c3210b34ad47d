//! Mesh validation helpers.
//!
//! [`validate_topology`] checks the pointer structure only; [`validate_mesh`]
//! additionally checks face orientation through the mesh's kernel.

use crate::debug_invariants::DebugInvariants;
use crate::geometry::kernel::{Kernel, OrientedSide};
use crate::mesh_error::MeshError;
use crate::topology::handle::{FaceId, HalfedgeId, NodeId};
use crate::topology::mesh::Mesh;

/// Optional validation toggles for half-edge mesh checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Walk every node's incidence cycle and require it to close and to cover
    /// every half-edge exactly once.
    pub check_incidence_cycles: bool,
    /// Require every face loop to be a triangle whose half-edges report the face.
    pub check_face_loops: bool,
    /// How to handle faces that are not counter-clockwise.
    pub orientation: OrientationHandling,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_incidence_cycles: true,
            check_face_loops: true,
            orientation: OrientationHandling::Ignore,
        }
    }
}

impl ValidationOptions {
    /// Enable all validation checks.
    pub fn all() -> Self {
        Self {
            check_incidence_cycles: true,
            check_face_loops: true,
            orientation: OrientationHandling::Error,
        }
    }

    /// Only the per-half-edge pointer checks.
    pub fn pointers_only() -> Self {
        Self {
            check_incidence_cycles: false,
            check_face_loops: false,
            orientation: OrientationHandling::Ignore,
        }
    }
}

/// Behavior for clockwise or degenerate faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationHandling {
    /// Skip orientation checks.
    Ignore,
    /// Log a warning per offending face.
    Warn,
    /// Return an error on the first offending face.
    Error,
}

fn violation(msg: String) -> MeshError {
    MeshError::InvariantViolation(msg)
}

/// Validate the half-edge pointer structure of `mesh`.
pub fn validate_topology<K>(mesh: &Mesh<K>, options: ValidationOptions) -> Result<(), MeshError> {
    for n in mesh.nodes() {
        if let Some(h) = mesh.node(n)?.halfedge() {
            let origin = mesh
                .origin(h)
                .map_err(|_| violation(format!("node {n} points at dead half-edge {h}")))?;
            if origin != n {
                return Err(violation(format!(
                    "node {n} representative {h} starts at {origin}"
                )));
            }
        }
    }

    for h in mesh.halfedges() {
        check_halfedge(mesh, h)?;
    }

    if options.check_incidence_cycles {
        let mut covered = 0usize;
        for n in mesh.nodes() {
            covered += check_incidence_cycle(mesh, n)?;
        }
        if covered != mesh.halfedge_count() {
            return Err(violation(format!(
                "incidence cycles cover {covered} of {} half-edges",
                mesh.halfedge_count()
            )));
        }
    }

    if options.check_face_loops {
        for f in mesh.faces() {
            check_face_loop(mesh, f)?;
        }
        let faced = mesh
            .halfedges()
            .filter(|&h| matches!(mesh.face_of(h), Ok(Some(_))))
            .count();
        if faced != 3 * mesh.face_count() {
            return Err(violation(format!(
                "{faced} half-edges report a face, expected {}",
                3 * mesh.face_count()
            )));
        }
    }

    Ok(())
}

/// Validate topology and, depending on `options.orientation`, face winding.
pub fn validate_mesh<K: Kernel>(
    mesh: &Mesh<K>,
    options: ValidationOptions,
) -> Result<(), MeshError> {
    validate_topology(mesh, options)?;
    if options.orientation == OrientationHandling::Ignore {
        return Ok(());
    }
    for f in mesh.faces() {
        let [a, b, c] = mesh.face_positions(f)?;
        let side = K::triangle_orientation(a, b, c);
        if side == OrientedSide::Positive {
            continue;
        }
        match options.orientation {
            OrientationHandling::Ignore => {}
            OrientationHandling::Warn => {
                log::warn!("face {f} is not counter-clockwise ({side:?})");
            }
            OrientationHandling::Error => {
                return Err(violation(format!(
                    "face {f} is not counter-clockwise ({side:?})"
                )));
            }
        }
    }
    Ok(())
}

fn check_halfedge<K>(mesh: &Mesh<K>, h: HalfedgeId) -> Result<(), MeshError> {
    let record = mesh.halfedge(h)?;
    let origin = record.origin();
    if !mesh.contains_node(origin) {
        return Err(violation(format!("half-edge {h} starts at dead node {origin}")));
    }
    for (name, other) in [("next", record.next()), ("prev", record.prev())] {
        if !mesh.contains_halfedge(other) {
            return Err(violation(format!("half-edge {h} has dead {name} {other}")));
        }
    }
    if mesh.next(record.prev())? != h {
        return Err(violation(format!("next(prev({h})) != {h}")));
    }
    if mesh.prev(record.next())? != h {
        return Err(violation(format!("prev(next({h})) != {h}")));
    }
    if mesh.origin(record.next())? != mesh.origin(h.pair())? {
        return Err(violation(format!(
            "half-edge {h}: next starts away from the twin's origin"
        )));
    }
    if let Some(f) = record.face() {
        if !mesh.contains_face(f) {
            return Err(violation(format!("half-edge {h} reports dead face {f}")));
        }
    }
    Ok(())
}

/// Walk the cycle of `n` and return its length.
fn check_incidence_cycle<K>(mesh: &Mesh<K>, n: NodeId) -> Result<usize, MeshError> {
    let Some(start) = mesh.node(n)?.halfedge() else {
        return Ok(0);
    };
    let mut current = start;
    let mut length = 0usize;
    loop {
        if mesh.origin(current)? != n {
            return Err(violation(format!(
                "incidence cycle of node {n} reaches {current}, which starts elsewhere"
            )));
        }
        length += 1;
        current = mesh.next(current.pair())?;
        if current == start {
            return Ok(length);
        }
        if length > mesh.halfedge_count() {
            return Err(violation(format!("incidence cycle of node {n} does not close")));
        }
    }
}

fn check_face_loop<K>(mesh: &Mesh<K>, f: FaceId) -> Result<(), MeshError> {
    let start = mesh.face(f)?.halfedge();
    let mut current = start;
    for step in 0..3 {
        let face = mesh
            .face_of(current)
            .map_err(|_| violation(format!("face {f} loop reaches dead half-edge {current}")))?;
        if face != Some(f) {
            return Err(violation(format!(
                "half-edge {current} at step {step} of face {f} reports {face:?}"
            )));
        }
        current = mesh.next(current)?;
    }
    if current != start {
        return Err(violation(format!("face {f} is not a triangle")));
    }
    Ok(())
}

impl<K: Kernel> Mesh<K> {
    /// Run the configured checks; see [`validate_mesh`].
    pub fn validate(&self, options: ValidationOptions) -> Result<(), MeshError> {
        validate_mesh(self, options)
    }
}

impl<K> DebugInvariants for Mesh<K> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Mesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        validate_topology(self, ValidationOptions::default())
    }
}
