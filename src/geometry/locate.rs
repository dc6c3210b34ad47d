//! Point location by directed walk over face adjacency.
//!
//! The walk keeps a current half-edge inside a face and classifies the query
//! point against its directed line:
//! - left of it: advance along `next`; a full loop means the point is inside;
//! - on the line: report an edge or node hit, or treat the point as lying
//!   beyond the segment (`CollinearOutside`) and cross like the right side;
//! - right of it: cross to the twin's face, or stop at the boundary.
//!
//! On a mesh of counter-clockwise triangles covering a convex domain the walk
//! always terminates. Elsewhere it may cycle; bound it with
//! [`LocateOptions::max_steps`].

use crate::geometry::kernel::{Kernel, OrientedSide, Point2};
use crate::mesh_error::MeshError;
use crate::topology::handle::{EdgeId, FaceId, HalfedgeId, NodeId};
use crate::topology::mesh::Mesh;
use serde::{Deserialize, Serialize};

/// Where a query point lies relative to the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointLocation {
    /// Strictly inside the face.
    InFace(FaceId),
    /// In the interior of the edge's segment.
    OnEdge(EdgeId),
    /// Exactly at the node's position.
    OnNode(NodeId),
    /// Outside the mesh, beyond the named boundary edge.
    OutsideMesh(EdgeId),
}

/// Point-location knobs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocateOptions {
    /// Maximum number of classification steps; `None` walks until done.
    pub max_steps: Option<usize>,
}

impl LocateOptions {
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self {
            max_steps: Some(max_steps),
        }
    }
}

/// One step of the walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    /// Point is left of the current half-edge.
    Advance,
    /// Point is right of the current half-edge.
    Cross,
    /// Point is on the supporting line but outside the segment.
    CollinearOutside,
    Found(PointLocation),
}

fn strictly_between(a: f64, b: f64, v: f64) -> bool {
    a.min(b) < v && v < a.max(b)
}

/// Classify a point known to lie on the line through `h`'s endpoints.
fn collinear_transition(
    h: HalfedgeId,
    (origin, target): (NodeId, NodeId),
    (p1, p2): (Point2, Point2),
    p: Point2,
) -> Transition {
    if strictly_between(p1.x, p2.x, p.x) || strictly_between(p1.y, p2.y, p.y) {
        Transition::Found(PointLocation::OnEdge(h.edge()))
    } else if p == p1 {
        Transition::Found(PointLocation::OnNode(origin))
    } else if p == p2 {
        Transition::Found(PointLocation::OnNode(target))
    } else {
        Transition::CollinearOutside
    }
}

impl<K: Kernel> Mesh<K> {
    /// Locate `point`, starting the walk at `start` (or the first live face).
    ///
    /// Fails with [`MeshError::NoFaces`] when the mesh has no face to start
    /// from and with [`MeshError::InvalidFace`] for a stale start face.
    pub fn locate(&self, point: Point2, start: Option<FaceId>) -> Result<PointLocation, MeshError> {
        self.locate_with(point, start, LocateOptions::default())
    }

    /// [`Mesh::locate`] with explicit options.
    pub fn locate_with(
        &self,
        point: Point2,
        start: Option<FaceId>,
        options: LocateOptions,
    ) -> Result<PointLocation, MeshError> {
        let start_face = match start {
            Some(f) => f,
            None => self.faces().next().ok_or(MeshError::NoFaces)?,
        };
        let mut loop_start = self.face(start_face)?.halfedge();
        let mut current = loop_start;
        let mut steps = 0usize;

        loop {
            if options.max_steps.is_some_and(|max| steps >= max) {
                log::debug!("locate gave up after {steps} steps");
                return Err(MeshError::WalkExhausted { steps });
            }
            steps += 1;

            let origin = self.origin(current)?;
            let target = self.target(current)?;
            let (p1, p2) = (self.position(origin)?, self.position(target)?);
            let transition = match K::oriented_side(p1, p2, point) {
                OrientedSide::Positive => Transition::Advance,
                OrientedSide::Negative => Transition::Cross,
                OrientedSide::OnBoundary => {
                    collinear_transition(current, (origin, target), (p1, p2), point)
                }
            };
            log::trace!("locate step {steps}: {current} -> {transition:?}");

            match transition {
                Transition::Found(location) => return Ok(location),
                Transition::Advance => {
                    current = self.next(current)?;
                    if current == loop_start {
                        let face = self.face_of(current)?.ok_or_else(|| {
                            MeshError::InvariantViolation(format!(
                                "point location walked into boundary half-edge {current}"
                            ))
                        })?;
                        return Ok(PointLocation::InFace(face));
                    }
                }
                Transition::Cross | Transition::CollinearOutside => {
                    let twin = current.pair();
                    if self.is_boundary(twin)? {
                        return Ok(PointLocation::OutsideMesh(current.edge()));
                    }
                    loop_start = twin;
                    current = self.next(twin)?;
                }
            }
        }
    }
}
