//! Geometry for planar meshes: points, bounding boxes, orientation kernels
//! and point location.

pub mod bbox;
pub mod kernel;
pub mod locate;

pub use bbox::BoundingBox;
pub use kernel::{ExactKernel, FloatKernel, Kernel, OrientedSide, Point2};
pub use locate::{LocateOptions, PointLocation};
