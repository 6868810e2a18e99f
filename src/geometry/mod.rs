//! Geometry collaborators: point deduplication and sampled element paths

mod path;
mod registry;

pub use path::Path;
pub(crate) use path::MIN_SEGMENT_LENGTH;
pub use registry::PointRegistry;

/// A 3D coordinate
pub type Point3 = nalgebra::Vector3<f64>;
