//! Beam FEA - static analysis of 3D beam and truss structures
//!
//! Elements are laid out along piecewise-linear paths in space and connect
//! wherever their sample points coincide. Supported formulations:
//! - Euler-Bernoulli beams
//! - Timoshenko (shear-deformable) beams
//! - Axial-only trusses and linearised cables
//!
//! Each point carries six DOFs (three translations, three rotations).
//! Prescribed displacements and concentrated loads are keyed by DOF, and the
//! mixed system is solved by partitioning into known and unknown
//! displacements. Result fields (displacement, internal and external forces
//! and moments) are read back per element as curves over the path parameter.
//!
//! ## Example
//! ```rust
//! use beam_fea::prelude::*;
//!
//! let section = Section::circle(Material::steel(), 8.0).unwrap();
//! let ts: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
//! let beam = Element::euler_bernoulli(&[[0.0, 0.0, 0.0], [1000.0, 0.0, 0.0]], section)
//!     .unwrap()
//!     .with_parameters(&ts)
//!     .unwrap();
//!
//! let mut model = StaticModel::new();
//! let id = model.add_element(beam);
//!
//! // Fixed at the root, 10 N transverse load at the tip
//! model.add_boundary_condition([0.0, 0.0, 0.0], &BoundaryKey::fixed()).unwrap();
//! model.add_concentrated_load_by_name([1000.0, 0.0, 0.0], &[("Fy", 10.0)]).unwrap();
//!
//! model.run().unwrap();
//!
//! let u = model.field(id, "u").unwrap();
//! assert!(u.eval(1.0).y > 0.0);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod fields;
pub mod geometry;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, SolverBackend};
    pub use crate::elements::{Element, ElementKind, Material, Profile, Section, SectionProperties};
    pub use crate::error::{FEAError, FEAResult};
    pub use crate::fields::{Curve, FieldName, Interpolation};
    pub use crate::geometry::{Path, Point3, PointRegistry};
    pub use crate::loads::{BoundaryKey, LoadKey};
    pub use crate::model::{ElementId, StaticModel};
    pub use crate::results::{AnalysisSummary, NodeDisplacement, Reactions};
}
