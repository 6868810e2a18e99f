//! Error types for the beam solver

use thiserror::Error;

/// Main error type for structural analysis
#[derive(Error, Debug)]
pub enum FEAError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Singular stiffness matrix - structure is under-constrained: {0}")]
    SingularMatrix(String),

    #[error("Field '{0}' is declared but not implemented")]
    UnsupportedField(String),

    #[error("Load type '{0}' is declared but not implemented")]
    UnsupportedLoad(String),

    #[error("Point ({x}, {y}, {z}) does not lie on any element")]
    PointNotFound { x: f64, y: f64, z: f64 },

    #[error("Model not analyzed - call run() first")]
    NotAnalyzed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FEAError {
    pub(crate) fn point_not_found(p: &crate::geometry::Point3) -> Self {
        Self::PointNotFound {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

/// Result type for structural analysis
pub type FEAResult<T> = Result<T, FEAError>;
