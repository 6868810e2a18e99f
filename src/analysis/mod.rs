//! Analysis options and the partitioned static solver

mod solver;

pub use solver::{solve, GlobalSystem, SolvedSystem};

use serde::{Deserialize, Serialize};

/// Linear solver used for the unknown-displacement block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolverBackend {
    /// Dense LU with partial pivoting
    #[default]
    DenseLu,
    /// Skyline (banded) Cholesky; requires a positive definite reduced block
    SkylineCholesky,
}

/// Options for one static analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Distance below which two points are the same point
    pub point_tolerance: f64,
    /// Pivots at or below this fraction of the largest diagonal entry mark the system singular
    pub pivot_tolerance: f64,
    /// Solver for the reduced system
    pub backend: SolverBackend,
    /// Report the analysis summary at info level instead of debug
    pub log: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            point_tolerance: 1e-9,
            pivot_tolerance: 1e-12,
            backend: SolverBackend::DenseLu,
            log: false,
        }
    }
}

impl AnalysisOptions {
    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    /// Set the point merge tolerance
    pub fn with_point_tolerance(mut self, tolerance: f64) -> Self {
        self.point_tolerance = tolerance;
        self
    }

    /// Set the relative pivot tolerance for singularity detection
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// Select the linear solver backend
    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = backend;
        self
    }
}
