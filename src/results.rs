//! Result records read back from a solved model

use serde::{Deserialize, Serialize};

use crate::math::Vec6;

/// Displacement results at a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Displacement in Z direction
    pub dz: f64,
    /// Rotation about X axis
    pub rx: f64,
    /// Rotation about Y axis
    pub ry: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from a solved 6-DOF vector [DX, DY, DZ, RX, RY, RZ]
    pub fn from_vector(v: &Vec6) -> Self {
        Self {
            dx: v[0],
            dy: v[1],
            dz: v[2],
            rx: v[3],
            ry: v[4],
            rz: v[5],
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.dx, self.dy, self.dz, self.rx, self.ry, self.rz]
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }

    /// Get rotation magnitude
    pub fn rotation_magnitude(&self) -> f64 {
        (self.rx.powi(2) + self.ry.powi(2) + self.rz.powi(2)).sqrt()
    }
}

/// Resolved forces at a point: reactions on prescribed DOFs, applied loads elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Force in X direction
    pub fx: f64,
    /// Force in Y direction
    pub fy: f64,
    /// Force in Z direction
    pub fz: f64,
    /// Moment about X axis
    pub mx: f64,
    /// Moment about Y axis
    pub my: f64,
    /// Moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Create from a solved 6-DOF vector [FX, FY, FZ, MX, MY, MZ]
    pub fn from_vector(v: &Vec6) -> Self {
        Self {
            fx: v[0],
            fy: v[1],
            fz: v[2],
            mx: v[3],
            my: v[4],
            mz: v[5],
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.fx, self.fy, self.fz, self.mx, self.my, self.mz]
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2) + self.fz.powi(2)).sqrt()
    }

    /// Get total moment magnitude
    pub fn moment_magnitude(&self) -> f64 {
        (self.mx.powi(2) + self.my.powi(2) + self.mz.powi(2)).sqrt()
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Distinct registered points
    pub num_points: usize,
    /// Elements in the model
    pub num_elements: usize,
    /// Total DOFs (6 per point)
    pub total_dofs: usize,
    /// DOFs with a prescribed displacement
    pub known_dofs: usize,
    /// DOFs solved for
    pub free_dofs: usize,
    /// Largest translation magnitude
    pub max_displacement: f64,
    /// Point carrying the largest translation
    pub max_disp_point: [f64; 3],
    /// Largest reaction force magnitude over supported points
    pub max_reaction: f64,
    /// Point carrying the largest reaction
    pub max_reaction_point: [f64; 3],
}
