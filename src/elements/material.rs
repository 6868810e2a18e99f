//! Material properties

use serde::{Deserialize, Serialize};

/// Linear elastic isotropic material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus)
    pub e: f64,
    /// Shear modulus
    pub g: f64,
    /// Poisson's ratio
    pub nu: f64,
}

impl Material {
    /// Create a material from explicit E, G and nu
    pub fn new(e: f64, g: f64, nu: f64) -> Self {
        Self { e, g, nu }
    }

    /// Create an isotropic material from E and nu, with G = E / (2 * (1 + nu))
    pub fn isotropic(e: f64, nu: f64) -> Self {
        Self::new(e, e / (2.0 * (1.0 + nu)), nu)
    }

    /// Structural steel in N/mm² (MPa)
    pub fn steel() -> Self {
        Self::isotropic(210e3, 0.3)
    }

    /// 6061-T6 aluminium in N/mm² (MPa)
    pub fn aluminum() -> Self {
        Self::isotropic(68.9e3, 0.33)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
