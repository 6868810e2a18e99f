//! Cross-section properties consumed by the stiffness engine

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::Material;
use crate::error::{FEAError, FEAResult};

/// Scalar section and material properties an element needs to build its stiffness.
///
/// Per-axis quantities are ordered along the local frame `[tangent, plane 1, plane 2]`.
pub trait SectionProperties {
    /// Modulus of elasticity E
    fn young_modulus(&self) -> f64;
    /// Shear modulus G
    fn shear_modulus(&self) -> f64;
    /// `[A, A_shear_1, A_shear_2]`: axial area and effective shear areas
    fn areas(&self) -> [f64; 3];
    /// `[I_x, I_y, I_z]`: torsional constant and bending moments of inertia
    fn inertias(&self) -> [f64; 3];
}

/// Cross-section shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Profile {
    /// Solid circle
    Circle { diameter: f64 },
    /// Hollow circle (tube)
    HollowCircle { outer_diameter: f64, wall_thickness: f64 },
    /// Solid rectangle; `width` runs along bending plane 1, `height` along plane 2
    Rectangle { width: f64, height: f64 },
}

/// Material plus the section properties derived from a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub material: Material,
    /// `[A, A_shear_1, A_shear_2]`
    pub a: [f64; 3],
    /// `[I_x, I_y, I_z]`
    pub i: [f64; 3],
}

impl Section {
    /// Section with explicit properties
    pub fn custom(material: Material, a: [f64; 3], i: [f64; 3]) -> FEAResult<Self> {
        let section = Self { material, a, i };
        section.validate()?;
        Ok(section)
    }

    /// Section from a material and profile. Shear areas use Cowper's factors.
    pub fn new(material: Material, profile: Profile) -> FEAResult<Self> {
        let nu = material.nu;
        let (a, i) = match profile {
            Profile::Circle { diameter } => {
                let area = PI * diameter.powi(2) / 4.0;
                let kappa = 6.0 * (1.0 + nu) / (7.0 + 6.0 * nu);
                let inertia = PI * diameter.powi(4) / 64.0;
                (
                    [area, kappa * area, kappa * area],
                    [2.0 * inertia, inertia, inertia],
                )
            }
            Profile::HollowCircle {
                outer_diameter,
                wall_thickness,
            } => {
                let inner = outer_diameter - 2.0 * wall_thickness;
                if inner < 0.0 {
                    return Err(FEAError::Validation(format!(
                        "wall thickness {} exceeds the radius of a {} tube",
                        wall_thickness, outer_diameter
                    )));
                }
                let area = PI * (outer_diameter.powi(2) - inner.powi(2)) / 4.0;
                let m2 = (inner / outer_diameter).powi(2);
                let kappa = 6.0 * (1.0 + nu) * (1.0 + m2).powi(2)
                    / ((7.0 + 6.0 * nu) * (1.0 + m2).powi(2) + (20.0 + 12.0 * nu) * m2);
                let inertia = PI * (outer_diameter.powi(4) - inner.powi(4)) / 64.0;
                (
                    [area, kappa * area, kappa * area],
                    [2.0 * inertia, inertia, inertia],
                )
            }
            Profile::Rectangle { width, height } => {
                let area = width * height;
                let kappa = 10.0 * (1.0 + nu) / (12.0 + 11.0 * nu);
                // Saint-Venant torsion constant, thin-strip approximation
                let (long, short) = if width > height {
                    (width, height)
                } else {
                    (height, width)
                };
                let j = long * short.powi(3) / 3.0 * (1.0 - 0.63 * short / long);
                (
                    [area, kappa * area, kappa * area],
                    [
                        j,
                        width * height.powi(3) / 12.0,
                        height * width.powi(3) / 12.0,
                    ],
                )
            }
        };
        Self::custom(material, a, i)
    }

    /// Solid circular section
    pub fn circle(material: Material, diameter: f64) -> FEAResult<Self> {
        Self::new(material, Profile::Circle { diameter })
    }

    /// Solid rectangular section
    pub fn rectangle(material: Material, width: f64, height: f64) -> FEAResult<Self> {
        Self::new(material, Profile::Rectangle { width, height })
    }

    fn validate(&self) -> FEAResult<()> {
        let named = [
            ("E", self.material.e),
            ("G", self.material.g),
            ("A", self.a[0]),
            ("A_shear_1", self.a[1]),
            ("A_shear_2", self.a[2]),
            ("I_x", self.i[0]),
            ("I_y", self.i[1]),
            ("I_z", self.i[2]),
        ];
        match named.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            Some((name, value)) => Err(FEAError::Validation(format!(
                "section property {} = {} must be a positive finite number",
                name, value
            ))),
            None => Ok(()),
        }
    }
}

impl SectionProperties for Section {
    fn young_modulus(&self) -> f64 {
        self.material.e
    }

    fn shear_modulus(&self) -> f64 {
        self.material.g
    }

    fn areas(&self) -> [f64; 3] {
        self.a
    }

    fn inertias(&self) -> [f64; 3] {
        self.i
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circle_section() {
        let section = Section::circle(Material::steel(), 8.0).unwrap();
        assert_relative_eq!(section.a[0], PI * 16.0, max_relative = 1e-12);
        assert_relative_eq!(section.i[0], PI * 8.0_f64.powi(4) / 32.0, max_relative = 1e-12);
        assert_eq!(section.i[1], section.i[2]);
    }

    #[test]
    fn test_hollow_circle_reduces_to_solid() {
        let solid = Section::circle(Material::steel(), 2.0).unwrap();
        let tube = Section::new(
            Material::steel(),
            Profile::HollowCircle {
                outer_diameter: 2.0,
                wall_thickness: 1.0,
            },
        )
        .unwrap();
        assert_relative_eq!(tube.a[1], solid.a[1], max_relative = 1e-12);
        assert_relative_eq!(tube.i[2], solid.i[2], max_relative = 1e-12);
    }

    #[test]
    fn test_rectangle_axes() {
        let section = Section::rectangle(Material::steel(), 0.3, 0.5).unwrap();
        assert_relative_eq!(section.i[1], 0.3 * 0.5_f64.powi(3) / 12.0, max_relative = 1e-12);
        assert_relative_eq!(section.i[2], 0.5 * 0.3_f64.powi(3) / 12.0, max_relative = 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_property() {
        let err = Section::custom(Material::steel(), [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]).unwrap_err();
        assert!(err.to_string().contains("I_y"));
    }
}
