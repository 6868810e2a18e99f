//! Field post-processing: result curves derived from an element's solved displacements

mod curve;

pub use curve::{Curve, Interpolation};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::elements::Element;
use crate::error::{FEAError, FEAResult};
use crate::math::{self, Vec12, Vec3, Vec6};

/// Named per-element result fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldName {
    /// `u`: nodal translations
    Displacement,
    /// `p`: undeformed path
    Position,
    /// `d`: position plus displacement
    Deformed,
    /// `FI`: internal force, reported once per segment boundary
    InternalForce,
    /// `FE`: nodal resultant force (applied load or reaction)
    ExternalForce,
    /// `MI`: internal moment
    InternalMoment,
    /// `ME`: nodal resultant moment
    ExternalMoment,
    /// `TR`: Tresca equivalent stress
    Tresca,
    /// `VM`: von Mises equivalent stress
    VonMises,
}

impl FieldName {
    pub const ALL: [Self; 9] = [
        Self::Displacement,
        Self::Position,
        Self::Deformed,
        Self::InternalForce,
        Self::ExternalForce,
        Self::InternalMoment,
        Self::ExternalMoment,
        Self::Tresca,
        Self::VonMises,
    ];

    /// Short code used to request the field by name
    pub fn code(self) -> &'static str {
        match self {
            Self::Displacement => "u",
            Self::Position => "p",
            Self::Deformed => "d",
            Self::InternalForce => "FI",
            Self::ExternalForce => "FE",
            Self::InternalMoment => "MI",
            Self::ExternalMoment => "ME",
            Self::Tresca => "TR",
            Self::VonMises => "VM",
        }
    }
}

impl FromStr for FieldName {
    type Err = FEAError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|f| f.code() == s).ok_or_else(|| {
            let codes: Vec<&str> = Self::ALL.iter().map(|f| f.code()).collect();
            FEAError::Validation(format!(
                "unrecognized field '{}', expected one of [{}]",
                s,
                codes.join(", ")
            ))
        })
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Compute a field curve for an element. Pure: depends only on the element
/// geometry, section and attached solution.
pub(crate) fn evaluate(element: &Element, name: FieldName) -> FEAResult<Curve> {
    let solved = || element.solution().ok_or(FEAError::NotAnalyzed);
    match name {
        FieldName::Position => Ok(position(element)),
        FieldName::Displacement => Ok(displacement(element, solved()?)),
        FieldName::Deformed => position(element).plus(&displacement(element, solved()?)),
        FieldName::InternalForce => internal_resultant(element, solved()?, 0),
        FieldName::InternalMoment => internal_resultant(element, solved()?, 3),
        FieldName::ExternalForce => external_resultant(element, solved()?, 0),
        FieldName::ExternalMoment => external_resultant(element, solved()?, 3),
        FieldName::Tresca | FieldName::VonMises => {
            Err(FEAError::UnsupportedField(name.code().to_string()))
        }
    }
}

fn position(element: &Element) -> Curve {
    Curve::from_samples(element.parameters().to_vec(), element.points().to_vec())
}

fn displacement(element: &Element, u: &[Vec6]) -> Curve {
    let values = u.iter().map(|d| d.fixed_rows::<3>(0).into_owned()).collect();
    Curve::from_samples(element.parameters().to_vec(), values)
}

/// Per-segment resultant at `offset` (0 = force, 3 = moment).
///
/// Segment `k` contributes the value at its first node; the last node takes
/// the negated second-node value of the final segment.
fn internal_resultant(element: &Element, u: &[Vec6], offset: usize) -> FEAResult<Curve> {
    let n = u.len();
    let mut values = vec![Vec3::zeros(); n];
    let mut segment_forces = Vec12::zeros();
    for k in 0..n - 1 {
        let block = element.segment_stiffness(k)?;
        segment_forces = block * math::stack_pair(&u[k], &u[k + 1]);
        values[k] = segment_forces.fixed_rows::<3>(offset).into_owned();
    }
    values[n - 1] = -segment_forces.fixed_rows::<3>(6 + offset).into_owned();
    Ok(Curve::from_samples(element.parameters().to_vec(), values))
}

/// Nodal resultant of the full element stiffness at `offset` (0 = force, 3 = moment)
fn external_resultant(element: &Element, u: &[Vec6], offset: usize) -> FEAResult<Curve> {
    let forces = element.stiffness_matrix()?.apply(u);
    let values = forces
        .iter()
        .map(|f| f.fixed_rows::<3>(offset).into_owned())
        .collect();
    Ok(Curve::from_samples(element.parameters().to_vec(), values))
}
