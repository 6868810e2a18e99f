//! Closed sets of DOF keys for loads and boundary conditions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FEAError;

/// A key naming one of the six DOFs of a point
pub trait DofKey: Copy + fmt::Display + FromStr<Err = FEAError> {
    /// What the key addresses, for error messages
    const KIND: &'static str;
    /// All keys in DOF order
    const ALL: [Self; 6];

    /// DOF index: 0..3 translations along global X/Y/Z, 3..6 rotations about them
    fn dof(self) -> usize;

    fn name(self) -> &'static str;

    /// Accepted key names, comma separated
    fn accepted() -> String {
        Self::ALL.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
    }
}

fn parse_key<K: DofKey>(s: &str) -> Result<K, FEAError> {
    K::ALL
        .into_iter()
        .find(|k| k.name() == s)
        .ok_or_else(|| {
            FEAError::Validation(format!(
                "unrecognized {} key '{}', expected one of [{}]",
                K::KIND,
                s,
                K::accepted()
            ))
        })
}

/// Concentrated load component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadKey {
    Fx,
    Fy,
    Fz,
    Mx,
    My,
    Mz,
}

impl DofKey for LoadKey {
    const KIND: &'static str = "load";
    const ALL: [Self; 6] = [Self::Fx, Self::Fy, Self::Fz, Self::Mx, Self::My, Self::Mz];

    fn dof(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Fx => "Fx",
            Self::Fy => "Fy",
            Self::Fz => "Fz",
            Self::Mx => "Mx",
            Self::My => "My",
            Self::Mz => "Mz",
        }
    }
}

/// Prescribed displacement (`U`) or rotation (`t`) component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryKey {
    Ux,
    Uy,
    Uz,
    Tx,
    Ty,
    Tz,
}

impl DofKey for BoundaryKey {
    const KIND: &'static str = "boundary condition";
    const ALL: [Self; 6] = [Self::Ux, Self::Uy, Self::Uz, Self::Tx, Self::Ty, Self::Tz];

    fn dof(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Ux => "Ux",
            Self::Uy => "Uy",
            Self::Uz => "Uz",
            Self::Tx => "tx",
            Self::Ty => "ty",
            Self::Tz => "tz",
        }
    }
}

impl BoundaryKey {
    /// All six DOFs, for a fully fixed point
    pub fn fixed() -> [(Self, f64); 6] {
        Self::ALL.map(|k| (k, 0.0))
    }

    /// Translations only, for a pinned point
    pub fn pinned() -> [(Self, f64); 3] {
        [(Self::Ux, 0.0), (Self::Uy, 0.0), (Self::Uz, 0.0)]
    }
}

macro_rules! impl_key_traits {
    ($($key:ty),*) => {$(
        impl FromStr for $key {
            type Err = FEAError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_key(s)
            }
        }

        impl fmt::Display for $key {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    )*};
}

impl_key_traits!(LoadKey, BoundaryKey);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dof_order() {
        assert_eq!(LoadKey::Fx.dof(), 0);
        assert_eq!(LoadKey::Mz.dof(), 5);
        assert_eq!(BoundaryKey::Tx.dof(), 3);
        assert_eq!("tz".parse::<BoundaryKey>().unwrap(), BoundaryKey::Tz);
    }

    #[test]
    fn test_unknown_key_names_accepted_set() {
        let err = "ux".parse::<BoundaryKey>().unwrap_err();
        assert!(matches!(err, FEAError::Validation(_)));
        assert!(err.to_string().contains("'ux'"));
        assert!(err.to_string().contains("[Ux, Uy, Uz, tx, ty, tz]"));
        assert!("Tx".parse::<LoadKey>().is_err());
    }
}
