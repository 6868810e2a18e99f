//! Concentrated loads and prescribed displacements keyed by DOF

mod keys;

pub use keys::{BoundaryKey, DofKey, LoadKey};

use serde::{Deserialize, Serialize};

use crate::error::{FEAError, FEAResult};
use crate::geometry::Point3;

/// A concentrated force or moment component at a point.
/// Entries on the same (point, dof) accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadEntry {
    pub point: Point3,
    pub key: LoadKey,
    pub value: f64,
}

/// A prescribed displacement or rotation component at a point.
/// Entries are append-only; the last entry on a (point, dof) wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryEntry {
    pub point: Point3,
    pub key: BoundaryKey,
    pub value: f64,
}

/// Validate a keyed value list, rejecting non-finite values
pub(crate) fn check_values<K: DofKey>(values: &[(K, f64)]) -> FEAResult<()> {
    match values.iter().find(|(_, v)| !v.is_finite()) {
        Some((key, value)) => Err(FEAError::Validation(format!(
            "{} '{}' has value {}, expected a finite number",
            K::KIND,
            key,
            value
        ))),
        None => Ok(()),
    }
}

/// Parse a string-keyed value list; the whole list is checked before anything is returned
pub(crate) fn parse_values<K: DofKey>(values: &[(&str, f64)]) -> FEAResult<Vec<(K, f64)>> {
    let parsed = values
        .iter()
        .map(|(name, value)| Ok((name.parse::<K>()?, *value)))
        .collect::<FEAResult<Vec<_>>>()?;
    check_values(&parsed)?;
    Ok(parsed)
}

/// Validate a point coordinate
pub(crate) fn check_point(point: &Point3) -> FEAResult<()> {
    if point.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(FEAError::Validation(format!(
            "point ({}, {}, {}) has a non-finite coordinate",
            point.x, point.y, point.z
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        let parsed: Vec<(LoadKey, f64)> = parse_values(&[("Fy", 10.0), ("Mz", -2.0)]).unwrap();
        assert_eq!(parsed, vec![(LoadKey::Fy, 10.0), (LoadKey::Mz, -2.0)]);
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = parse_values::<BoundaryKey>(&[("Ux", 0.0), ("Fx", 1.0)]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'Fx'"));
        assert!(message.contains("Ux, Uy, Uz, tx, ty, tz"));
    }

    #[test]
    fn test_rejects_non_finite_value() {
        let err = check_values(&[(LoadKey::Fx, f64::NAN)]).unwrap_err();
        assert!(matches!(err, FEAError::Validation(_)));
        assert!(err.to_string().contains("Fx"));
    }
}
