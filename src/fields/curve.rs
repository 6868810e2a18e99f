//! Finite, restartable curves over sampled nodal values

use serde::{Deserialize, Serialize};

use crate::error::{FEAError, FEAResult};
use crate::math::Vec3;

/// How a curve is evaluated between its nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Degree 0: value of the node at or before the parameter
    Step,
    /// Degree 1: straight line between neighbouring nodes
    #[default]
    Linear,
}

impl Interpolation {
    pub fn degree(self) -> usize {
        match self {
            Self::Step => 0,
            Self::Linear => 1,
        }
    }
}

/// A vector-valued curve over [0, 1] defined by values at increasing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    params: Vec<f64>,
    values: Vec<Vec3>,
    interpolation: Interpolation,
}

impl Curve {
    /// Piecewise-linear curve through `values` at `params`.
    ///
    /// Parameters must be non-empty, finite, strictly increasing and match
    /// the values one to one.
    pub fn new(params: Vec<f64>, values: Vec<Vec3>) -> FEAResult<Self> {
        if params.is_empty() || params.len() != values.len() {
            return Err(FEAError::Validation(format!(
                "a curve needs one value per parameter, got {} parameters and {} values",
                params.len(),
                values.len()
            )));
        }
        if params.iter().any(|t| !t.is_finite()) || params.windows(2).any(|w| w[0] >= w[1]) {
            return Err(FEAError::Validation(format!(
                "curve parameters {:?} are not strictly increasing",
                params
            )));
        }
        Ok(Self::from_samples(params, values))
    }

    /// Curve over element samples, which are valid by construction
    pub(crate) fn from_samples(params: Vec<f64>, values: Vec<Vec3>) -> Self {
        debug_assert!(!params.is_empty());
        debug_assert_eq!(params.len(), values.len());
        Self {
            params,
            values,
            interpolation: Interpolation::default(),
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn parameters(&self) -> &[f64] {
        &self.params
    }

    /// Nodal values, one per parameter
    pub fn values(&self) -> &[Vec3] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over `(parameter, value)` nodes; each call starts from the beginning
    pub fn iter(&self) -> impl Iterator<Item = (f64, &Vec3)> + '_ {
        self.params.iter().copied().zip(self.values.iter())
    }

    /// Evaluate at a parameter; values outside [0, 1] are clamped to the ends
    pub fn eval(&self, t: f64) -> Vec3 {
        let last = self.params.len() - 1;
        if last == 0 || t <= self.params[0] {
            return self.values[0];
        }
        if t >= self.params[last] {
            return self.values[last];
        }
        let k = self.params.partition_point(|&p| p <= t) - 1;
        match self.interpolation {
            Interpolation::Step => self.values[k],
            Interpolation::Linear => {
                let s = (t - self.params[k]) / (self.params[k + 1] - self.params[k]);
                self.values[k] * (1.0 - s) + self.values[k + 1] * s
            }
        }
    }

    pub fn eval_many(&self, ts: &[f64]) -> Vec<Vec3> {
        ts.iter().map(|&t| self.eval(t)).collect()
    }

    /// Pointwise sum of two curves sampled at the same parameters
    pub fn plus(&self, other: &Curve) -> FEAResult<Curve> {
        if self.params != other.params {
            return Err(FEAError::Validation(format!(
                "cannot add curves sampled at {} and {} different parameters",
                self.params.len(),
                other.params.len()
            )));
        }
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Curve {
            params: self.params.clone(),
            values,
            interpolation: self.interpolation,
        })
    }
}
