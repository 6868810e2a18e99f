//! Sampled piecewise-linear element path

use serde::{Deserialize, Serialize};

use super::Point3;
use crate::error::{FEAError, FEAResult};

/// Segments shorter than this are treated as coincident endpoints
pub(crate) const MIN_SEGMENT_LENGTH: f64 = 1e-10;

/// Parameters closer than this are merged on insertion
const PARAMETER_TOLERANCE: f64 = 1e-12;

/// A polyline through 3D points, parameterised uniformly over [0, 1].
///
/// The sample parameters start as the vertices and can be refined with
/// [`Path::insert_parameters`] without changing the shape of the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    params: Vec<f64>,
    points: Vec<Point3>,
}

impl Path {
    /// Build a path through the given vertices
    pub fn new(vertices: &[[f64; 3]]) -> FEAResult<Self> {
        if vertices.len() < 2 {
            return Err(FEAError::Validation(format!(
                "a path needs at least 2 points, got {}",
                vertices.len()
            )));
        }
        let points: Vec<Point3> = vertices.iter().map(|v| Point3::from(*v)).collect();
        if let Some(p) = points.iter().find(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(FEAError::Validation(format!(
                "path point ({}, {}, {}) has a non-finite coordinate",
                p.x, p.y, p.z
            )));
        }
        for (i, pair) in points.windows(2).enumerate() {
            if (pair[1] - pair[0]).norm() < MIN_SEGMENT_LENGTH {
                return Err(FEAError::InvalidGeometry(format!(
                    "segment {} has coincident endpoints at ({}, {}, {})",
                    i, pair[0].x, pair[0].y, pair[0].z
                )));
            }
        }
        let last = (points.len() - 1) as f64;
        let params = (0..points.len()).map(|i| i as f64 / last).collect();
        Ok(Self { params, points })
    }

    /// Straight path between two points
    pub fn line(start: [f64; 3], end: [f64; 3]) -> FEAResult<Self> {
        Self::new(&[start, end])
    }

    /// Sample parameters in increasing order, first is 0 and last is 1
    pub fn parameters(&self) -> &[f64] {
        &self.params
    }

    /// Points at each sample parameter
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Evaluate the path at a parameter in [0, 1]; values outside are clamped
    pub fn evaluate(&self, t: f64) -> Point3 {
        let t = t.clamp(0.0, 1.0);
        let k = self.segment_of(t);
        let (t0, t1) = (self.params[k], self.params[k + 1]);
        let s = (t - t0) / (t1 - t0);
        self.points[k] + (self.points[k + 1] - self.points[k]) * s
    }

    /// Add sample parameters without changing the path shape
    pub fn insert_parameters(&mut self, ts: &[f64]) -> FEAResult<()> {
        if let Some(t) = ts.iter().find(|t| !(0.0..=1.0).contains(*t)) {
            return Err(FEAError::Validation(format!(
                "sample parameter {} is outside [0, 1]",
                t
            )));
        }
        for &t in ts {
            let k = self.segment_of(t);
            if (t - self.params[k]).abs() < PARAMETER_TOLERANCE
                || (self.params[k + 1] - t).abs() < PARAMETER_TOLERANCE
            {
                continue;
            }
            let point = self.evaluate(t);
            self.params.insert(k + 1, t);
            self.points.insert(k + 1, point);
        }
        Ok(())
    }

    /// Total length of the polyline
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|p| (p[1] - p[0]).norm()).sum()
    }

    fn segment_of(&self, t: f64) -> usize {
        // partition_point gives the first parameter strictly greater than t
        let upper = self.params.partition_point(|&p| p <= t);
        upper.clamp(1, self.params.len() - 1) - 1
    }
}
