//! One-dimensional structural element laid out along a sampled path

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Section, SectionProperties};
use crate::error::FEAResult;
use crate::fields::{self, Curve, FieldName};
use crate::geometry::{Path, Point3};
use crate::math::{self, Mat12, StiffnessTensor, Vec6};

/// Element formulation. Each variant is a pure `(endpoints, properties) -> block` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Axial-only bar
    Truss,
    /// Axial-only cable, linearised (no slack)
    Cable,
    /// Slender beam without shear deformation
    EulerBernoulli,
    /// Beam with first-order shear deformation
    Timoshenko,
}

impl ElementKind {
    /// Global-frame stiffness block of the segment `p0 -> p1`
    pub fn segment_stiffness<P>(self, p0: &Point3, p1: &Point3, props: &P) -> FEAResult<Mat12>
    where
        P: SectionProperties + ?Sized,
    {
        math::segment_stiffness(self, p0, p1, props)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Truss => "truss",
            Self::Cable => "cable",
            Self::EulerBernoulli => "Euler-Bernoulli beam",
            Self::Timoshenko => "Timoshenko beam",
        };
        f.write_str(name)
    }
}

/// A structural element: a path, a section and a formulation.
///
/// After a successful analysis the element carries its solved nodal
/// displacements, from which [`Element::field`] derives result curves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    kind: ElementKind,
    path: Path,
    section: Section,

    /// Solved 6-DOF displacement at each sample point
    #[serde(skip)]
    solution: Option<Vec<Vec6>>,
}

impl Element {
    pub fn new(kind: ElementKind, path: Path, section: Section) -> Self {
        Self {
            kind,
            path,
            section,
            solution: None,
        }
    }

    /// Element along a polyline; fails on coincident consecutive points
    pub fn from_points(kind: ElementKind, points: &[[f64; 3]], section: Section) -> FEAResult<Self> {
        Ok(Self::new(kind, Path::new(points)?, section))
    }

    pub fn euler_bernoulli(points: &[[f64; 3]], section: Section) -> FEAResult<Self> {
        Self::from_points(ElementKind::EulerBernoulli, points, section)
    }

    pub fn timoshenko(points: &[[f64; 3]], section: Section) -> FEAResult<Self> {
        Self::from_points(ElementKind::Timoshenko, points, section)
    }

    pub fn truss(points: &[[f64; 3]], section: Section) -> FEAResult<Self> {
        Self::from_points(ElementKind::Truss, points, section)
    }

    pub fn cable(points: &[[f64; 3]], section: Section) -> FEAResult<Self> {
        Self::from_points(ElementKind::Cable, points, section)
    }

    /// Refine the sampling of the path; discards any attached solution
    pub fn with_parameters(mut self, ts: &[f64]) -> FEAResult<Self> {
        self.path.insert_parameters(ts)?;
        self.solution = None;
        Ok(self)
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Sample points of the path, one per node
    pub fn points(&self) -> &[Point3] {
        self.path.points()
    }

    /// Sample parameters in [0, 1], one per node
    pub fn parameters(&self) -> &[f64] {
        self.path.parameters()
    }

    /// Global-frame block of segment `index` (nodes `index` and `index + 1`)
    pub fn segment_stiffness(&self, index: usize) -> FEAResult<Mat12> {
        let points = self.points();
        self.kind
            .segment_stiffness(&points[index], &points[index + 1], &self.section)
    }

    /// Full `(npts, 6, npts, 6)` stiffness of the element in the global frame
    pub fn stiffness_matrix(&self) -> FEAResult<StiffnessTensor> {
        math::path_stiffness(self.kind, self.points(), &self.section)
    }

    /// Solved nodal displacements, if the element has been analysed
    pub fn solution(&self) -> Option<&[Vec6]> {
        self.solution.as_deref()
    }

    /// Result curve for a field; requires a solved analysis
    pub fn field(&self, name: FieldName) -> FEAResult<Curve> {
        fields::evaluate(self, name)
    }

    /// Result curve by short code (`u`, `p`, `d`, `FI`, `FE`, `MI`, `ME`, `TR`, `VM`)
    pub fn field_by_name(&self, name: &str) -> FEAResult<Curve> {
        self.field(name.parse()?)
    }

    pub(crate) fn attach_solution(&mut self, displacements: Vec<Vec6>) {
        debug_assert_eq!(displacements.len(), self.path.num_points());
        self.solution = Some(displacements);
    }

    pub(crate) fn clear_solution(&mut self) {
        self.solution = None;
    }
}
