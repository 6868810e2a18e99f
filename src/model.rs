//! Static model - the per-analysis assembly context

use log::{debug, info, log, warn, Level};
use serde::{Deserialize, Serialize};

use crate::analysis::{self, AnalysisOptions, GlobalSystem};
use crate::elements::Element;
use crate::error::{FEAError, FEAResult};
use crate::fields::{Curve, FieldName};
use crate::geometry::{Point3, PointRegistry};
use crate::loads::{self, BoundaryEntry, BoundaryKey, DofKey, LoadEntry, LoadKey};
use crate::math::{StiffnessTensor, Vec6};
use crate::results::{AnalysisSummary, NodeDisplacement, Reactions};

/// Handle to an element added to a [`StaticModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub usize);

/// Solved state of the whole model
#[derive(Debug, Clone)]
struct Solution {
    registry: PointRegistry,
    displacements: Vec<Vec6>,
    forces: Vec<Vec6>,
    supported: Vec<bool>,
    known_dofs: usize,
}

/// A linear static model of beam and truss elements.
///
/// Elements, loads and boundary conditions accumulate until [`StaticModel::run`].
/// Points are identified by position: loads and boundary conditions attach to
/// whichever element sample point lies within the point tolerance. Any
/// mutation discards previous results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticModel {
    options: AnalysisOptions,
    elements: Vec<Element>,
    loads: Vec<LoadEntry>,
    boundary: Vec<BoundaryEntry>,

    #[serde(skip)]
    solution: Option<Solution>,
}

impl StaticModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model bound to `options`
    pub fn with_options(options: AnalysisOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add an element to the model
    pub fn add_element(&mut self, element: Element) -> ElementId {
        self.clear_results();
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn loads(&self) -> &[LoadEntry] {
        &self.loads
    }

    pub fn boundary_conditions(&self) -> &[BoundaryEntry] {
        &self.boundary
    }

    /// Add concentrated forces/moments at a point. Repeated entries accumulate.
    pub fn add_concentrated_load(&mut self, point: [f64; 3], values: &[(LoadKey, f64)]) -> FEAResult<()> {
        let point = Point3::from(point);
        loads::check_point(&point)?;
        loads::check_values(values)?;

        self.clear_results();
        self.loads.extend(values.iter().map(|&(key, value)| LoadEntry { point, key, value }));
        Ok(())
    }

    /// Add concentrated loads keyed by name (`Fx`, `Fy`, `Fz`, `Mx`, `My`, `Mz`)
    pub fn add_concentrated_load_by_name(&mut self, point: [f64; 3], values: &[(&str, f64)]) -> FEAResult<()> {
        let parsed = loads::parse_values::<LoadKey>(values)?;
        self.add_concentrated_load(point, &parsed)
    }

    /// Prescribe displacements/rotations at a point. A later entry on the same DOF wins.
    pub fn add_boundary_condition(&mut self, point: [f64; 3], values: &[(BoundaryKey, f64)]) -> FEAResult<()> {
        let point = Point3::from(point);
        loads::check_point(&point)?;
        loads::check_values(values)?;

        self.clear_results();
        self.boundary
            .extend(values.iter().map(|&(key, value)| BoundaryEntry { point, key, value }));
        Ok(())
    }

    /// Prescribe displacements keyed by name (`Ux`, `Uy`, `Uz`, `tx`, `ty`, `tz`)
    pub fn add_boundary_condition_by_name(&mut self, point: [f64; 3], values: &[(&str, f64)]) -> FEAResult<()> {
        let parsed = loads::parse_values::<BoundaryKey>(values)?;
        self.add_boundary_condition(point, &parsed)
    }

    /// Distributed loads are not supported; the model is left untouched.
    pub fn add_distributed_load(&mut self, id: ElementId, values: &[(LoadKey, f64)]) -> FEAResult<()> {
        let keys = values
            .iter()
            .map(|(key, _)| key.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(FEAError::UnsupportedLoad(format!(
            "distributed [{}] on element {}",
            keys, id.0
        )))
    }

    // ========================
    // Assembly
    // ========================

    /// Register every sample point of every element
    pub fn register_points(&self) -> PointRegistry {
        let mut registry = PointRegistry::new(self.options.point_tolerance);
        for element in &self.elements {
            for point in element.points() {
                registry.register(point);
            }
        }
        registry
    }

    /// Global index of each sample point of `element`
    fn element_indices(element: &Element, registry: &PointRegistry) -> FEAResult<Vec<usize>> {
        element
            .points()
            .iter()
            .map(|p| registry.find(p).ok_or_else(|| FEAError::point_not_found(p)))
            .collect()
    }

    /// Assemble the global stiffness tensor
    pub fn mount_k(&self, registry: &PointRegistry) -> FEAResult<StiffnessTensor> {
        let mut k = StiffnessTensor::zeros(registry.len());
        for (index, element) in self.elements.iter().enumerate() {
            let indices = Self::element_indices(element, registry)?;
            if let Some(segment) = indices.windows(2).position(|w| w[0] == w[1]) {
                let p = &element.points()[segment];
                return Err(FEAError::InvalidGeometry(format!(
                    "element {} segment {} at ({}, {}, {}) is shorter than the point tolerance {}",
                    index,
                    segment,
                    p.x,
                    p.y,
                    p.z,
                    registry.tolerance()
                )));
            }
            k.add_scattered(&element.stiffness_matrix()?, &indices);
            debug!(
                "element {} ({}): {} sample points scattered",
                index,
                element.kind(),
                indices.len()
            );
        }
        Ok(k)
    }

    /// Assemble the external force vector; duplicate entries add up
    pub fn mount_f(&self, registry: &PointRegistry) -> FEAResult<Vec<Vec6>> {
        let mut f = vec![Vec6::zeros(); registry.len()];
        for load in &self.loads {
            let index = registry
                .find(&load.point)
                .ok_or_else(|| FEAError::point_not_found(&load.point))?;
            f[index][load.key.dof()] += load.value;
        }
        Ok(f)
    }

    /// Assemble the prescribed displacements; unnamed cells stay unknown
    pub fn mount_u(&self, registry: &PointRegistry) -> FEAResult<Vec<[Option<f64>; 6]>> {
        let mut u = vec![[None; 6]; registry.len()];
        for bc in &self.boundary {
            let index = registry
                .find(&bc.point)
                .ok_or_else(|| FEAError::point_not_found(&bc.point))?;
            let cell = &mut u[index][bc.key.dof()];
            if let Some(previous) = cell.replace(bc.value) {
                warn!(
                    "boundary condition {} at ({}, {}, {}) overwritten: {} -> {}",
                    bc.key, bc.point.x, bc.point.y, bc.point.z, previous, bc.value
                );
            }
        }
        Ok(u)
    }

    // ========================
    // Analysis Methods
    // ========================

    /// Assemble, solve and attach the solved displacements to every element.
    ///
    /// On failure the model keeps no results from this or any earlier run.
    pub fn run(&mut self) -> FEAResult<()> {
        self.clear_results();
        if self.elements.is_empty() {
            return Err(FEAError::Validation(
                "no elements: add at least one element before run()".to_string(),
            ));
        }

        let registry = self.register_points();
        info!(
            "static analysis: {} elements, {} points, {} DOFs",
            self.elements.len(),
            registry.len(),
            6 * registry.len()
        );

        let system = GlobalSystem {
            k: self.mount_k(&registry)?,
            f: self.mount_f(&registry)?,
            u: self.mount_u(&registry)?,
        };
        let supported = system.u.iter().map(|cells| cells.iter().any(Option::is_some)).collect();
        let known_dofs = system.u.iter().flatten().filter(|c| c.is_some()).count();

        let solved = analysis::solve(&system, &self.options)?;

        let per_element = self
            .elements
            .iter()
            .map(|element| {
                Self::element_indices(element, &registry)
                    .map(|indices| indices.iter().map(|&i| solved.displacements[i]).collect::<Vec<_>>())
            })
            .collect::<FEAResult<Vec<_>>>()?;
        for (element, displacements) in self.elements.iter_mut().zip(per_element) {
            element.attach_solution(displacements);
        }

        self.solution = Some(Solution {
            registry,
            displacements: solved.displacements,
            forces: solved.forces,
            supported,
            known_dofs,
        });

        let summary = self.summary()?;
        let level = if self.options.log { Level::Info } else { Level::Debug };
        log!(
            level,
            "solved: max displacement {:e} at {:?}, max reaction {:e} at {:?}",
            summary.max_displacement,
            summary.max_disp_point,
            summary.max_reaction,
            summary.max_reaction_point
        );
        info!("static analysis finished, {} free DOFs", summary.free_dofs);
        Ok(())
    }

    fn clear_results(&mut self) {
        if self.solution.take().is_some() {
            debug!("model changed, discarding previous results");
        }
        for element in &mut self.elements {
            element.clear_solution();
        }
    }

    // ========================
    // Result Access Methods
    // ========================

    /// Check if model has been analyzed
    pub fn is_analyzed(&self) -> bool {
        self.solution.is_some()
    }

    fn solved_index(&self, point: [f64; 3]) -> FEAResult<(&Solution, usize)> {
        let solution = self.solution.as_ref().ok_or(FEAError::NotAnalyzed)?;
        let point = Point3::from(point);
        let index = solution
            .registry
            .find(&point)
            .ok_or_else(|| FEAError::point_not_found(&point))?;
        Ok((solution, index))
    }

    /// Solved displacement at a point
    pub fn displacement_at(&self, point: [f64; 3]) -> FEAResult<NodeDisplacement> {
        let (solution, index) = self.solved_index(point)?;
        Ok(NodeDisplacement::from_vector(&solution.displacements[index]))
    }

    /// Solved force at a point (the reaction on prescribed DOFs)
    pub fn reaction_at(&self, point: [f64; 3]) -> FEAResult<Reactions> {
        let (solution, index) = self.solved_index(point)?;
        Ok(Reactions::from_vector(&solution.forces[index]))
    }

    /// Named result field of one element
    pub fn field(&self, id: ElementId, name: &str) -> FEAResult<Curve> {
        let name: FieldName = name.parse()?;
        self.element(id)
            .ok_or_else(|| {
                FEAError::Validation(format!(
                    "element {} does not exist, model has {} elements",
                    id.0,
                    self.elements.len()
                ))
            })?
            .field(name)
    }

    /// Get analysis summary
    pub fn summary(&self) -> FEAResult<AnalysisSummary> {
        let solution = self.solution.as_ref().ok_or(FEAError::NotAnalyzed)?;
        let points = solution.registry.points();

        let mut summary = AnalysisSummary {
            num_points: points.len(),
            num_elements: self.elements.len(),
            total_dofs: 6 * points.len(),
            known_dofs: solution.known_dofs,
            free_dofs: 6 * points.len() - solution.known_dofs,
            ..Default::default()
        };

        for (point, disp) in points.iter().zip(&solution.displacements) {
            let mag = disp.fixed_rows::<3>(0).norm();
            if mag > summary.max_displacement {
                summary.max_displacement = mag;
                summary.max_disp_point = (*point).into();
            }
        }

        for ((point, force), supported) in points.iter().zip(&solution.forces).zip(&solution.supported) {
            let mag = force.fixed_rows::<3>(0).norm();
            if *supported && mag > summary.max_reaction {
                summary.max_reaction = mag;
                summary.max_reaction_point = (*point).into();
            }
        }

        Ok(summary)
    }
}
