//! Partitioned solve of the mixed known-displacement / known-force system

use log::debug;
use nalgebra::{DMatrix, DVector};

use super::{AnalysisOptions, SolverBackend};
use crate::error::{FEAError, FEAResult};
use crate::math::{SkylineCholesky, SparseMatrixBuilder, StiffnessTensor, Vec6};

/// Assembled `(K, F, U)` for one analysis.
///
/// Every `(point, dof)` cell has either a prescribed displacement
/// (`u[point][dof] = Some(_)`) or a given external force in `f`.
#[derive(Debug, Clone)]
pub struct GlobalSystem {
    pub k: StiffnessTensor,
    pub f: Vec<Vec6>,
    pub u: Vec<[Option<f64>; 6]>,
}

/// Fully determined displacements and forces (reactions on prescribed cells)
#[derive(Debug, Clone)]
pub struct SolvedSystem {
    pub displacements: Vec<Vec6>,
    pub forces: Vec<Vec6>,
}

impl GlobalSystem {
    pub fn npts(&self) -> usize {
        self.k.npts()
    }

    /// Flat indices `6 * point + dof` of prescribed and free cells
    pub fn partition(&self) -> (Vec<usize>, Vec<usize>) {
        (0..6 * self.npts()).partition(|&i| self.u[i / 6][i % 6].is_some())
    }
}

/// Solve `K_RR · U_R = F_R − K_RD · U_D`, then recover `F_D = K_DR · U_R + K_DD · U_D`.
///
/// `D` holds the cells with prescribed displacement, `R` the rest. A singular
/// `K_RR` means the free DOFs admit a rigid-body mode and fails with
/// [`FEAError::SingularMatrix`]; no regularisation is attempted.
pub fn solve(system: &GlobalSystem, options: &AnalysisOptions) -> FEAResult<SolvedSystem> {
    let n = 6 * system.npts();
    let (known, free) = system.partition();
    debug!(
        "partitioned solve: {} DOFs, {} prescribed, {} free",
        n,
        known.len(),
        free.len()
    );

    let k = system.k.as_matrix();
    let f_given = DVector::from_iterator(n, system.f.iter().flat_map(|f| f.iter().copied()));
    let u_known = DVector::from_iterator(
        known.len(),
        known.iter().map(|&i| system.u[i / 6][i % 6].unwrap_or_default()),
    );

    let mut u_full = DVector::zeros(n);
    for (&i, &value) in known.iter().zip(u_known.iter()) {
        u_full[i] = value;
    }

    if !free.is_empty() {
        let k_free = k.select_rows(free.iter());
        let k_rr = k_free.select_columns(free.iter());
        let k_rd = k_free.select_columns(known.iter());
        let f_r = DVector::from_iterator(free.len(), free.iter().map(|&i| f_given[i]));
        let rhs = f_r - k_rd * &u_known;

        let u_free = match options.backend {
            SolverBackend::DenseLu => solve_dense(k_rr, &rhs, options.pivot_tolerance)?,
            SolverBackend::SkylineCholesky => solve_skyline(&k_rr, &rhs, options.pivot_tolerance)?,
        };
        if u_free.iter().any(|v| !v.is_finite()) {
            return Err(FEAError::SingularMatrix(
                "solution contains non-finite displacements".to_string(),
            ));
        }
        for (&i, &value) in free.iter().zip(u_free.iter()) {
            u_full[i] = value;
        }
    }

    // Free cells keep their given force; prescribed cells get K_D · U
    let mut f_full = f_given;
    if !known.is_empty() {
        let reactions = k.select_rows(known.iter()) * &u_full;
        for (&i, &value) in known.iter().zip(reactions.iter()) {
            f_full[i] = value;
        }
    }

    let unflatten = |v: &DVector<f64>| -> Vec<Vec6> {
        v.as_slice()
            .chunks_exact(6)
            .map(Vec6::from_column_slice)
            .collect()
    };
    Ok(SolvedSystem {
        displacements: unflatten(&u_full),
        forces: unflatten(&f_full),
    })
}

fn solve_dense(k_rr: DMatrix<f64>, rhs: &DVector<f64>, pivot_tolerance: f64) -> FEAResult<DVector<f64>> {
    let scale = k_rr.diagonal().amax();
    let lu = k_rr.lu();
    let min_pivot = lu
        .u()
        .diagonal()
        .iter()
        .fold(f64::INFINITY, |acc, p| acc.min(p.abs()));
    if !(min_pivot > pivot_tolerance * scale) {
        return Err(FEAError::SingularMatrix(format!(
            "smallest pivot {:e} against largest stiffness {:e} over {} free DOFs",
            min_pivot,
            scale,
            rhs.len()
        )));
    }
    lu.solve(rhs).ok_or_else(|| {
        FEAError::SingularMatrix(format!("LU solve failed over {} free DOFs", rhs.len()))
    })
}

fn solve_skyline(k_rr: &DMatrix<f64>, rhs: &DVector<f64>, pivot_tolerance: f64) -> FEAResult<DVector<f64>> {
    let csr = SparseMatrixBuilder::from_dense(k_rr).to_csr();
    let factor = SkylineCholesky::factor(&csr, pivot_tolerance).map_err(FEAError::SingularMatrix)?;
    Ok(factor.solve(rhs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two collinear axial springs of stiffness k along DOF 0, three points
    fn spring_chain(k: f64) -> StiffnessTensor {
        let mut tensor = StiffnessTensor::zeros(3);
        for (a, b) in [(0, 1), (1, 2)] {
            tensor.add(a, 0, a, 0, k);
            tensor.add(b, 0, b, 0, k);
            tensor.add(a, 0, b, 0, -k);
            tensor.add(b, 0, a, 0, -k);
        }
        tensor
    }

    /// Point 0 fully fixed, every other DOF pinned except the axial chain
    fn chain_system(k: f64, load: f64) -> GlobalSystem {
        let mut u = vec![[Some(0.0); 6]; 3];
        u[1][0] = None;
        u[2][0] = None;
        let mut f = vec![Vec6::zeros(); 3];
        f[2][0] = load;
        GlobalSystem {
            k: spring_chain(k),
            f,
            u,
        }
    }

    #[test]
    fn test_chain_displacements_and_reaction() {
        let system = chain_system(4.0, 2.0);
        for backend in [SolverBackend::DenseLu, SolverBackend::SkylineCholesky] {
            let options = AnalysisOptions::default().with_backend(backend);
            let solved = solve(&system, &options).unwrap();
            assert_relative_eq!(solved.displacements[1][0], 0.5, epsilon = 1e-12);
            assert_relative_eq!(solved.displacements[2][0], 1.0, epsilon = 1e-12);
            assert_relative_eq!(solved.forces[0][0], -2.0, epsilon = 1e-12);
            assert_relative_eq!(solved.forces[2][0], 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_prescribed_displacement_drives_solution() {
        let mut system = chain_system(4.0, 0.0);
        system.u[2][0] = Some(0.3);
        let solved = solve(&system, &AnalysisOptions::default()).unwrap();
        assert_relative_eq!(solved.displacements[1][0], 0.15, epsilon = 1e-12);
        assert_relative_eq!(solved.forces[2][0], 0.6, epsilon = 1e-12);
        assert_relative_eq!(solved.forces[0][0], -0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_floating_chain_is_singular() {
        let mut system = chain_system(4.0, 1.0);
        system.u[0][0] = None;
        for backend in [SolverBackend::DenseLu, SolverBackend::SkylineCholesky] {
            let options = AnalysisOptions::default().with_backend(backend);
            assert!(matches!(
                solve(&system, &options),
                Err(FEAError::SingularMatrix(_))
            ));
        }
    }

    #[test]
    fn test_everything_prescribed() {
        let mut system = chain_system(4.0, 0.0);
        system.u = vec![[Some(0.0); 6]; 3];
        system.u[1][0] = Some(1.0);
        let solved = solve(&system, &AnalysisOptions::default()).unwrap();
        assert_relative_eq!(solved.forces[1][0], 8.0, epsilon = 1e-12);
        assert_relative_eq!(solved.forces[0][0], -4.0, epsilon = 1e-12);
    }
}
