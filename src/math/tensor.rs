//! Four-index stiffness tensor (node_i, dof_i, node_j, dof_j)

use nalgebra::{DMatrix, DVector, Matrix6};

use super::{Mat12, Vec6};

/// Linear coupling between nodal displacements and nodal forces, stored as a
/// dense `(6·npts) x (6·npts)` matrix addressed by `(node, dof)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct StiffnessTensor {
    npts: usize,
    data: DMatrix<f64>,
}

impl StiffnessTensor {
    pub fn zeros(npts: usize) -> Self {
        Self {
            npts,
            data: DMatrix::zeros(6 * npts, 6 * npts),
        }
    }

    /// Number of points (the tensor has shape `(npts, 6, npts, 6)`)
    pub fn npts(&self) -> usize {
        self.npts
    }

    #[inline]
    pub fn get(&self, node_i: usize, dof_i: usize, node_j: usize, dof_j: usize) -> f64 {
        self.data[(6 * node_i + dof_i, 6 * node_j + dof_j)]
    }

    #[inline]
    pub fn add(&mut self, node_i: usize, dof_i: usize, node_j: usize, dof_j: usize, value: f64) {
        self.data[(6 * node_i + dof_i, 6 * node_j + dof_j)] += value;
    }

    /// 6x6 block coupling two nodes
    pub fn node_block(&self, node_i: usize, node_j: usize) -> Matrix6<f64> {
        self.data
            .fixed_view::<6, 6>(6 * node_i, 6 * node_j)
            .into_owned()
    }

    /// Add a two-node segment block onto nodes `i` and `j`
    pub fn add_segment(&mut self, i: usize, j: usize, block: &Mat12) {
        let nodes = [i, j];
        for (a, &na) in nodes.iter().enumerate() {
            for (b, &nb) in nodes.iter().enumerate() {
                let mut target = self.data.fixed_view_mut::<6, 6>(6 * na, 6 * nb);
                target += block.fixed_view::<6, 6>(6 * a, 6 * b);
            }
        }
    }

    /// Scatter-add another tensor whose local node `k` maps to `indices[k]`
    pub fn add_scattered(&mut self, other: &StiffnessTensor, indices: &[usize]) {
        debug_assert_eq!(other.npts, indices.len());
        for (a, &na) in indices.iter().enumerate() {
            for (b, &nb) in indices.iter().enumerate() {
                let mut target = self.data.fixed_view_mut::<6, 6>(6 * na, 6 * nb);
                target += other.data.fixed_view::<6, 6>(6 * a, 6 * b);
            }
        }
    }

    /// Contract with per-node displacement vectors: `F[i] = Σ_j K[i, :, j, :] · U[j]`
    pub fn apply(&self, displacements: &[Vec6]) -> Vec<Vec6> {
        let flat = DVector::from_iterator(
            6 * displacements.len(),
            displacements.iter().flat_map(|u| u.iter().copied()),
        );
        let forces = &self.data * flat;
        forces
            .as_slice()
            .chunks_exact(6)
            .map(Vec6::from_column_slice)
            .collect()
    }

    /// Flattened `(6·npts) x (6·npts)` view, row/column index `6 * node + dof`
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// True when `K[i,a,j,b] == K[j,b,i,a]` within `tolerance` relative to the largest entry
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let scale = self.data.amax().max(f64::MIN_POSITIVE);
        (&self.data - self.data.transpose()).amax() <= tolerance * scale
    }
}
