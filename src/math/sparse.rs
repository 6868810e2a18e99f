//! Sparse storage and a skyline Cholesky factorisation for the reduced system
//!
//! Path elements only couple consecutive sample points, so the reduced
//! stiffness matrix is banded once points are numbered along the paths.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// Entries smaller than this are not stored
const DROP_TOLERANCE: f64 = 1e-300;

/// Sparse matrix builder using COO triplets; duplicate entries accumulate
pub struct SparseMatrixBuilder {
    size: usize,
    entries: Vec<(usize, usize, f64)>,
}

impl SparseMatrixBuilder {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            entries: Vec::with_capacity(size * 24),
        }
    }

    /// Copy the non-zero entries of a dense matrix
    pub fn from_dense(dense: &DMatrix<f64>) -> Self {
        let mut builder = Self::new(dense.nrows());
        for col in 0..dense.ncols() {
            for row in 0..dense.nrows() {
                builder.add(row, col, dense[(row, col)]);
            }
        }
        builder
    }

    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        if value.abs() > DROP_TOLERANCE {
            self.entries.push((row, col, value));
        }
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn to_csr(&self) -> CsrMatrix<f64> {
        let mut coo = CooMatrix::new(self.size, self.size);
        for &(row, col, value) in &self.entries {
            coo.push(row, col, value);
        }
        CsrMatrix::from(&coo)
    }
}

/// Cholesky factor of a symmetric positive definite matrix in skyline
/// (variable band) storage. Row `i` keeps columns `i - heights[i] ..= i`.
#[derive(Debug, Clone)]
pub struct SkylineCholesky {
    rows: Vec<Vec<f64>>,
    heights: Vec<usize>,
}

impl SkylineCholesky {
    /// Factor the lower triangle of `csr`.
    ///
    /// Fails when a pivot drops to `pivot_tolerance` times the largest
    /// diagonal entry or below, i.e. the matrix is singular or indefinite.
    pub fn factor(csr: &CsrMatrix<f64>, pivot_tolerance: f64) -> Result<Self, String> {
        let size = csr.nrows();
        let mut heights = vec![0usize; size];
        for (row, col, _) in csr.triplet_iter() {
            if col < row {
                heights[row] = heights[row].max(row - col);
            }
        }

        let mut rows: Vec<Vec<f64>> = heights.iter().map(|&h| vec![0.0; h + 1]).collect();
        let mut max_diag = 0.0_f64;
        for (row, col, &value) in csr.triplet_iter() {
            if col <= row {
                rows[row][col + heights[row] - row] += value;
                if col == row {
                    max_diag = max_diag.max(value.abs());
                }
            }
        }

        let mut factor = Self { rows, heights };
        factor.factorize(pivot_tolerance * max_diag)?;
        Ok(factor)
    }

    fn first_col(&self, row: usize) -> usize {
        row - self.heights[row]
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> f64 {
        let start = self.first_col(row);
        if col < start {
            0.0
        } else {
            self.rows[row][col - start]
        }
    }

    fn factorize(&mut self, min_pivot: f64) -> Result<(), String> {
        for i in 0..self.rows.len() {
            let start_i = self.first_col(i);
            for j in start_i..i {
                let start = start_i.max(self.first_col(j));
                let sum: f64 = (start..j).map(|k| self.get(i, k) * self.get(j, k)).sum();
                let l_jj = self.get(j, j);
                self.rows[i][j - start_i] = (self.rows[i][j - start_i] - sum) / l_jj;
            }
            let sum: f64 = (start_i..i).map(|k| self.get(i, k).powi(2)).sum();
            let pivot = self.rows[i][i - start_i] - sum;
            if pivot <= min_pivot {
                return Err(format!(
                    "non-positive pivot {:e} at reduced DOF {} (threshold {:e})",
                    pivot, i, min_pivot
                ));
            }
            self.rows[i][i - start_i] = pivot.sqrt();
        }
        Ok(())
    }

    /// Solve `L · Lᵀ · x = b`
    pub fn solve(&self, b: &DVector<f64>) -> DVector<f64> {
        let n = self.rows.len();
        let mut x = b.clone();
        for i in 0..n {
            let start = self.first_col(i);
            let sum: f64 = (start..i).map(|j| self.get(i, j) * x[j]).sum();
            x[i] = (x[i] - sum) / self.get(i, i);
        }
        for i in (0..n).rev() {
            x[i] /= self.get(i, i);
            let start = self.first_col(i);
            for j in start..i {
                x[j] -= self.get(i, j) * x[i];
            }
        }
        x
    }
}
