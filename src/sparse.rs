//! Triplet (COO) matrix used during assembly.
//!
//! Duplicate entries are summed on conversion.

use crate::{Error, Result};

#[derive(Debug, Default, Clone)]
pub struct SparseMatrix {
  nrows: usize,
  ncols: usize,
  triplets: Vec<(usize, usize, f64)>,
}

impl SparseMatrix {
  pub fn zeros(nrows: usize, ncols: usize) -> Self {
    Self::new(nrows, ncols, Vec::new())
  }
  pub fn new(nrows: usize, ncols: usize, triplets: Vec<(usize, usize, f64)>) -> Self {
    Self {
      nrows,
      ncols,
      triplets,
    }
  }
  pub fn with_capacity(nrows: usize, ncols: usize, capacity: usize) -> Self {
    Self::new(nrows, ncols, Vec::with_capacity(capacity))
  }

  pub fn nrows(&self) -> usize {
    self.nrows
  }
  pub fn ncols(&self) -> usize {
    self.ncols
  }
  pub fn ntriplets(&self) -> usize {
    self.triplets.len()
  }

  pub fn push(&mut self, r: usize, c: usize, v: f64) {
    debug_assert!(r < self.nrows && c < self.ncols);
    if v != 0.0 {
      self.triplets.push((r, c, v));
    }
  }

  pub fn transpose(&self) -> Self {
    let triplets = self.triplets.iter().map(|&(r, c, v)| (c, r, v)).collect();
    Self::new(self.ncols, self.nrows, triplets)
  }

  /// Computes $A x$ directly from the triplets.
  pub fn mul_vec(&self, x: &na::DVector<f64>) -> na::DVector<f64> {
    assert_eq!(x.len(), self.ncols, "dimension mismatch in matrix-vector product");
    let mut y = na::DVector::zeros(self.nrows);
    for &(r, c, v) in &self.triplets {
      y[r] += v * x[c];
    }
    y
  }

  pub fn to_nalgebra_coo(&self) -> Result<nas::CooMatrix<f64>> {
    let rows = self.triplets.iter().map(|t| t.0).collect();
    let cols = self.triplets.iter().map(|t| t.1).collect();
    let vals = self.triplets.iter().map(|t| t.2).collect();
    nas::CooMatrix::try_from_triplets(self.nrows, self.ncols, rows, cols, vals)
      .map_err(|e| Error::invalid(format!("malformed triplets: {e}")))
  }

  pub fn to_nalgebra_csc(&self) -> Result<nas::CscMatrix<f64>> {
    Ok((&self.to_nalgebra_coo()?).into())
  }

  /// Dense copy. Needs $O(n_"rows" n_"cols")$ memory.
  pub fn to_nalgebra_dense(&self) -> Result<na::DMatrix<f64>> {
    Ok((&self.to_nalgebra_coo()?).into())
  }
}
