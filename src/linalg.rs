//! Direct solvers for the assembled system.
//!
//! The sparse solvers go through faer, the dense one through nalgebra.
//! Every solution is checked against its residual before it is handed out.

use crate::{sparse::SparseMatrix, Error, Result};

use faer::solvers::SpSolver;

use std::panic::{self, AssertUnwindSafe};

/// Above this many unknowns the dense solver logs a warning.
pub const DENSE_UNKNOWNS_WARN: usize = 2500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SolverKind {
  /// Sparse Cholesky, exploits symmetric positive definiteness.
  #[default]
  SparseCholesky,
  SparseLu,
  /// Dense LU with partial pivoting. $O(n^2)$ memory.
  DenseLu,
}

type SparseMatrixFaer = faer::sparse::SparseColMat<usize, f64>;

pub fn nalgebra2faer(m: nas::CscMatrix<f64>) -> SparseMatrixFaer {
  let nrows = m.nrows();
  let ncols = m.ncols();
  let (col_ptrs, row_indices, values) = m.disassemble();

  let symbolic =
    faer::sparse::SymbolicSparseColMat::new_checked(nrows, ncols, col_ptrs, None, row_indices);
  faer::sparse::SparseColMat::new(symbolic, values)
}

pub struct FaerCholesky {
  raw: faer::sparse::linalg::solvers::Cholesky<usize, f64>,
}
impl FaerCholesky {
  pub fn new(a: nas::CscMatrix<f64>) -> Result<Self> {
    let raw = nalgebra2faer(a)
      .sp_cholesky(faer::Side::Upper)
      .map_err(|e| Error::singular(format!("sparse cholesky factorization failed: {e:?}")))?;
    Ok(Self { raw })
  }

  pub fn solve(&self, b: &na::DVector<f64>) -> na::DVector<f64> {
    let b = faer::col::from_slice(b.as_slice());
    na::DVector::from_vec(self.raw.solve(b).as_slice().to_vec())
  }
}

pub struct FaerLu {
  raw: faer::sparse::linalg::solvers::Lu<usize, f64>,
}
impl FaerLu {
  /// faer panics on an exactly vanishing pivot, that panic is reported as
  /// [`Error::SingularSystem`] like the symbolic failures.
  pub fn new(a: nas::CscMatrix<f64>) -> Result<Self> {
    let a = nalgebra2faer(a);
    let raw = panic::catch_unwind(AssertUnwindSafe(|| a.sp_lu()))
      .map_err(|_| Error::singular("sparse lu factorization hit a zero pivot"))?
      .map_err(|e| Error::singular(format!("sparse lu factorization failed: {e:?}")))?;
    Ok(Self { raw })
  }

  pub fn solve(&self, b: &na::DVector<f64>) -> na::DVector<f64> {
    let b = faer::col::from_slice(b.as_slice());
    na::DVector::from_vec(self.raw.solve(b).as_slice().to_vec())
  }
}

pub struct DenseLu {
  raw: na::LU<f64, na::Dyn, na::Dyn>,
}
impl DenseLu {
  pub fn new(a: na::DMatrix<f64>) -> Self {
    Self { raw: a.lu() }
  }

  /// `None` if a pivot vanished.
  pub fn solve(&self, b: &na::DVector<f64>) -> Option<na::DVector<f64>> {
    self.raw.solve(b)
  }
}

/// $norm(A u - b)_2$
pub fn residual_norm(a: &SparseMatrix, u: &na::DVector<f64>, b: &na::DVector<f64>) -> f64 {
  (a.mul_vec(u) - b).norm()
}

/// Residual relative to the right-hand side, absolute if $b = 0$.
pub fn relative_residual(a: &SparseMatrix, u: &na::DVector<f64>, b: &na::DVector<f64>) -> f64 {
  let residual = residual_norm(a, u, b);
  let bnorm = b.norm();
  if bnorm > 0.0 {
    residual / bnorm
  } else {
    residual
  }
}

/// Solves $A u = b$ without touching `a` or `b`.
///
/// Fails with [`Error::SingularSystem`] if the factorization breaks down,
/// the solution is not finite or its relative residual exceeds `tolerance`.
pub fn solve_system(
  kind: SolverKind,
  a: &SparseMatrix,
  b: &na::DVector<f64>,
  tolerance: f64,
) -> Result<na::DVector<f64>> {
  if a.nrows() != a.ncols() || a.nrows() != b.len() {
    return Err(Error::invalid(format!(
      "system dimensions do not match: matrix {}x{}, rhs {}",
      a.nrows(),
      a.ncols(),
      b.len()
    )));
  }
  if !(tolerance.is_finite() && tolerance > 0.0) {
    return Err(Error::invalid(format!(
      "residual tolerance must be positive and finite, got {tolerance}"
    )));
  }

  let u = match kind {
    SolverKind::SparseCholesky => FaerCholesky::new(a.to_nalgebra_csc()?)?.solve(b),
    SolverKind::SparseLu => FaerLu::new(a.to_nalgebra_csc()?)?.solve(b),
    SolverKind::DenseLu => {
      if a.nrows() > DENSE_UNKNOWNS_WARN {
        tracing::warn!(
          nunknowns = a.nrows(),
          "dense solve on a large system, consider a sparse solver"
        );
      }
      DenseLu::new(a.to_nalgebra_dense()?)
        .solve(b)
        .ok_or_else(|| Error::singular("dense lu hit a zero pivot"))?
    }
  };

  if let Some(k) = u.iter().position(|v| !v.is_finite()) {
    return Err(Error::singular(format!(
      "solution entry {k} is not finite ({})",
      u[k]
    )));
  }
  let residual = relative_residual(a, &u, b);
  tracing::debug!(?kind, residual, "solved linear system");
  if residual > tolerance {
    return Err(Error::singular(format!(
      "relative residual {residual:e} exceeds tolerance {tolerance:e}"
    )));
  }

  Ok(u)
}
