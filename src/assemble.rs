//! Five-point finite-difference discretization of $-Delta u = f$.
//!
//! Row $k$ of the system reads
//! $4 u_k - sum_(l in N(k)) u_l = h^2 f_k + g |B(k)|$,
//! where $N(k)$ are the interior neighbors and $B(k)$ the boundary neighbors
//! of point $k$, carrying the Dirichlet value $g$.
//! No matrix entry is created for a boundary neighbor.

use crate::{
  grid::Grid,
  source::SourceField,
  sparse::SparseMatrix,
  Error, Result,
};

/// Entries per row of the five-point stencil.
pub const STENCIL_SIZE: usize = 5;

/// Discrete negative Laplacian on the interior unknowns, scaled by $h^2$.
pub fn assemble_laplacian(grid: &Grid) -> SparseMatrix {
  let nunknowns = grid.nunknowns();
  let mut mat = SparseMatrix::with_capacity(nunknowns, nunknowns, STENCIL_SIZE * nunknowns);
  for p in grid.points() {
    let k = grid.flat_index(p);
    mat.push(k, k, 4.0);
    for q in grid.neighbors(p) {
      mat.push(k, grid.flat_index(q), -1.0);
    }
  }
  mat
}

/// Right-hand side $h^2 f_k$, plus the moved-over Dirichlet values.
pub fn assemble_rhs<S>(grid: &Grid, source: &S, boundary_value: f64) -> Result<na::DVector<f64>>
where
  S: SourceField + ?Sized,
{
  if !boundary_value.is_finite() {
    return Err(Error::invalid(format!(
      "boundary value must be finite, got {boundary_value}"
    )));
  }
  source.check_grid(grid)?;

  let h2 = grid.mesh_width().powi(2);
  let mut rhs = na::DVector::zeros(grid.nunknowns());
  for p in grid.points() {
    let f = source.eval(grid, p);
    if !f.is_finite() {
      return Err(Error::invalid(format!(
        "source value at (i={}, j={}) is not finite: {f}",
        p.i, p.j
      )));
    }

    let k = grid.flat_index(p);
    rhs[k] = h2 * f;
    if boundary_value != 0.0 {
      rhs[k] += boundary_value * grid.nboundary_neighbors(p) as f64;
    }
  }
  Ok(rhs)
}

/// Assembles the full linear system $A U = F$.
///
/// The right-hand side is validated first, so an invalid source
/// never produces a matrix.
pub fn assemble_system<S>(
  grid: &Grid,
  source: &S,
  boundary_value: f64,
) -> Result<(SparseMatrix, na::DVector<f64>)>
where
  S: SourceField + ?Sized,
{
  let rhs = assemble_rhs(grid, source, boundary_value)?;
  let mat = assemble_laplacian(grid);
  tracing::debug!(
    nnodes_axis = grid.nnodes_axis(),
    nunknowns = grid.nunknowns(),
    nnz = mat.ntriplets(),
    "assembled finite-difference system"
  );
  Ok((mat, rhs))
}
