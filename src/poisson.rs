//! Module for the Poisson Equation, the prototypical elliptic PDE.
//!
//! Solves $-Delta u = f$ on $[0,1]^2$ with $u = g$ on the boundary.

use crate::{
  assemble,
  grid::{Grid, GridPoint},
  linalg::{self, SolverKind},
  source::SourceField,
  Error, Result,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
  pub solver: SolverKind,
  /// Dirichlet value $g$ on the whole boundary.
  pub boundary_value: f64,
  /// Maximal accepted relative residual $norm(A U - F) / norm(F)$.
  pub residual_tolerance: f64,
}

impl Default for SolverConfig {
  fn default() -> Self {
    Self {
      solver: SolverKind::default(),
      boundary_value: 0.0,
      residual_tolerance: 1e-8,
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct PoissonSolver {
  config: SolverConfig,
}

impl PoissonSolver {
  pub fn new() -> Self {
    Self::default()
  }
  pub fn with_config(config: SolverConfig) -> Self {
    Self { config }
  }

  pub fn solver(mut self, solver: SolverKind) -> Self {
    self.config.solver = solver;
    self
  }
  pub fn boundary_value(mut self, boundary_value: f64) -> Self {
    self.config.boundary_value = boundary_value;
    self
  }
  pub fn residual_tolerance(mut self, residual_tolerance: f64) -> Self {
    self.config.residual_tolerance = residual_tolerance;
    self
  }

  pub fn config(&self) -> &SolverConfig {
    &self.config
  }

  /// Solves on a grid with `nnodes_axis` interior nodes per axis.
  pub fn solve<S>(&self, nnodes_axis: usize, source: &S) -> Result<InteriorSolution>
  where
    S: SourceField + ?Sized,
  {
    let grid = Grid::new(nnodes_axis)?;
    self.solve_on_grid(&grid, source)
  }

  pub fn solve_on_grid<S>(&self, grid: &Grid, source: &S) -> Result<InteriorSolution>
  where
    S: SourceField + ?Sized,
  {
    let config = &self.config;
    if !(config.residual_tolerance.is_finite() && config.residual_tolerance > 0.0) {
      return Err(Error::invalid(format!(
        "residual tolerance must be positive and finite, got {}",
        config.residual_tolerance
      )));
    }

    tracing::info!(
      nnodes_axis = grid.nnodes_axis(),
      nunknowns = grid.nunknowns(),
      solver = ?config.solver,
      "solving poisson problem"
    );

    let (sysmat, sysvec) = assemble::assemble_system(grid, source, config.boundary_value)?;
    let flat = linalg::solve_system(
      config.solver,
      &sysmat,
      &sysvec,
      config.residual_tolerance,
    )?;

    Ok(InteriorSolution {
      grid: *grid,
      flat,
      boundary_value: config.boundary_value,
    })
  }
}

/// Solves $-Delta u = f$ with homogeneous Dirichlet boundary conditions
/// and the default sparse solver.
pub fn solve_poisson<S>(nnodes_axis: usize, source: &S) -> Result<InteriorSolution>
where
  S: SourceField + ?Sized,
{
  PoissonSolver::new().solve(nnodes_axis, source)
}

/// Solution values on the interior nodes.
#[derive(Debug, Clone)]
pub struct InteriorSolution {
  grid: Grid,
  flat: na::DVector<f64>,
  boundary_value: f64,
}

impl InteriorSolution {
  pub fn grid(&self) -> &Grid {
    &self.grid
  }
  pub fn boundary_value(&self) -> f64 {
    self.boundary_value
  }

  /// Solution vector $U$, indexed by flat unknown index.
  pub fn flat(&self) -> &na::DVector<f64> {
    &self.flat
  }
  pub fn into_flat(self) -> na::DVector<f64> {
    self.flat
  }

  /// Value at `p`, `None` if `p` is not an interior point.
  pub fn get(&self, p: GridPoint) -> Option<f64> {
    self
      .grid
      .contains(p)
      .then(|| self.flat[self.grid.flat_index(p)])
  }

  /// Value at `p`.
  ///
  /// # Panics
  /// If `p` is not an interior point of the grid.
  pub fn value(&self, p: GridPoint) -> f64 {
    match self.get(p) {
      Some(u) => u,
      None => panic!(
        "grid point (i={}, j={}) out of bounds for {n}x{n} interior nodes",
        p.i,
        p.j,
        n = self.grid.nnodes_axis()
      ),
    }
  }

  /// $N times N$ matrix with row `j` and column `i`.
  pub fn values(&self) -> na::DMatrix<f64> {
    let n = self.grid.nnodes_axis();
    na::DMatrix::from_row_slice(n, n, self.flat.as_slice())
  }

  /// Values on all $(N+2)^2$ nodes, the boundary ring set to the boundary value.
  pub fn padded(&self) -> na::DMatrix<f64> {
    let n = self.grid.nnodes_axis();
    let nfull = self.grid.nnodes_axis_full();
    let mut full = na::DMatrix::from_element(nfull, nfull, self.boundary_value);
    full.view_mut((1, 1), (n, n)).copy_from(&self.values());
    full
  }

  pub fn max_value(&self) -> f64 {
    self.flat.max()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::source::ConstSource;

  #[test]
  fn values_invert_flat_index() {
    let grid = Grid::new(3).unwrap();
    let sol = InteriorSolution {
      grid,
      flat: na::DVector::from_iterator(9, (0..9).map(|k| k as f64)),
      boundary_value: 0.0,
    };
    let values = sol.values();
    for p in grid.points() {
      assert_eq!(values[(p.j, p.i)], grid.flat_index(p) as f64);
      assert_eq!(sol.value(p), values[(p.j, p.i)]);
    }
  }

  #[test]
  fn lookup_outside_grid() {
    let sol = solve_poisson(3, &ConstSource(1.0)).unwrap();
    assert_eq!(sol.get(GridPoint::new(3, 0)), None);
    assert_eq!(sol.get(GridPoint::new(0, 3)), None);
    assert_eq!(sol.get(GridPoint::new(2, 1)), Some(sol.value(GridPoint::new(2, 1))));
  }

  #[test]
  #[should_panic(expected = "out of bounds")]
  fn value_outside_grid_panics() {
    let sol = solve_poisson(3, &ConstSource(1.0)).unwrap();
    sol.value(GridPoint::new(3, 0));
  }

  #[test]
  fn padded_ring() {
    let sol = PoissonSolver::new()
      .boundary_value(1.5)
      .solve(3, &ConstSource(1.0))
      .unwrap();
    let full = sol.padded();
    assert_eq!(full.shape(), (5, 5));
    for l in 0..5 {
      assert_eq!(full[(0, l)], 1.5);
      assert_eq!(full[(4, l)], 1.5);
      assert_eq!(full[(l, 0)], 1.5);
      assert_eq!(full[(l, 4)], 1.5);
    }
    assert_eq!(full.view((1, 1), (3, 3)).clone_owned(), sol.values());
  }

  #[test]
  fn config_validated() {
    let solver = PoissonSolver::new().residual_tolerance(-1.0);
    assert!(matches!(
      solver.solve(2, &ConstSource(1.0)),
      Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
      solve_poisson(0, &ConstSource(1.0)),
      Err(Error::InvalidParameter(_))
    ));
  }

  #[test]
  fn builder_sets_config() {
    let solver = PoissonSolver::new()
      .solver(SolverKind::DenseLu)
      .boundary_value(2.0)
      .residual_tolerance(1e-6);
    assert_eq!(
      *solver.config(),
      SolverConfig {
        solver: SolverKind::DenseLu,
        boundary_value: 2.0,
        residual_tolerance: 1e-6,
      }
    );
  }
}
