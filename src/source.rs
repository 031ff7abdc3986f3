//! Source terms $f$ of $-Delta u = f$, evaluated on interior grid points.

use crate::{
  grid::{Grid, GridPoint},
  Error, Result,
};

/// Anything that yields a scalar source value for an interior grid point.
pub trait SourceField {
  fn eval(&self, grid: &Grid, p: GridPoint) -> f64;

  /// Checks that this source can be evaluated on all points of `grid`.
  fn check_grid(&self, _grid: &Grid) -> Result<()> {
    Ok(())
  }
}

impl<F> SourceField for F
where
  F: Fn(GridPoint) -> f64,
{
  fn eval(&self, _grid: &Grid, p: GridPoint) -> f64 {
    self(p)
  }
}

/// Same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstSource(pub f64);
impl SourceField for ConstSource {
  fn eval(&self, _grid: &Grid, _p: GridPoint) -> f64 {
    self.0
  }
}

/// Source given as a function of the physical coordinates $(x, y)$.
pub struct CoordSource<F>(pub F);
impl<F> SourceField for CoordSource<F>
where
  F: Fn(na::Vector2<f64>) -> f64,
{
  fn eval(&self, grid: &Grid, p: GridPoint) -> f64 {
    (self.0)(grid.coord(p))
  }
}

/// Precomputed source values, one per interior point.
///
/// Stored as an $N times N$ matrix with row `j` and column `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceArray {
  values: na::DMatrix<f64>,
}
impl SourceArray {
  pub fn new(values: na::DMatrix<f64>) -> Self {
    Self { values }
  }

  /// Row-major data: `data[i + j * ncols]` is the value at point `(i, j)`.
  pub fn from_row_slice(nrows: usize, ncols: usize, data: &[f64]) -> Result<Self> {
    if data.len() != nrows * ncols {
      return Err(Error::invalid(format!(
        "source data has {} values, expected {nrows}x{ncols}",
        data.len()
      )));
    }
    Ok(Self::new(na::DMatrix::from_row_slice(nrows, ncols, data)))
  }

  pub fn from_element(nnodes_axis: usize, value: f64) -> Self {
    Self::new(na::DMatrix::from_element(nnodes_axis, nnodes_axis, value))
  }

  /// Samples any other source on `grid`.
  pub fn sample<S: SourceField + ?Sized>(grid: &Grid, source: &S) -> Result<Self> {
    source.check_grid(grid)?;
    let n = grid.nnodes_axis();
    let values = na::DMatrix::from_fn(n, n, |j, i| source.eval(grid, GridPoint::new(i, j)));
    Ok(Self::new(values))
  }

  pub fn values(&self) -> &na::DMatrix<f64> {
    &self.values
  }
}
impl SourceField for SourceArray {
  fn eval(&self, _grid: &Grid, p: GridPoint) -> f64 {
    self.values[(p.j, p.i)]
  }

  fn check_grid(&self, grid: &Grid) -> Result<()> {
    let n = grid.nnodes_axis();
    let shape = self.values.shape();
    if shape != (n, n) {
      return Err(Error::invalid(format!(
        "source array has shape {}x{}, grid needs {n}x{n}",
        shape.0, shape.1
      )));
    }
    Ok(())
  }
}
