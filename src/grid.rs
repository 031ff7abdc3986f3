//! Uniform grid on the unit square.
//!
//! The grid has $N+2$ nodes per axis, spacing $h = 1/(N+1)$.
//! Only the $N^2$ interior nodes carry unknowns. They are ordered
//! lexicographically with the $x$-index running fastest: $k = i + j N$.

use crate::{assemble::STENCIL_SIZE, util, Error, Result};

use itertools::iproduct;

/// Flat index of an unknown, in `0..N^2`.
pub type UnknownIdx = usize;

/// Interior grid point, `i` along $x$ (column), `j` along $y$ (row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
  pub i: usize,
  pub j: usize,
}
impl GridPoint {
  pub fn new(i: usize, j: usize) -> Self {
    Self { i, j }
  }
}

const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
  nnodes_axis: usize,
}

// constructors
impl Grid {
  /// Grid with `nnodes_axis` interior nodes per axis.
  pub fn new(nnodes_axis: usize) -> Result<Self> {
    if nnodes_axis == 0 {
      return Err(Error::invalid(
        "number of interior nodes per axis must be positive, got 0",
      ));
    }
    // unknowns and stored stencil entries must stay addressable
    let fits = nnodes_axis
      .checked_mul(nnodes_axis)
      .and_then(|nunknowns| nunknowns.checked_mul(STENCIL_SIZE))
      .is_some();
    if !fits {
      return Err(Error::invalid(format!(
        "grid with {nnodes_axis} interior nodes per axis is too large to index"
      )));
    }
    Ok(Self { nnodes_axis })
  }
}

impl TryFrom<i64> for Grid {
  type Error = Error;

  fn try_from(nnodes_axis: i64) -> Result<Self> {
    if nnodes_axis <= 0 {
      return Err(Error::invalid(format!(
        "number of interior nodes per axis must be positive, got {nnodes_axis}"
      )));
    }
    let nnodes_axis = usize::try_from(nnodes_axis)
      .map_err(|_| Error::invalid(format!("grid size {nnodes_axis} does not fit in usize")))?;
    Self::new(nnodes_axis)
  }
}

// getters
impl Grid {
  /// Interior nodes per axis, $N$.
  pub fn nnodes_axis(&self) -> usize {
    self.nnodes_axis
  }
  /// Nodes per axis including the boundary, $N+2$.
  pub fn nnodes_axis_full(&self) -> usize {
    self.nnodes_axis + 2
  }
  /// Number of unknowns, $N^2$.
  pub fn nunknowns(&self) -> usize {
    self.nnodes_axis * self.nnodes_axis
  }
  /// Mesh width $h = 1/(N+1)$.
  pub fn mesh_width(&self) -> f64 {
    ((self.nnodes_axis + 1) as f64).recip()
  }
}

// indexing
impl Grid {
  pub fn contains(&self, p: GridPoint) -> bool {
    p.i < self.nnodes_axis && p.j < self.nnodes_axis
  }

  /// converts grid point to flat unknown index
  pub fn flat_index(&self, p: GridPoint) -> UnknownIdx {
    debug_assert!(self.contains(p));
    p.i + p.j * self.nnodes_axis
  }

  /// converts flat unknown index to grid point
  pub fn grid_point(&self, k: UnknownIdx) -> GridPoint {
    debug_assert!(k < self.nunknowns());
    GridPoint::new(k % self.nnodes_axis, k / self.nnodes_axis)
  }

  /// All interior points, in ascending flat index order.
  pub fn points(&self) -> impl Iterator<Item = GridPoint> {
    let n = self.nnodes_axis;
    iproduct!(0..n, 0..n).map(|(j, i)| GridPoint::new(i, j))
  }

  /// The axis-aligned neighbors of `p` that are interior points.
  ///
  /// Neighbors on the boundary are not unknowns and are skipped.
  pub fn neighbors(&self, p: GridPoint) -> impl Iterator<Item = GridPoint> + '_ {
    NEIGHBOR_OFFSETS.iter().filter_map(move |&(di, dj)| {
      let q = GridPoint::new(p.i.checked_add_signed(di)?, p.j.checked_add_signed(dj)?);
      self.contains(q).then_some(q)
    })
  }

  /// Number of stencil neighbors of `p` that lie on the boundary.
  pub fn nboundary_neighbors(&self, p: GridPoint) -> usize {
    NEIGHBOR_OFFSETS.len() - self.neighbors(p).count()
  }
}

// coordinates
impl Grid {
  /// Physical coordinates $(x, y)$ of an interior point.
  pub fn coord(&self, p: GridPoint) -> na::Vector2<f64> {
    let h = self.mesh_width();
    na::Vector2::new((p.i + 1) as f64 * h, (p.j + 1) as f64 * h)
  }

  /// Node coordinates along one axis, boundary included.
  pub fn axis_coords(&self) -> na::DVector<f64> {
    util::linspace(0.0, 1.0, self.nnodes_axis_full())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_size_rejected() {
    assert!(matches!(Grid::new(0), Err(Error::InvalidParameter(_))));
    assert!(matches!(Grid::try_from(0i64), Err(Error::InvalidParameter(_))));
    assert!(matches!(Grid::try_from(-3i64), Err(Error::InvalidParameter(_))));
    assert_eq!(Grid::try_from(4i64).unwrap(), Grid::new(4).unwrap());
  }

  #[test]
  fn oversized_rejected() {
    let too_large = 1usize << (usize::BITS / 2);
    assert!(matches!(Grid::new(too_large), Err(Error::InvalidParameter(_))));
    assert!(matches!(Grid::new(usize::MAX), Err(Error::InvalidParameter(_))));
    assert!(matches!(
      Grid::try_from(i64::MAX),
      Err(Error::InvalidParameter(_))
    ));
    assert!(Grid::new(1 << 10).is_ok());
  }

  #[test]
  fn mesh_width() {
    assert_eq!(Grid::new(1).unwrap().mesh_width(), 0.5);
    assert_eq!(Grid::new(3).unwrap().mesh_width(), 0.25);
  }

  #[test]
  fn index_roundtrip() {
    for n in 1..=7 {
      let grid = Grid::new(n).unwrap();
      for j in 0..n {
        for i in 0..n {
          let p = GridPoint::new(i, j);
          let k = grid.flat_index(p);
          assert_eq!(k, i + j * n);
          assert_eq!(grid.grid_point(k), p);
        }
      }
    }
  }

  #[test]
  fn points_in_flat_order() {
    let grid = Grid::new(4).unwrap();
    let flat: Vec<_> = grid.points().map(|p| grid.flat_index(p)).collect();
    assert_eq!(flat, (0..16).collect::<Vec<_>>());
  }

  #[test]
  fn neighbor_counts() {
    let grid = Grid::new(3).unwrap();
    assert_eq!(grid.neighbors(GridPoint::new(0, 0)).count(), 2);
    assert_eq!(grid.neighbors(GridPoint::new(1, 0)).count(), 3);
    assert_eq!(grid.neighbors(GridPoint::new(1, 1)).count(), 4);
    assert_eq!(grid.nboundary_neighbors(GridPoint::new(2, 2)), 2);

    let single = Grid::new(1).unwrap();
    assert_eq!(single.neighbors(GridPoint::new(0, 0)).count(), 0);
    assert_eq!(single.nboundary_neighbors(GridPoint::new(0, 0)), 4);
  }

  #[test]
  fn coordinates() {
    let grid = Grid::new(3).unwrap();
    let x = grid.coord(GridPoint::new(0, 2));
    assert_eq!(x, na::Vector2::new(0.25, 0.75));

    let axis = grid.axis_coords();
    assert_eq!(axis.len(), 5);
    assert_eq!(axis[0], 0.0);
    assert_eq!(axis[1], 0.25);
    assert_eq!(axis[4], 1.0);
  }
}
