//! Plain-text export of solutions for external plotting.
//!
//! One `x y u` line per node, one block per grid row, blocks separated by an
//! empty line. This is the layout gnuplot's `splot` expects for grid data.

use crate::{poisson::InteriorSolution, Result};

use std::{fs::File, io::BufWriter, path::Path};

pub fn save_solution_to_file(solution: &InteriorSolution, path: impl AsRef<Path>) -> Result<()> {
  let file = File::create(path)?;
  let writer = BufWriter::new(file);
  let axis = solution.grid().axis_coords();
  write_grid_function(writer, &axis, &solution.padded())?;
  Ok(())
}

/// `values` is indexed by (row = $y$ index, column = $x$ index).
pub fn write_grid_function<W: std::io::Write>(
  mut writer: W,
  axis: &na::DVector<f64>,
  values: &na::DMatrix<f64>,
) -> std::io::Result<()> {
  let naxis = axis.len();
  if values.shape() != (naxis, naxis) {
    return Err(std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      format!(
        "grid values of shape {}x{} do not match {naxis} axis coordinates",
        values.nrows(),
        values.ncols()
      ),
    ));
  }
  for (row, y) in values.row_iter().zip(axis.iter()) {
    for (u, x) in row.iter().zip(axis.iter()) {
      writeln!(writer, "{x:.6} {y:.6} {u:.9e}")?;
    }
    writeln!(writer)?;
  }
  writer.flush()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{poisson::solve_poisson, source::ConstSource};

  #[test]
  fn writes_all_nodes() {
    let sol = solve_poisson(2, &ConstSource(100.0)).unwrap();
    let mut buf = Vec::new();
    write_grid_function(&mut buf, &sol.grid().axis_coords(), &sol.padded()).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let data: Vec<Vec<f64>> = text
      .lines()
      .filter(|l| !l.is_empty())
      .map(|l| l.split_whitespace().map(|v| v.parse().unwrap()).collect())
      .collect();
    assert_eq!(data.len(), 16);
    assert_eq!(text.lines().filter(|l| l.is_empty()).count(), 4);

    // first block is y = 0, all on the boundary
    for line in &data[..4] {
      assert_eq!(line[1], 0.0);
      assert_eq!(line[2], 0.0);
    }
    // interior node (i=0, j=0) sits at x = y = 1/3
    let interior = &data[5];
    assert!((interior[0] - 1.0 / 3.0).abs() < 1e-6);
    assert!((interior[1] - 1.0 / 3.0).abs() < 1e-6);
    assert!((interior[2] - sol.value(crate::grid::GridPoint::new(0, 0))).abs() < 1e-8);
  }

  #[test]
  fn shape_mismatch_reported() {
    let axis = na::DVector::from_vec(vec![0.0, 0.5, 1.0]);
    let values = na::DMatrix::zeros(3, 2);
    let mut buf = Vec::new();
    let err = write_grid_function(&mut buf, &axis, &values).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert!(buf.is_empty());
  }
}
