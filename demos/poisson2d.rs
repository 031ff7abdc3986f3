//! Constant heat source on the unit square, zero boundary temperature.
//!
//! Usage: `cargo run --release --example poisson2d -- [N] [OUTPUT]`
//! Writes `x y u` data for the full grid, e.g. for gnuplot:
//! `splot "poisson2d.dat" with pm3d`.

use fdpoisson::{grid::Grid, io, source::ConstSource, PoissonSolver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt::init();

  let mut args = std::env::args().skip(1);
  let nnodes_axis: i64 = match args.next() {
    Some(arg) => arg.parse()?,
    None => 100,
  };
  let output = args.next().unwrap_or_else(|| "poisson2d.dat".to_string());

  let grid = Grid::try_from(nnodes_axis)?;
  tracing::info!(
    "discretization with N={}, system matrix {}x{}",
    grid.nnodes_axis(),
    grid.nunknowns(),
    grid.nunknowns()
  );

  let solution = PoissonSolver::new().solve_on_grid(&grid, &ConstSource(100.0))?;
  tracing::info!("max u = {:.6}", solution.max_value());

  io::save_solution_to_file(&solution, &output)?;
  tracing::info!("wrote {output}");

  Ok(())
}
