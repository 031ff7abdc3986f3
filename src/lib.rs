//! Finite-difference solver for the 2D Poisson equation $-Delta u = f$
//! on the unit square with Dirichlet boundary conditions.
//!
//! The pipeline is [`assemble`] → [`linalg`] → [`poisson::InteriorSolution`].

extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod assemble;
pub mod error;
pub mod grid;
pub mod io;
pub mod linalg;
pub mod poisson;
pub mod source;
pub mod sparse;
pub mod util;

pub use error::{Error, Result};
pub use poisson::{solve_poisson, InteriorSolution, PoissonSolver, SolverConfig};
