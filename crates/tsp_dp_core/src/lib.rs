//! Exact travelling-salesman solving over small complete graphs with bitmask dynamic
//! programming. Supports a memoised top-down solver and a bottom-up table fill.

mod constants;
mod error;
mod io;
pub mod logging;
mod mask;
mod matrix;
mod memo;
mod solver;
mod tour;

pub(crate) use io::options;

pub use constants::{MAX_CITIES, MAX_EDGE_COST, ORIGIN};
pub use error::{Error, Result};
pub use io::input::{InstanceOrigin, SolverInput};
pub use io::options::{InputSource, LogFormat, LogLevel, SolverOptions, Strategy};
pub use mask::VisitedSet;
pub use matrix::{Cost, DistanceMatrix};
pub use memo::{MemoTable, UNSET};
pub use solver::{TspSolver, solve_tsp};
pub use tour::{Tour, TourMetrics};
