//! Zero-revolution Lambert boundary-value solver.
//!
//! Uses Sun's analytical formulation of the Lambert problem with the Laguerre
//! iterative root finder, following:
//!
//! Wagner, Samuel Arthur, "Automated trajectory design for impulsive and low
//! thrust interplanetary mission analysis" (2014), Graduate Theses and
//! Dissertations, Paper 14238.
//!
//! The solver is immutable after construction; independent instances are
//! independent units of work and may be evaluated on separate threads.

mod geometry;
mod solver;
mod trace;

pub use geometry::TransferGeometry;
pub use solver::{LambertError, LambertSolver, TransferSolution};
pub use trace::{LogTrace, NullTrace, TraceSink};
