//! Numeric kernel for rendezvous trajectory planning.
//!
//! The heavy lifting lives in the workspace member crates; this library crate
//! re-exports them under stable module names so front-ends (a trajectory
//! search, tooling, tests) depend on a single package.
//!
//! - [`lambert`]: zero-revolution Lambert boundary-value solver.
//! - [`rendezvous`]: per-candidate arrival residual evaluator.
//! - [`kepler`]: universal-variable Keplerian propagation and the
//!   [`kepler::Ephemeris`] seam for external ephemerides.
//! - [`config`]: body catalog loading.
//! - [`core`]: shared constants, units, and vector helpers.

pub use rdv_config as config;
pub use rdv_core as core;
pub use rdv_kepler as kepler;
pub use rdv_lambert as lambert;
pub use rdv_rendezvous as rendezvous;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
