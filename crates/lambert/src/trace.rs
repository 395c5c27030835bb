//! Injected diagnostic sink for solver internals.
//!
//! Diagnostics are advisory only; the solver is handed a sink at construction
//! instead of writing to process-wide state, and the default sink drops
//! everything.

use crate::geometry::TransferGeometry;

/// Receiver for solver diagnostics. All hooks default to no-ops.
pub trait TraceSink {
    /// Called once with the derived geometry when a solver is constructed.
    fn geometry(&self, geometry: &TransferGeometry) {
        let _ = geometry;
    }

    /// Called at the start of a general solve with the normalized times.
    fn regime(&self, tau: f64, tau_p: f64, tau_me: f64) {
        let _ = (tau, tau_p, tau_me);
    }

    /// Called after each accepted Laguerre correction.
    fn iteration(&self, degree: u32, x_prev: f64, x_next: f64, residual: f64) {
        let _ = (degree, x_prev, x_next, residual);
    }
}

/// Discards all diagnostics; the default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTrace;

impl TraceSink for NullTrace {}

/// Forwards diagnostics to the `log` facade (`debug` for geometry and regime,
/// `trace` for per-iteration records).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn geometry(&self, geometry: &TransferGeometry) {
        log::debug!(
            "lambert geometry: sigma={:.6} tau_p={:.6} tau_me={:.6} angle={:.4} rad",
            geometry.sigma,
            geometry.tau_p,
            geometry.tau_me,
            geometry.transfer_angle_rad,
        );
    }

    fn regime(&self, tau: f64, tau_p: f64, tau_me: f64) {
        log::debug!("lambert regime: tau={tau:.6} tau_p={tau_p:.6} tau_me={tau_me:.6}");
    }

    fn iteration(&self, degree: u32, x_prev: f64, x_next: f64, residual: f64) {
        log::trace!("laguerre N={degree}: x {x_prev:.9} -> {x_next:.9}, f={residual:.3e}");
    }
}

pub(crate) static NULL_TRACE: NullTrace = NullTrace;
