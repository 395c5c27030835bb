//! The Lambert solver: closed-form special cases and the degree-adaptive
//! Laguerre iteration for the general elliptic regime.

use rdv_core::vector::{self, Vector3};
use rdv_kepler::{Ephemeris, KeplerError, OrbitState};
use thiserror::Error;

use crate::geometry::TransferGeometry;
use crate::trace::{NULL_TRACE, TraceSink};

/// Hard cap on the assumed polynomial degree; degrees go 1, 2, 4, ..., up to here.
const DEGREE_CAP: u32 = 1024;
/// Laguerre corrections allowed per degree before restarting with the next one.
const MAX_STEPS_PER_DEGREE: usize = 128;
/// Halvings allowed while bounding a single correction step.
const MAX_STEP_HALVINGS: usize = 64;

/// Failures of a single solve call. None of these are fatal to a search;
/// a failing `(start, transfer_time)` sample is simply infeasible.
#[derive(Debug, Error)]
pub enum LambertError {
    #[error(
        "transfer time {requested_s:.3} s is below the parabolic boundary \
         {parabolic_s:.3} s; hyperbolic transfers are not supported"
    )]
    HyperbolicUnsupported { requested_s: f64, parabolic_s: f64 },
    #[error("Laguerre iteration found no stable root up to degree {degree_cap}")]
    NonConvergence { degree_cap: u32 },
    #[error("propagating the departure orbit failed: {0}")]
    Propagation(#[from] KeplerError),
}

/// Result of a solve: the departure burn and the transfer time consistent
/// with it (echoed back by the closed-form entry points, validated input for
/// the general one).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferSolution {
    pub delta_v_km_s: Vector3,
    pub transfer_time_s: f64,
}

/// Solver for the zero-revolution Lambert problem between a departure orbit
/// state and a fixed destination position.
///
/// All state is derived at construction; the solve methods take `&self` and
/// are pure, so independent solvers can run concurrently.
pub struct LambertSolver<'t> {
    mu_km3_s2: f64,
    geometry: TransferGeometry,
    departure_velocity_km_s: Vector3,
    trace: &'t dyn TraceSink,
}

impl LambertSolver<'static> {
    /// Build a solver from the current orbit, the destination position, and
    /// the departure epoch, with diagnostics discarded.
    pub fn new(
        orbit: &OrbitState,
        destination_km: &Vector3,
        epoch_s: f64,
    ) -> Result<Self, LambertError> {
        Self::with_trace(orbit, destination_km, epoch_s, &NULL_TRACE)
    }
}

impl<'t> LambertSolver<'t> {
    /// Like [`LambertSolver::new`], with solver diagnostics sent to `trace`.
    pub fn with_trace(
        orbit: &OrbitState,
        destination_km: &Vector3,
        epoch_s: f64,
        trace: &'t dyn TraceSink,
    ) -> Result<Self, LambertError> {
        let (r1, v1) = orbit.state_at(epoch_s)?;
        let geometry = TransferGeometry::new(&r1, destination_km, &orbit.normal());
        trace.geometry(&geometry);
        Ok(Self {
            mu_km3_s2: orbit.mu_km3_s2,
            geometry,
            departure_velocity_km_s: v1,
            trace,
        })
    }

    /// Derived boundary geometry.
    pub fn geometry(&self) -> &TransferGeometry {
        &self.geometry
    }

    /// Minimum-energy transfer: closed form, no iteration.
    pub fn solve_minimum_energy(&self) -> TransferSolution {
        let g = &self.geometry;
        let v = self.mu_km3_s2.sqrt() * sign(g.sigma) * (1.0 - g.sigma2).sqrt() / g.n_km.sqrt();
        let dv = vector::sub(
            &vector::scale(&vector::add(&g.r1_hat, &g.chord_hat), v),
            &self.departure_velocity_km_s,
        );
        TransferSolution {
            delta_v_km_s: dv,
            transfer_time_s: self.invtau(g.tau_me),
        }
    }

    /// Parabolic boundary transfer: closed form at `x = 1`.
    pub fn solve_parabolic(&self) -> TransferSolution {
        TransferSolution {
            delta_v_km_s: self.delta_v(1.0, sign(self.geometry.sigma)),
            transfer_time_s: self.invtau(self.geometry.tau_p),
        }
    }

    /// General entry point: find the transfer orbit for an arbitrary elliptic
    /// transfer time.
    ///
    /// Delegates to the closed forms within `tolerance` of their boundaries,
    /// rejects the hyperbolic regime, and otherwise runs the degree-adaptive
    /// Laguerre iteration on the universal variable `x`.
    pub fn solve(
        &self,
        transfer_time_s: f64,
        tolerance: f64,
    ) -> Result<TransferSolution, LambertError> {
        let g = &self.geometry;
        let tau = 4.0 * transfer_time_s * (self.mu_km3_s2 / g.m3).sqrt();
        self.trace.regime(tau, g.tau_p, g.tau_me);

        if (tau - g.tau_me).abs() < tolerance {
            return Ok(self.solve_minimum_energy());
        }
        if tau <= g.tau_p {
            if (tau - g.tau_p).abs() < tolerance {
                return Ok(self.solve_parabolic());
            }
            return Err(LambertError::HyperbolicUnsupported {
                requested_s: transfer_time_s,
                parabolic_s: self.invtau(g.tau_p),
            });
        }

        let x_initial = if tau < g.tau_me { 0.5 } else { -0.5 };
        let mut degree = 1u32;
        while degree <= DEGREE_CAP {
            let mut x = x_initial;
            for _ in 0..MAX_STEPS_PER_DEGREE {
                let (f, f1, f2) = self.time_residuals(x, tau);
                let Some(next) = laguerre_step(x, f, f1, f2, degree) else {
                    break;
                };
                self.trace.iteration(degree, x, next, f);
                if (next - x).abs() < tolerance {
                    let y = self.y_of(next);
                    return Ok(TransferSolution {
                        delta_v_km_s: self.delta_v(next, y),
                        transfer_time_s,
                    });
                }
                x = next;
            }
            degree *= 2;
        }
        Err(LambertError::NonConvergence {
            degree_cap: DEGREE_CAP,
        })
    }

    /// `y(x)` companion variable; carries sigma's sign.
    fn y_of(&self, x: f64) -> f64 {
        let g = &self.geometry;
        sign(g.sigma) * (1.0 - g.sigma2 * (1.0 - x * x)).sqrt()
    }

    /// Real transfer time for a normalized one.
    fn invtau(&self, tau: f64) -> f64 {
        tau / 4.0 / (self.mu_km3_s2 / self.geometry.m3).sqrt()
    }

    /// Departure delta-v for a converged `(x, y)` pair via the radial and
    /// chordwise velocity components.
    fn delta_v(&self, x: f64, y: f64) -> Vector3 {
        let g = &self.geometry;
        let sqrt_mu = self.mu_km3_s2.sqrt();
        let sqrt_m = g.m_km.sqrt();
        let sqrt_n = g.n_km.sqrt();
        let vr = sqrt_mu * (y / sqrt_n - x / sqrt_m);
        let vt = sqrt_mu * (y / sqrt_n + x / sqrt_m);
        vector::sub(
            &vector::add(
                &vector::scale(&g.r1_hat, vr),
                &vector::scale(&g.chord_hat, vt),
            ),
            &self.departure_velocity_km_s,
        )
    }

    /// Elliptic time-of-flight residual and its first two derivatives at `x`,
    /// analytic from the universal-variable relation.
    fn time_residuals(&self, x: f64, tau: f64) -> (f64, f64, f64) {
        let g = &self.geometry;
        let y = self.y_of(x);
        let x2 = x * x;
        let x3 = x * x2;
        let y2 = y * y;
        let y3 = y * y2;
        let sqrt_one_x2 = (1.0 - x2).sqrt();
        let sqrt_one_y2 = (1.0 - y2).sqrt();

        let f = ((x.acos() - x * sqrt_one_x2) - ((sqrt_one_y2 / y).atan() - y * sqrt_one_y2))
            / (sqrt_one_x2 * sqrt_one_x2 * sqrt_one_x2)
            - tau;
        let f1 = (3.0 * x * (f + tau) - 2.0 * (1.0 - g.sigma3 * x / y.abs())) / (1.0 - x2);
        let f2 = ((1.0 + 4.0 * x2) * f1 + 2.0 * (1.0 - g.sigma5 * x3 / y3.abs())) / (x - x3);
        (f, f1, f2)
    }
}

/// One Laguerre correction of order `degree`, bounded to keep the iterate
/// inside `[-1, 1]`. `None` marks an invalid step (complex discriminant,
/// non-finite arithmetic, or an unboundable offset) and triggers the caller's
/// degree-doubling restart.
fn laguerre_step(x: f64, f: f64, f1: f64, f2: f64, degree: u32) -> Option<f64> {
    let n = f64::from(degree);
    let g = f1 / f;
    let g2 = g * g;
    let h = g2 - f2 / f;
    let s2 = (n - 1.0) * (n * h - g2);
    if !s2.is_finite() || s2 < 0.0 {
        return None;
    }
    let s = s2.sqrt();
    let g_plus = g + s;
    let g_minus = g - s;
    let denom = if g_plus.abs() > g_minus.abs() {
        g_plus
    } else {
        g_minus
    };
    let mut offset = n / denom;
    if !offset.is_finite() {
        return None;
    }
    let mut halvings = 0;
    while (x - offset).abs() > 1.0 {
        offset /= 2.0;
        halvings += 1;
        if halvings > MAX_STEP_HALVINGS {
            return None;
        }
    }
    Some(x - offset)
}

/// Sign with a genuine zero at zero, unlike `f64::signum`.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
