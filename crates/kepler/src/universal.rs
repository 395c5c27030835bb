//! Universal-variable Kepler propagation (Newton iteration on the universal anomaly).

use rdv_core::vector::{self, Vector3};

use crate::KeplerError;
use crate::stumpff::stumpff_c2_c3;

const MAX_ITERATIONS: usize = 60;
const CHI_TOLERANCE: f64 = 1e-10;
/// |alpha| below this (1/km) is treated as parabolic for the initial guess.
const PARABOLIC_ALPHA: f64 = 1e-12;

/// Propagate a Cartesian two-body state by `dt_s` seconds.
///
/// Returns the position (km) and velocity (km/s) after the time offset, which
/// may be negative. Handles elliptic, parabolic, and hyperbolic states through
/// the single universal-anomaly formulation.
pub fn propagate_universal(
    r0: &Vector3,
    v0: &Vector3,
    mu_km3_s2: f64,
    dt_s: f64,
) -> Result<(Vector3, Vector3), KeplerError> {
    let r0m = vector::norm(r0);
    let v0m = vector::norm(v0);
    if r0m == 0.0 || !r0m.is_finite() || !v0m.is_finite() {
        return Err(KeplerError::DegenerateState {
            r_km: r0m,
            v_km_s: v0m,
        });
    }
    if dt_s == 0.0 {
        return Ok((*r0, *v0));
    }

    let sqrt_mu = mu_km3_s2.sqrt();
    let rdotv = vector::dot(r0, v0);
    let alpha = 2.0 / r0m - v0m * v0m / mu_km3_s2;

    let mut chi = initial_guess(r0m, rdotv, mu_km3_s2, alpha, dt_s);
    let mut z = alpha * chi * chi;
    let (mut c2, mut c3) = stumpff_c2_c3(z);
    let mut r = r0m;

    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let chi2 = chi * chi;
        z = alpha * chi2;
        let (nc2, nc3) = stumpff_c2_c3(z);
        c2 = nc2;
        c3 = nc3;

        let t = (chi2 * chi * c3 + (rdotv / sqrt_mu) * chi2 * c2 + r0m * chi * (1.0 - z * c3))
            / sqrt_mu;
        r = chi2 * c2 + (rdotv / sqrt_mu) * chi * (1.0 - z * c3) + r0m * (1.0 - z * c2);

        let dchi = (dt_s - t) * sqrt_mu / r;
        chi += dchi;
        if dchi.abs() < CHI_TOLERANCE * (1.0 + chi.abs()) {
            converged = true;
            break;
        }
    }
    if !converged || !chi.is_finite() {
        return Err(KeplerError::NoConvergence {
            iterations: MAX_ITERATIONS,
        });
    }

    let chi2 = chi * chi;
    let f = 1.0 - chi2 * c2 / r0m;
    let g = dt_s - chi2 * chi * c3 / sqrt_mu;
    let fdot = sqrt_mu / (r * r0m) * chi * (z * c3 - 1.0);
    let gdot = 1.0 - chi2 * c2 / r;

    let position = vector::add(&vector::scale(r0, f), &vector::scale(v0, g));
    let velocity = vector::add(&vector::scale(r0, fdot), &vector::scale(v0, gdot));
    Ok((position, velocity))
}

/// Regime-aware first guess for the universal anomaly (Vallado's KEPLER).
fn initial_guess(r0m: f64, rdotv: f64, mu: f64, alpha: f64, dt: f64) -> f64 {
    let sqrt_mu = mu.sqrt();
    if alpha > PARABOLIC_ALPHA {
        sqrt_mu * dt * alpha
    } else if alpha < -PARABOLIC_ALPHA {
        let a = 1.0 / alpha;
        let num = -2.0 * mu * alpha * dt;
        let den = rdotv + dt.signum() * (-mu * a).sqrt() * (1.0 - r0m * alpha);
        dt.signum() * (-a).sqrt() * (num / den).ln()
    } else {
        sqrt_mu * dt / r0m
    }
}
