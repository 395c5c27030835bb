//! Shared test helpers: an independent reference Lambert solver used to
//! cross-validate the Laguerre iteration, and small state constructors.
//!
//! The reference solver is the textbook universal-variable formulation with
//! Stumpff functions and bisection on z (Bate/Mueller/White), deliberately a
//! different algorithm from the crate under test.
#![allow(dead_code)] // not every test binary uses every helper

use rendezvous_planner::core::vector::{self, Vector3};
use rendezvous_planner::kepler::OrbitState;

/// Circular prograde equatorial orbit at `radius_km`, at angular `phase_rad`
/// from the +x axis, anchored at epoch 0.
pub fn circular_orbit(mu: f64, radius_km: f64, phase_rad: f64) -> OrbitState {
    let v = (mu / radius_km).sqrt();
    OrbitState::new(
        mu,
        0.0,
        [
            radius_km * phase_rad.cos(),
            radius_km * phase_rad.sin(),
            0.0,
        ],
        [-v * phase_rad.sin(), v * phase_rad.cos(), 0.0],
    )
}

fn stumpff_c(z: f64) -> f64 {
    if z > 1e-6 {
        let sz = z.sqrt();
        (1.0 - sz.cos()) / z
    } else if z < -1e-6 {
        let s = (-z).sqrt();
        (s.cosh() - 1.0) / (-z)
    } else {
        0.5 - z / 24.0 + z * z / 720.0
    }
}

fn stumpff_s(z: f64) -> f64 {
    if z > 1e-6 {
        let sz = z.sqrt();
        (sz - sz.sin()) / (sz * z)
    } else if z < -1e-6 {
        let s = (-z).sqrt();
        (s.sinh() - s) / (s * -z)
    } else {
        1.0 / 6.0 - z / 120.0 + z * z / 5_040.0
    }
}

/// Reference Lambert solve: departure and arrival velocities for the
/// short-way transfer, or `None` if the bisection fails to bracket.
pub fn reference_lambert(
    r1: &Vector3,
    r2: &Vector3,
    tof_s: f64,
    mu: f64,
) -> Option<(Vector3, Vector3)> {
    let r1m = vector::norm(r1);
    let r2m = vector::norm(r2);
    let cos_dnu = (vector::dot(r1, r2) / (r1m * r2m)).clamp(-1.0, 1.0);
    if (1.0 + cos_dnu).abs() < 1e-12 {
        return None;
    }
    // Short way: sin(dnu) > 0.
    let sin_dnu = (1.0 - cos_dnu * cos_dnu).sqrt();
    let a_coeff = sin_dnu * (r1m * r2m / (1.0 - cos_dnu)).sqrt();

    let mut z_low = -4.0 * std::f64::consts::PI.powi(2);
    let mut z_high = 4.0 * std::f64::consts::PI.powi(2);
    let mut z = 0.0;

    for _ in 0..300 {
        let c = stumpff_c(z);
        let s = stumpff_s(z);
        let y = r1m + r2m + a_coeff * (z * s - 1.0) / c.sqrt();
        if y < 0.0 {
            z_low = z;
            z = 0.5 * (z_low + z_high);
            continue;
        }
        let chi = (y / c).sqrt();
        let tof = (chi.powi(3) * s + a_coeff * y.sqrt()) / mu.sqrt();
        if (tof - tof_s).abs() < 1e-9 * tof_s {
            let f = 1.0 - y / r1m;
            let g = a_coeff * (y / mu).sqrt();
            let gdot = 1.0 - y / r2m;
            let v1 = vector::scale(&vector::sub(r2, &vector::scale(r1, f)), 1.0 / g);
            let v2 = vector::scale(&vector::sub(&vector::scale(r2, gdot), r1), 1.0 / g);
            return Some((v1, v2));
        }
        if tof < tof_s {
            z_low = z;
        } else {
            z_high = z;
        }
        z = 0.5 * (z_low + z_high);
    }
    None
}

pub fn magnitude(v: &Vector3) -> f64 {
    vector::norm(v)
}
