//! Two-body Keplerian propagation in the universal-variable formulation.
//!
//! Provides [`OrbitState`], a Cartesian state tied to a reference epoch, and the
//! [`Ephemeris`] trait the planner uses to read positions of both the maneuvering
//! craft and the rendezvous target without caring where they come from.

use rdv_core::vector::{self, Vector3};
use thiserror::Error;

mod stumpff;
mod universal;

pub use stumpff::stumpff_c2_c3;
pub use universal::propagate_universal;

/// Errors from Keplerian propagation.
#[derive(Debug, Error)]
pub enum KeplerError {
    #[error("state is degenerate: |r| = {r_km} km, |v| = {v_km_s} km/s")]
    DegenerateState { r_km: f64, v_km_s: f64 },
    #[error("universal Kepler iteration did not converge after {iterations} steps")]
    NoConvergence { iterations: usize },
}

/// Opaque position/velocity-at-epoch capability.
///
/// Both the maneuvering vessel's orbit estimate and the rendezvous target
/// ephemeris enter the planner through this trait.
pub trait Ephemeris {
    /// Position (km) and velocity (km/s) at `epoch_s`.
    fn state_at(&self, epoch_s: f64) -> Result<(Vector3, Vector3), KeplerError>;

    /// Orbital period in seconds, `None` for open (non-elliptic) orbits.
    fn period_s(&self) -> Option<f64>;
}

/// A two-body Cartesian orbit state anchored at a reference epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Gravitational parameter of the primary (km³/s²).
    pub mu_km3_s2: f64,
    /// Epoch the stored state refers to (s).
    pub epoch_s: f64,
    /// Position in the primary-centred frame (km).
    pub position_km: Vector3,
    /// Velocity in the primary-centred frame (km/s).
    pub velocity_km_s: Vector3,
}

impl OrbitState {
    pub fn new(
        mu_km3_s2: f64,
        epoch_s: f64,
        position_km: Vector3,
        velocity_km_s: Vector3,
    ) -> Self {
        Self {
            mu_km3_s2,
            epoch_s,
            position_km,
            velocity_km_s,
        }
    }

    /// Position at an arbitrary epoch (km).
    pub fn position_at(&self, epoch_s: f64) -> Result<Vector3, KeplerError> {
        self.state_at(epoch_s).map(|(r, _)| r)
    }

    /// Velocity at an arbitrary epoch (km/s).
    pub fn velocity_at(&self, epoch_s: f64) -> Result<Vector3, KeplerError> {
        self.state_at(epoch_s).map(|(_, v)| v)
    }

    /// Unit orbit normal, `r × v` normalized.
    pub fn normal(&self) -> Vector3 {
        vector::normalize(&vector::cross(&self.position_km, &self.velocity_km_s))
    }

    /// Inverse semi-major axis `alpha = 1/a` from the vis-viva relation (1/km).
    /// Positive for elliptic states, near zero for parabolic, negative for hyperbolic.
    pub fn alpha(&self) -> f64 {
        let r = vector::norm(&self.position_km);
        let v2 = vector::dot(&self.velocity_km_s, &self.velocity_km_s);
        2.0 / r - v2 / self.mu_km3_s2
    }

    /// State after an impulsive burn applied at the reference epoch.
    pub fn after_burn(&self, delta_v_km_s: &Vector3) -> Self {
        Self {
            velocity_km_s: vector::add(&self.velocity_km_s, delta_v_km_s),
            ..*self
        }
    }
}

impl Ephemeris for OrbitState {
    fn state_at(&self, epoch_s: f64) -> Result<(Vector3, Vector3), KeplerError> {
        propagate_universal(
            &self.position_km,
            &self.velocity_km_s,
            self.mu_km3_s2,
            epoch_s - self.epoch_s,
        )
    }

    fn period_s(&self) -> Option<f64> {
        let alpha = self.alpha();
        if alpha > 0.0 {
            let a = 1.0 / alpha;
            Some(2.0 * std::f64::consts::PI * (a * a * a / self.mu_km3_s2).sqrt())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdv_core::constants::MU_EARTH_KM3_S2;

    fn circular_leo() -> OrbitState {
        let r = 7_000.0;
        let v = (MU_EARTH_KM3_S2 / r).sqrt();
        OrbitState::new(MU_EARTH_KM3_S2, 0.0, [r, 0.0, 0.0], [0.0, v, 0.0])
    }

    #[test]
    fn quarter_period_sweeps_ninety_degrees() {
        let orbit = circular_leo();
        let period = orbit.period_s().expect("elliptic orbit has a period");
        let (r, v) = orbit.state_at(period / 4.0).expect("propagation");
        assert!((r[0]).abs() < 1.0, "x should vanish, got {}", r[0]);
        assert!((r[1] - 7_000.0).abs() < 1.0, "y should reach 7000, got {}", r[1]);
        assert!(v[0] < 0.0, "velocity should have turned retrograde in x");
    }

    #[test]
    fn full_period_returns_to_start() {
        let orbit = circular_leo();
        let period = orbit.period_s().unwrap();
        let (r, v) = orbit.state_at(period).expect("propagation");
        for i in 0..3 {
            assert!((r[i] - orbit.position_km[i]).abs() < 1e-3);
            assert!((v[i] - orbit.velocity_km_s[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn negative_dt_propagates_backwards() {
        let orbit = circular_leo();
        let ahead = orbit.state_at(600.0).unwrap();
        let back = OrbitState::new(orbit.mu_km3_s2, 600.0, ahead.0, ahead.1)
            .state_at(0.0)
            .unwrap();
        for i in 0..3 {
            assert!((back.0[i] - orbit.position_km[i]).abs() < 1e-4);
        }
    }

    #[test]
    fn hyperbolic_state_has_no_period() {
        let r = 7_000.0;
        let v_escape = (2.0 * MU_EARTH_KM3_S2 / r).sqrt();
        let orbit = OrbitState::new(
            MU_EARTH_KM3_S2,
            0.0,
            [r, 0.0, 0.0],
            [0.0, v_escape * 1.1, 0.0],
        );
        assert!(orbit.period_s().is_none());
        // Propagation must still work past the parabolic boundary.
        let (r1, _) = orbit.state_at(3_600.0).expect("hyperbolic propagation");
        assert!(vector::norm(&r1) > r);
    }

    #[test]
    fn normal_points_out_of_plane() {
        let orbit = circular_leo();
        let n = orbit.normal();
        assert!((n[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn after_burn_keeps_position_and_epoch() {
        let orbit = circular_leo();
        let burned = orbit.after_burn(&[0.0, 0.5, 0.0]);
        assert_eq!(burned.position_km, orbit.position_km);
        assert_eq!(burned.epoch_s, orbit.epoch_s);
        assert!(burned.velocity_km_s[1] > orbit.velocity_km_s[1]);
    }
}
