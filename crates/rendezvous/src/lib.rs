//! Rendezvous trajectory evaluation.
//!
//! A [`RendezvousCandidate`] scores one `(start epoch, transfer time)`
//! hypothesis by propagating the post-burn orbit to the arrival epoch and
//! comparing it against the target ephemeris. It searches for nothing itself;
//! an outer sampler constructs one candidate per hypothesis and reads the
//! four residuals.

use rdv_core::vector::{self, Vector3};
use rdv_kepler::{Ephemeris, KeplerError, OrbitState};
use thiserror::Error;

/// Errors from candidate evaluation.
#[derive(Debug, Error)]
pub enum RendezvousError {
    #[error("propagation failed while evaluating the candidate: {0}")]
    Propagation(#[from] KeplerError),
}

/// Arrival-epoch snapshot: both states and the four residuals the outer
/// search consumes. Rebuilt as a value whenever the orbit estimate changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrivalGeometry {
    pub own_position_km: Vector3,
    pub own_velocity_km_s: Vector3,
    pub target_position_km: Vector3,
    pub target_velocity_km_s: Vector3,
    /// Separation at arrival less the combined radius, clamped at zero (km).
    pub distance_to_target_km: f64,
    /// Signed angular-phase error in the transfer-orbit plane (deg).
    pub delta_ta_deg: f64,
    /// Inclination mismatch proxy: 90° minus the angle between the transfer
    /// orbit normal and the target position (deg).
    pub delta_fi_deg: f64,
    /// Along-track radial error: target offset projected on the own arrival
    /// radial direction (km).
    pub delta_r_km: f64,
}

impl ArrivalGeometry {
    fn evaluate(
        transfer_orbit: &OrbitState,
        target: &dyn Ephemeris,
        arrival_epoch_s: f64,
        combined_radius_km: f64,
        phase_sign: f64,
    ) -> Result<Self, RendezvousError> {
        let (own_position_km, own_velocity_km_s) = transfer_orbit.state_at(arrival_epoch_s)?;
        let (target_position_km, target_velocity_km_s) = target.state_at(arrival_epoch_s)?;

        let separation = vector::sub(&own_position_km, &target_position_km);
        let distance_to_target_km = (vector::norm(&separation) - combined_radius_km).max(0.0);

        let normal = transfer_orbit.normal();
        let delta_ta_deg =
            vector::signed_angle_about(&own_position_km, &target_position_km, &normal)
                .to_degrees()
                * phase_sign;
        let delta_fi_deg = 90.0 - vector::angle_between(&normal, &target_position_km).to_degrees();
        let delta_r_km = vector::dot(
            &vector::sub(&target_position_km, &own_position_km),
            &vector::normalize(&own_position_km),
        );

        Ok(Self {
            own_position_km,
            own_velocity_km_s,
            target_position_km,
            target_velocity_km_s,
            distance_to_target_km,
            delta_ta_deg,
            delta_fi_deg,
            delta_r_km,
        })
    }
}

/// One trajectory hypothesis: a departure burn at a start epoch, the post-burn
/// orbit, and the arrival residuals against a fixed target ephemeris.
///
/// The target reference, arrival epoch, and phase sign are fixed at
/// construction; [`RendezvousCandidate::update_orbit`] swaps in a refined
/// post-burn orbit estimate and recomputes only the arrival snapshot.
pub struct RendezvousCandidate<'a> {
    pub start_epoch_s: f64,
    pub transfer_time_s: f64,
    pub arrival_epoch_s: f64,
    pub delta_v_km_s: Vector3,
    pub combined_radius_km: f64,
    pub transfer_orbit: OrbitState,
    pub arrival: ArrivalGeometry,
    target: &'a dyn Ephemeris,
    phase_sign: f64,
}

impl<'a> RendezvousCandidate<'a> {
    /// Apply `delta_v` to `own_orbit` at `start_epoch_s` and evaluate the
    /// arrival against `target` after `transfer_time_s`.
    ///
    /// `combined_radius_km` is subtracted from the arrival separation so two
    /// touching bodies read as zero distance.
    pub fn new(
        own_orbit: &OrbitState,
        delta_v_km_s: Vector3,
        start_epoch_s: f64,
        target: &'a dyn Ephemeris,
        transfer_time_s: f64,
        combined_radius_km: f64,
    ) -> Result<Self, RendezvousError> {
        let (position, velocity) = own_orbit.state_at(start_epoch_s)?;
        let transfer_orbit = OrbitState::new(
            own_orbit.mu_km3_s2,
            start_epoch_s,
            position,
            vector::add(&velocity, &delta_v_km_s),
        );
        let arrival_epoch_s = start_epoch_s + transfer_time_s;

        // Phase error counts positive toward the slower of the two orbits.
        let phase_sign = match (target.period_s(), own_orbit.period_s()) {
            (Some(tp), Some(op)) if tp != op => (tp - op).signum(),
            (Some(_), Some(_)) => 0.0,
            _ => 1.0,
        };

        let arrival = ArrivalGeometry::evaluate(
            &transfer_orbit,
            target,
            arrival_epoch_s,
            combined_radius_km,
            phase_sign,
        )?;

        Ok(Self {
            start_epoch_s,
            transfer_time_s,
            arrival_epoch_s,
            delta_v_km_s,
            combined_radius_km,
            transfer_orbit,
            arrival,
            target,
            phase_sign,
        })
    }

    /// Replace the post-burn orbit estimate and recompute the arrival
    /// snapshot. The target ephemeris and arrival epoch are not re-derived.
    pub fn update_orbit(&mut self, transfer_orbit: OrbitState) -> Result<(), RendezvousError> {
        self.transfer_orbit = transfer_orbit;
        self.arrival = ArrivalGeometry::evaluate(
            &self.transfer_orbit,
            self.target,
            self.arrival_epoch_s,
            self.combined_radius_km,
            self.phase_sign,
        )?;
        Ok(())
    }

    /// Convenience accessor for the residual the search thresholds on.
    pub fn distance_to_target_km(&self) -> f64 {
        self.arrival.distance_to_target_km
    }
}
