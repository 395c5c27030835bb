mod common;

use common::circular_orbit;
use rendezvous_planner::core::constants::MU_EARTH_KM3_S2;
use rendezvous_planner::kepler::Ephemeris;
use rendezvous_planner::lambert::LambertSolver;
use rendezvous_planner::rendezvous::RendezvousCandidate;

/// Solve a minimum-energy transfer whose arrival epoch is consistent with the
/// target's motion: iterate `T -> ME time to target(T)` to a fixed point.
fn phased_me_transfer(
    own: &rendezvous_planner::kepler::OrbitState,
    target: &rendezvous_planner::kepler::OrbitState,
) -> (rendezvous_planner::lambert::TransferSolution, f64) {
    let mut transfer_time = 3_000.0;
    for _ in 0..500 {
        let destination = target.position_at(transfer_time).expect("target ephemeris");
        let solver = LambertSolver::new(own, &destination, 0.0).expect("solver");
        let me = solver.solve_minimum_energy();
        if (me.transfer_time_s - transfer_time).abs() < 1e-6 {
            return (me, me.transfer_time_s);
        }
        // Damped update keeps the fixed-point iteration contracting.
        transfer_time = 0.5 * (transfer_time + me.transfer_time_s);
    }
    panic!("phasing iteration did not settle");
}

#[test]
fn lambert_solution_closes_the_rendezvous_residuals() {
    let own = circular_orbit(MU_EARTH_KM3_S2, 7_000.0, 0.0);
    let target = circular_orbit(MU_EARTH_KM3_S2, 9_000.0, 1.0);

    let (me, transfer_time) = phased_me_transfer(&own, &target);
    let candidate =
        RendezvousCandidate::new(&own, me.delta_v_km_s, 0.0, &target, transfer_time, 0.0)
            .expect("candidate");

    // The burn was solved to hit the target's arrival position exactly, so
    // every residual the search reads must be (numerically) zero.
    assert!(
        candidate.distance_to_target_km() < 1e-3,
        "distance {} km",
        candidate.distance_to_target_km()
    );
    assert!(candidate.arrival.delta_ta_deg.abs() < 1e-5);
    assert!(candidate.arrival.delta_fi_deg.abs() < 1e-5);
    assert!(candidate.arrival.delta_r_km.abs() < 1e-3);
}

#[test]
fn phase_error_is_positive_toward_a_slower_leading_target() {
    let own = circular_orbit(MU_EARTH_KM3_S2, 7_000.0, 0.0);
    let coast_time = own.period_s().unwrap() / 4.0;

    // Target on a higher (slower) orbit, placed so that at arrival it leads
    // the own position (90 degrees) by about 0.4 rad.
    let target_rate = (MU_EARTH_KM3_S2 / 9_000.0_f64.powi(3)).sqrt();
    let lead_at_arrival = 0.4;
    let target_phase = std::f64::consts::FRAC_PI_2 + lead_at_arrival - target_rate * coast_time;
    let target = circular_orbit(MU_EARTH_KM3_S2, 9_000.0, target_phase);

    let candidate =
        RendezvousCandidate::new(&own, [0.0; 3], 0.0, &target, coast_time, 0.0).expect("candidate");
    assert!(
        candidate.arrival.delta_ta_deg > 0.0,
        "expected positive phase error, got {}",
        candidate.arrival.delta_ta_deg
    );

    // A trailing target flips the sign.
    let trailing_phase = std::f64::consts::FRAC_PI_2 - 0.4 - target_rate * coast_time;
    let trailing = circular_orbit(MU_EARTH_KM3_S2, 9_000.0, trailing_phase);
    let candidate =
        RendezvousCandidate::new(&own, [0.0; 3], 0.0, &trailing, coast_time, 0.0)
            .expect("candidate");
    assert!(candidate.arrival.delta_ta_deg < 0.0);
}

#[test]
fn inclined_target_shows_in_delta_fi() {
    let own = circular_orbit(MU_EARTH_KM3_S2, 7_000.0, 0.0);
    // Target position lifted out of the equatorial plane at arrival.
    let v = (MU_EARTH_KM3_S2 / 9_000.0).sqrt();
    let incl: f64 = 0.2;
    let target = rendezvous_planner::kepler::OrbitState::new(
        MU_EARTH_KM3_S2,
        0.0,
        [9_000.0, 0.0, 0.0],
        [0.0, v * incl.cos(), v * incl.sin()],
    );

    let candidate =
        RendezvousCandidate::new(&own, [0.0; 3], 0.0, &target, 2_000.0, 0.0).expect("candidate");
    assert!(
        candidate.arrival.delta_fi_deg.abs() > 1.0,
        "expected a visible inclination residual, got {}",
        candidate.arrival.delta_fi_deg
    );
}
