//! Transfer geometry derived once from the boundary position vectors.

use std::f64::consts::PI;

use rdv_core::vector::{self, Vector3};

/// Relative threshold below which `r1 × r2` is considered degenerate and the
/// caller-supplied orbit normal is used for the quadrant decision instead.
const DEGENERATE_NORMAL_SQ: f64 = 1e-20;

/// Scalar and vector quantities fixed by the two boundary positions.
///
/// Computed exactly once at solver construction and never mutated. `sigma`
/// carries the transfer-angle quadrant in its sign and always lies in
/// `[-1, 1]`; `tau_p <= tau_me` holds for every valid geometry.
#[derive(Debug, Clone)]
pub struct TransferGeometry {
    /// Departure position (km, primary-centred frame).
    pub r1_km: Vector3,
    /// Chord `r2 - r1` (km).
    pub chord_km: Vector3,
    /// Chord length (km).
    pub chord_mag_km: f64,
    /// `|r1| + |r2| + |c|` (km).
    pub m_km: f64,
    /// `|r1| + |r2| - |c|` (km); non-negative by the triangle inequality.
    pub n_km: f64,
    /// Transfer angle in radians, disambiguated beyond pi.
    pub transfer_angle_rad: f64,
    /// Signed angle parameter, `sign * sqrt(n/m)`, in `[-1, 1]`.
    pub sigma: f64,
    /// Normalized parabolic transfer time.
    pub tau_p: f64,
    /// Normalized minimum-energy transfer time.
    pub tau_me: f64,
    // Powers cached for the residual derivatives.
    pub(crate) sigma2: f64,
    pub(crate) sigma3: f64,
    pub(crate) sigma5: f64,
    pub(crate) m3: f64,
    pub(crate) r1_hat: Vector3,
    pub(crate) chord_hat: Vector3,
}

impl TransferGeometry {
    /// Build the geometry from departure and destination positions.
    ///
    /// `fallback_normal` stands in for `r1 × r2` when the two positions are
    /// numerically collinear; the usual choice is the departure orbit's own
    /// normal vector.
    pub fn new(r1_km: &Vector3, r2_km: &Vector3, fallback_normal: &Vector3) -> Self {
        let r1m = vector::norm(r1_km);
        let r2m = vector::norm(r2_km);

        let mut h = vector::cross(r1_km, r2_km);
        if vector::dot(&h, &h) < DEGENERATE_NORMAL_SQ * r1m * r1m * r2m * r2m {
            h = *fallback_normal;
        }

        let chord_km = vector::sub(r2_km, r1_km);
        let chord_mag_km = vector::norm(&chord_km);
        let rrm = r1m + r2m;
        let m_km = rrm + chord_mag_km;
        let n_km = (rrm - chord_mag_km).max(0.0);

        let mut transfer_angle_rad = vector::angle_between(r1_km, r2_km);
        if h[2] < 0.0 {
            transfer_angle_rad = 2.0 * PI - transfer_angle_rad;
        }

        let mut sigma = (n_km / m_km).sqrt();
        if transfer_angle_rad > PI {
            sigma = -sigma;
        }
        let sigma2 = sigma * sigma;
        let sigma3 = sigma2 * sigma;
        let sigma5 = sigma2 * sigma3;

        Self {
            r1_km: *r1_km,
            chord_km,
            chord_mag_km,
            m_km,
            n_km,
            transfer_angle_rad,
            sigma,
            tau_p: 2.0 / 3.0 * (1.0 - sigma3),
            tau_me: sigma.acos() + sigma * (1.0 - sigma2).sqrt(),
            sigma2,
            sigma3,
            sigma5,
            m3: m_km * m_km * m_km,
            r1_hat: vector::normalize(r1_km),
            chord_hat: vector::scale(&chord_km, 1.0 / chord_mag_km),
        }
    }
}
