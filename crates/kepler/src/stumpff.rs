//! Stumpff functions C₂ and C₃ with series fallback near zero.

const SERIES_BAND: f64 = 1e-6;

/// Evaluate the Stumpff functions `C₂(z)` and `C₃(z)` for all orbit regimes.
///
/// Elliptic for `z > 0`, hyperbolic for `z < 0`; a Taylor series keeps the
/// parabolic neighbourhood numerically stable.
pub fn stumpff_c2_c3(z: f64) -> (f64, f64) {
    if z > SERIES_BAND {
        let sz = z.sqrt();
        ((1.0 - sz.cos()) / z, (sz - sz.sin()) / (sz * z))
    } else if z < -SERIES_BAND {
        let s = (-z).sqrt();
        ((s.cosh() - 1.0) / (-z), (s.sinh() - s) / (s * -z))
    } else {
        (
            0.5 - z / 24.0 + z * z / 720.0 - z * z * z / 40_320.0,
            1.0 / 6.0 - z / 120.0 + z * z / 5_040.0 - z * z * z / 362_880.0,
        )
    }
}
