//! Inverse of the standard normal CDF, used for the Wilson critical value.

use statrs::distribution::{ContinuousCDF, Normal};

use super::types::Confidence;

/// Φ⁻¹(p). Returns ±∞ at the endpoints and NaN outside [0, 1].
pub fn inverse_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    Normal::standard().inverse_cdf(p)
}

/// Two-sided critical value Φ⁻¹(1 − (1 − c) / 2).
///
/// Evaluated through the lower tail, −Φ⁻¹((1 − c) / 2), so that levels
/// close to 1 stay finite instead of rounding the argument up to 1.
pub fn two_sided_z(confidence: Confidence) -> f64 {
    -inverse_cdf((1.0 - confidence.level()) / 2.0)
}
