//! Score calibration and tier mapping.

use crate::config::Thresholds;
use crate::types::Tier;

/// Raw sums at or above this map to 1.0 before the power curve.
pub const CALIBRATION_SPAN: f64 = 0.50;
pub const CALIBRATION_EXPONENT: f64 = 0.75;

/// Stretch the raw weighted sum into 0–1.
///
/// Raw sums rarely exceed ~0.5 because few messages max out every dimension,
/// so the effective range [0, 0.5] is stretched linearly onto [0, 1] and then
/// bent by a power curve that widens the spacing in the middle tiers. Tuned
/// for the default weights.
pub fn calibrate(raw_sum: f64) -> f64 {
    let stretched = (raw_sum / CALIBRATION_SPAN).clamp(0.0, 1.0);
    stretched.powf(CALIBRATION_EXPONENT)
}

/// Map a calibrated score to a tier.
pub fn score_to_tier(score: f64, thresholds: &Thresholds) -> Tier {
    if score < thresholds[0] {
        Tier::Trivial
    } else if score < thresholds[1] {
        Tier::Simple
    } else if score < thresholds[2] {
        Tier::Moderate
    } else if score < thresholds[3] {
        Tier::Complex
    } else {
        Tier::Expert
    }
}
