//! Claw Router: 8-dimension bilingual (Chinese/English) message complexity
//! classifier.
//!
//! Pipeline: hard-rule overrides → dimension scoring → calibration → tier
//! mapping → model selection. Pure and synchronous; safe to call from any
//! number of threads.

pub mod calibrate;
pub mod config;
pub mod error;
pub mod keywords;
pub mod log;
pub mod overrides;
pub mod scorer;
pub mod selector;
pub mod types;

pub use calibrate::{calibrate, score_to_tier};
pub use config::{resolve_config, ResolvedConfig, RouterConfig, DEFAULT_CONFIG};
pub use error::{Result, RouterError};
pub use overrides::{check_override, OverrideMatch};
pub use scorer::{score_dimensions, score_length};
pub use selector::{fallback_chain, select_model};
pub use types::*;

use config::Weights;
use std::time::Instant;

/// Route a message: determine its tier and model.
pub fn route(message: &str, config: &ResolvedConfig) -> RouteDecision {
    let started = Instant::now();
    let score = score_only(message, config);
    select_model(score, config, started)
}

/// Score a message without resolving a model.
pub fn score_only(message: &str, config: &ResolvedConfig) -> ScoreResult {
    if let Some(matched) = check_override(message) {
        return override_score(matched, &config.weights);
    }

    let dimensions = score_dimensions(message, &config.weights);
    let raw_sum: f64 = dimensions.iter().map(|d| d.weighted).sum();
    let calibrated = calibrate(raw_sum);
    let tier = score_to_tier(calibrated, &config.thresholds);

    ScoreResult { dimensions, raw_sum, calibrated, tier, override_applied: None }
}

/// Synthetic result for an override: every score is zero, only the tier and
/// rule are carried.
fn override_score(matched: OverrideMatch, weights: &Weights) -> ScoreResult {
    let dimensions = Dimension::ALL
        .iter()
        .map(|&dimension| DimensionScore {
            dimension,
            raw: 0.0,
            weight: weights.get(&dimension).copied().unwrap_or_else(|| dimension.default_weight()),
            weighted: 0.0,
        })
        .collect();
    ScoreResult {
        dimensions,
        raw_sum: 0.0,
        calibrated: 0.0,
        tier: matched.tier,
        override_applied: Some(matched.rule),
    }
}
