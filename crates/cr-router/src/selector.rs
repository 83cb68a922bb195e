//! Model selection from tier.

use crate::config::ResolvedConfig;
use crate::types::{RouteDecision, ScoreResult, Tier};
use std::time::Instant;

/// Resolve the tier's model and build the final decision.
pub fn select_model(score: ScoreResult, config: &ResolvedConfig, started: Instant) -> RouteDecision {
    let tier_model = config.tier_model(score.tier);
    RouteDecision {
        tier: score.tier,
        model: tier_model.primary,
        fallback: tier_model.fallback,
        score,
        latency_ms: elapsed_ms(started),
    }
}

/// Primary model followed by the fallback, if any.
pub fn fallback_chain(tier: Tier, config: &ResolvedConfig) -> Vec<String> {
    let tier_model = config.tier_model(tier);
    let mut chain = vec![tier_model.primary];
    chain.extend(tier_model.fallback);
    chain
}

/// Milliseconds since `started`, rounded to microsecond precision.
fn elapsed_ms(started: Instant) -> f64 {
    let ms = started.elapsed().as_secs_f64() * 1000.0;
    (ms * 1000.0).round() / 1000.0
}
