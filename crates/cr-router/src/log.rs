//! Decision logging.

use crate::types::RouteDecision;

/// Render a decision as a multi-line block for humans.
pub fn format_decision(decision: &RouteDecision) -> String {
    let score = &decision.score;
    let mut lines = vec![
        "─── Route Decision ───".to_string(),
        format!("  Tier:       {}", decision.tier),
        format!("  Model:      {}", decision.model),
    ];
    if let Some(fallback) = &decision.fallback {
        lines.push(format!("  Fallback:   {fallback}"));
    }
    lines.push(format!(
        "  Score:      {:.4} (raw sum: {:.4})",
        score.calibrated, score.raw_sum
    ));
    if let Some(rule) = &score.override_applied {
        lines.push(format!("  Override:   {rule}"));
    }

    let active: Vec<String> = score
        .dimensions
        .iter()
        .filter(|d| d.raw > 0.0)
        .map(|d| {
            format!(
                "    {:<14} {:.3} × {} = {:.4}",
                d.dimension.id(),
                d.raw,
                d.weight,
                d.weighted
            )
        })
        .collect();
    if !active.is_empty() {
        lines.push("  Dimensions:".to_string());
        lines.extend(active);
    }

    lines.push(format!("  Latency:    {} ms", decision.latency_ms));
    lines.join("\n")
}

/// Log a decision. The full breakdown goes out at info level only when
/// `verbose` is set; a one-line summary is always emitted at debug.
pub fn log_decision(decision: &RouteDecision, verbose: bool) {
    tracing::debug!(
        tier = %decision.tier,
        model = %decision.model,
        score = decision.score.calibrated,
        raw_sum = decision.score.raw_sum,
        override_rule = decision.score.override_applied.as_deref().unwrap_or(""),
        latency_ms = decision.latency_ms,
        "route decision"
    );
    if verbose {
        tracing::info!("{}", format_decision(decision));
    }
}
