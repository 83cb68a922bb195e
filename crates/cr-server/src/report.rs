//! Status rendering shared by the CLI and the HTTP status endpoint.

use cr_router::{ResolvedConfig, Tier};
use cr_session::RouterStats;
use serde_json::{json, Value};

/// Status as JSON: thresholds, logging flag, tier→model map and stats.
pub fn status_json(config: &ResolvedConfig, stats: &RouterStats) -> Value {
    json!({
        "thresholds": config.thresholds,
        "logging": config.logging,
        "weights": config.weights,
        "tiers": config.tiers,
        "stats": stats,
    })
}

/// Human-readable status block.
pub fn status_text(config: &ResolvedConfig, stats: &RouterStats) -> String {
    let thresholds: Vec<String> = config.thresholds.iter().map(|t| t.to_string()).collect();
    let mut lines = vec![
        "Claw Router — Status".to_string(),
        "─".repeat(40),
        format!("Thresholds: {}", thresholds.join(", ")),
        format!("Logging:    {}", config.logging),
        String::new(),
        "Tier Mapping:".to_string(),
    ];
    lines.extend(Tier::ALL.iter().map(|&tier| {
        let model = config.tier_model(tier);
        let mapping = format!("  {:<10} → {}", tier.as_str(), model.primary);
        match &model.fallback {
            Some(fallback) => format!("{mapping} (fallback: {fallback})"),
            None => mapping,
        }
    }));
    lines.extend([
        String::new(),
        "Stats:".to_string(),
        format!("  Total:      {}", stats.total_routed),
        format!("  Avg ms:     {:.2}", stats.avg_latency_ms),
        format!("  Overrides:  {}", stats.override_count),
        String::new(),
        "Tier Distribution:".to_string(),
    ]);
    lines.extend(
        Tier::ALL
            .iter()
            .map(|&tier| format!("  {:<10} {}", tier.as_str(), stats.count(tier))),
    );
    lines.join("\n")
}
