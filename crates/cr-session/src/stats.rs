//! Running routing statistics.

use cr_router::{RouteDecision, Tier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Point-in-time view of the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterStats {
    pub total_routed: u64,
    pub tier_counts: BTreeMap<Tier, u64>,
    pub avg_latency_ms: f64,
    pub override_count: u64,
}

impl Default for RouterStats {
    fn default() -> Self {
        Self {
            total_routed: 0,
            tier_counts: Tier::ALL.iter().map(|&t| (t, 0)).collect(),
            avg_latency_ms: 0.0,
            override_count: 0,
        }
    }
}

impl RouterStats {
    pub fn count(&self, tier: Tier) -> u64 {
        self.tier_counts.get(&tier).copied().unwrap_or(0)
    }
}

/// Accumulates counts and an incremental mean latency across decisions.
#[derive(Debug, Default)]
pub struct StatsTracker {
    inner: Mutex<RouterStats>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, decision: &RouteDecision) {
        let mut stats = self.inner.lock().unwrap();
        stats.total_routed += 1;
        *stats.tier_counts.entry(decision.tier).or_insert(0) += 1;
        if decision.score.is_override() {
            stats.override_count += 1;
        }
        let n = stats.total_routed as f64;
        stats.avg_latency_ms += (decision.latency_ms - stats.avg_latency_ms) / n;
    }

    pub fn snapshot(&self) -> RouterStats {
        self.inner.lock().unwrap().clone()
    }

    pub fn reset(&self) {
        *self.inner.lock().unwrap() = RouterStats::default();
    }
}
