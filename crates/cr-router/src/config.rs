//! Router configuration: the user-supplied partial form and its resolution
//! over built-in defaults.

use crate::error::Result;
use crate::types::{Dimension, Tier, TierModelConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// Effective weight per dimension.
pub type Weights = BTreeMap<Dimension, f64>;

/// Tier boundaries: [TRIVIAL→SIMPLE, SIMPLE→MODERATE, MODERATE→COMPLEX, COMPLEX→EXPERT].
pub type Thresholds = [f64; 4];

pub const DEFAULT_THRESHOLDS: Thresholds = [0.15, 0.35, 0.55, 0.75];
pub const DEFAULT_MODEL: &str = "default";

/// Partial per-tier model assignment; missing fields keep the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierModelOverride {
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringOverrides {
    #[serde(default)]
    pub weights: BTreeMap<Dimension, f64>,
}

/// User-supplied configuration. Every field is optional and deep-merged over
/// the defaults by [`resolve_config`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    #[serde(default)]
    pub tiers: BTreeMap<Tier, TierModelOverride>,
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
    #[serde(default)]
    pub scoring: Option<ScoringOverrides>,
    #[serde(default)]
    pub logging: Option<bool>,
}

impl RouterConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// Fully populated configuration consumed by the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub tiers: BTreeMap<Tier, TierModelConfig>,
    pub thresholds: Thresholds,
    pub weights: Weights,
    pub logging: bool,
}

impl ResolvedConfig {
    /// Model assignment for a tier; an unmapped tier gets the default model.
    pub fn tier_model(&self, tier: Tier) -> TierModelConfig {
        self.tiers.get(&tier).cloned().unwrap_or_else(default_tier_model)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_config(None)
    }
}

pub fn default_weights() -> Weights {
    Dimension::ALL.iter().map(|&d| (d, d.default_weight())).collect()
}

fn default_tier_model() -> TierModelConfig {
    TierModelConfig { primary: DEFAULT_MODEL.to_string(), fallback: None }
}

fn default_tiers() -> BTreeMap<Tier, TierModelConfig> {
    Tier::ALL.iter().map(|&t| (t, default_tier_model())).collect()
}

/// Merge a user config over the defaults.
///
/// Weights are not renormalised and thresholds are not reordered: both are
/// the caller's responsibility. Suspicious values are logged and passed
/// through unchanged.
pub fn resolve_config(raw: Option<&RouterConfig>) -> ResolvedConfig {
    let mut tiers = default_tiers();
    let mut thresholds = DEFAULT_THRESHOLDS;
    let mut weights = default_weights();
    let mut logging = false;

    if let Some(raw) = raw {
        for (tier, over) in &raw.tiers {
            let entry = tiers.entry(*tier).or_insert_with(default_tier_model);
            if let Some(primary) = &over.primary {
                entry.primary = primary.clone();
            }
            if let Some(fallback) = &over.fallback {
                entry.fallback = Some(fallback.clone());
            }
        }
        if let Some(t) = raw.thresholds {
            thresholds = t;
        }
        if let Some(scoring) = &raw.scoring {
            for (dimension, weight) in &scoring.weights {
                weights.insert(*dimension, *weight);
            }
        }
        logging = raw.logging.unwrap_or(false);
    }

    let sum: f64 = weights.values().sum();
    if (sum - 1.0).abs() > 1e-6 {
        tracing::warn!(sum, "dimension weights do not sum to 1.0; calibration is tuned for the defaults");
    }
    if !thresholds.windows(2).all(|w| w[0] < w[1]) {
        tracing::warn!(?thresholds, "tier thresholds are not strictly ascending");
    }

    ResolvedConfig { tiers, thresholds, weights, logging }
}

/// The default config instance.
pub static DEFAULT_CONFIG: LazyLock<ResolvedConfig> = LazyLock::new(ResolvedConfig::default);
