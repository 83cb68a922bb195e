use serde::{Deserialize, Serialize};
use std::fmt;

/// Complexity tier, ordered from simplest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Trivial = 0,
    Simple = 1,
    Moderate = 2,
    Complex = 3,
    Expert = 4,
}

impl Tier {
    /// All tiers in ascending order.
    pub const ALL: [Tier; 5] = [
        Tier::Trivial,
        Tier::Simple,
        Tier::Moderate,
        Tier::Complex,
        Tier::Expert,
    ];

    /// Ordinal position on the scale, 0 for TRIVIAL.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Trivial => "TRIVIAL",
            Tier::Simple => "SIMPLE",
            Tier::Moderate => "MODERATE",
            Tier::Complex => "COMPLEX",
            Tier::Expert => "EXPERT",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The eight scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Reasoning,
    CodeTech,
    TaskSteps,
    DomainExpert,
    OutputComplex,
    Creativity,
    ContextDepend,
    MessageLength,
}

impl Dimension {
    /// All dimensions in display order.
    pub const ALL: [Dimension; 8] = [
        Dimension::Reasoning,
        Dimension::CodeTech,
        Dimension::TaskSteps,
        Dimension::DomainExpert,
        Dimension::OutputComplex,
        Dimension::Creativity,
        Dimension::ContextDepend,
        Dimension::MessageLength,
    ];

    /// Identifier used in configs and logs.
    pub fn id(self) -> &'static str {
        match self {
            Dimension::Reasoning => "reasoning",
            Dimension::CodeTech => "codeTech",
            Dimension::TaskSteps => "taskSteps",
            Dimension::DomainExpert => "domainExpert",
            Dimension::OutputComplex => "outputComplex",
            Dimension::Creativity => "creativity",
            Dimension::ContextDepend => "contextDepend",
            Dimension::MessageLength => "messageLength",
        }
    }

    /// Built-in weight. The defaults sum to 1.0.
    pub fn default_weight(self) -> f64 {
        match self {
            Dimension::Reasoning => 0.20,
            Dimension::CodeTech => 0.18,
            Dimension::TaskSteps => 0.15,
            Dimension::DomainExpert => 0.12,
            Dimension::OutputComplex => 0.10,
            Dimension::Creativity => 0.10,
            Dimension::ContextDepend => 0.08,
            Dimension::MessageLength => 0.07,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single keyword or pattern in the static table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordEntry {
    pub pattern: &'static str,
    /// Contribution when matched, in (0, 1].
    pub weight: f64,
    pub is_regex: bool,
}

/// Per-dimension score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore {
    pub dimension: Dimension,
    /// Raw signal, 0–1.
    pub raw: f64,
    /// Effective weight from the resolved config.
    pub weight: f64,
    /// `raw × weight`.
    pub weighted: f64,
}

/// Full scoring breakdown for a single message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub dimensions: Vec<DimensionScore>,
    /// Σ weighted, before calibration.
    pub raw_sum: f64,
    pub calibrated: f64,
    pub tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub override_applied: Option<String>,
}

impl ScoreResult {
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    pub fn is_override(&self) -> bool {
        self.override_applied.is_some()
    }
}

/// Model assignment for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierModelConfig {
    pub primary: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fallback: Option<String>,
}

/// The final routing decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDecision {
    pub tier: Tier,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fallback: Option<String>,
    pub score: ScoreResult,
    /// Wall-clock time of the scoring pass, fractional milliseconds.
    pub latency_ms: f64,
}
