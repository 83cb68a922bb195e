//! Hard-rule overrides.
//!
//! Evaluated before any scoring, in table order. The first rule that matches
//! fixes the tier and the remaining rules are not evaluated.

use crate::types::Tier;

/// A matched override: the forced tier and the rule identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideMatch {
    pub tier: Tier,
    pub rule: String,
}

/// One rule: a predicate that returns the rule text when it fires, and the
/// tier it forces.
pub struct OverrideRule {
    pub id: &'static str,
    pub tier: Tier,
    test: fn(&str) -> Option<String>,
}

impl OverrideRule {
    pub fn evaluate(&self, message: &str) -> Option<OverrideMatch> {
        (self.test)(message).map(|rule| OverrideMatch { tier: self.tier, rule })
    }
}

/// Tokens that mark a short message as technical (disqualifies the short rule).
pub const TECH_TOKENS: &[&str] = &[
    "api", "sql", "css", "html", "http", "json", "yaml", "xml",
    "bug", "git", "npm", "pip", "ssh", "tcp", "udp", "url",
    "dns", "jwt", "rpc", "sdk", "ide", "cli", "gpu", "cpu",
    "代码", "函数", "算法", "编程", "调试", "接口", "数据库",
    "code", "func", "def", "var", "let", "int",
];

/// Phrases that request system / architecture design or a from-scratch build.
pub const EXPERT_PHRASES: &[&str] = &[
    "系统设计", "架构设计", "从零搭建",
    "system design", "architecture design", "build from scratch",
    "系统架构", "整体架构", "技术方案设计",
    "design a system", "design the architecture",
];

const SHORT_MESSAGE_MAX_CHARS: usize = 5;
const CODE_FENCE: &str = "```";
const MIN_CODE_FENCES: usize = 3;

/// The override rules in evaluation order.
pub static OVERRIDE_RULES: [OverrideRule; 3] = [
    OverrideRule {
        id: "short_nontechnical",
        tier: Tier::Trivial,
        test: short_nontechnical,
    },
    OverrideRule {
        id: "multiple_code_blocks",
        tier: Tier::Complex,
        test: multiple_code_blocks,
    },
    OverrideRule {
        id: "expert_keyword",
        tier: Tier::Expert,
        test: expert_keyword,
    },
];

/// Evaluate the override rules against a raw message. `None` when no rule fires.
pub fn check_override(message: &str) -> Option<OverrideMatch> {
    OVERRIDE_RULES.iter().find_map(|rule| rule.evaluate(message))
}

fn short_nontechnical(message: &str) -> Option<String> {
    let stripped = message.chars().filter(|c| !c.is_whitespace()).count();
    (stripped <= SHORT_MESSAGE_MAX_CHARS && !has_tech_token(message))
        .then(|| "short_nontechnical (≤5 chars)".to_string())
}

fn multiple_code_blocks(message: &str) -> Option<String> {
    // raw fence count: an unclosed block still counts
    (message.matches(CODE_FENCE).count() >= MIN_CODE_FENCES)
        .then(|| "multiple_code_blocks (≥3 fences)".to_string())
}

fn expert_keyword(message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    EXPERT_PHRASES
        .iter()
        .find(|phrase| lower.contains(*phrase))
        .map(|phrase| format!("expert_keyword (\"{phrase}\")"))
}

pub fn has_tech_token(message: &str) -> bool {
    let lower = message.to_lowercase();
    TECH_TOKENS.iter().any(|t| lower.contains(t))
}
