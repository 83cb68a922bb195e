//! 8-dimension scorer.
//!
//! Each dimension produces a raw 0–1 signal from keyword matches (soft-max
//! aggregation), structural heuristics over punctuation and connectives, or
//! a numeric curve over message length. Pure and allocation-light: the only
//! per-call allocation is the lower-cased copy of the message.

use crate::config::Weights;
use crate::keywords::{KeywordTable, KEYWORDS};
use crate::types::{Dimension, DimensionScore};
use regex::Regex;
use std::sync::LazyLock;

/// Creativity is multiplied by this when the message reads as a coding request.
const CODE_CONTEXT_DAMPING: f64 = 0.15;
/// codeTech is multiplied by this for short messages without other complexity.
const SHORT_TECH_DAMPING: f64 = 0.5;
const SHORT_TECH_MAX_CHARS: usize = 60;

static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[0-9]+[.)]").unwrap());
static BULLET_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[-*•]").unwrap());

static CJK_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"怎么样|什么|怎么|如何|哪个|哪些|多少|几个|是否|能否|可以吗").unwrap()
});
static EN_QUESTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?-u:\b)(what|how|which|where|when|who)(?-u:\b)").unwrap());
static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)如果|假如|假设|若是|if\s|suppose|assuming|given\sthat").unwrap()
});
static COMPARATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)比较|对比|区别|差异|优缺点|versus|vs\.?|compared?\sto|differ").unwrap()
});
static CAUSAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)因为|所以|导致|由于|因此|therefore|because|hence|thus|consequently").unwrap()
});
static POLITE_REQUEST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"帮我|请|麻烦").unwrap());

static ANAPHORA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)这个|那个|它|this|that|these|those|it\s").unwrap());
static AS_MENTIONED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)上面|上述|前述|上文|aforementioned|the\s+above").unwrap());

static CN_WRITE_REQUEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"帮我写|写一[篇个首段]|帮我创作|帮我起名").unwrap());
static CN_ABOUT_TOPIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"关于.{2,}的").unwrap());
static EN_WRITE_REQUEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)write\s+(a|an|me|the)(?-u:\b)").unwrap());
static WORD_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[0-9]+\s*字|字左右|[0-9]+\s*words?").unwrap());

// Code/tech context: language and tool names, coding nouns, source-file extensions.
// Word boundaries and digits are ASCII throughout, so `用rust写` still hits.
static CODE_CONTEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)python|javascript|typescript|golang|kubernetes|docker|graphql|node\.js|c\+\+|",
        r"mysql|postgres|powershell|",
        r"(?-u:\b)(java|rust|react|vue|angular|sql|bash|shell|git|npm|cargo|html|css)(?-u:\b)|",
        r"代码|函数|脚本|程序|接口|爬虫|算法|编程|",
        r"(?-u:\b)(function|script|code|api|class|method|program|compiler|regex)s?(?-u:\b)|",
        r"\.(py|js|ts|tsx|jsx|rs|go|java|cpp|hpp|rb|php|sh|sql|swift|kt|cs)(?-u:\b)",
    ))
    .unwrap()
});

// Signals that keep a short tech message from being damped.
static SYSTEM_NOUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)系统|架构|分布式|微服务|高并发|集群|architecture|system|distributed|microservice|scalab|cluster")
        .unwrap()
});
static STEP_CHAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(first|首先|先).*(then|然后|再|接着).*(finally|最后)").unwrap()
});

// ── Public API ─────────────────────────────────────────────────────────────

/// Score a message across all 8 dimensions, in [`Dimension::ALL`] order.
///
/// Missing entries in `weights` fall back to the dimension's default weight.
pub fn score_dimensions(message: &str, weights: &Weights) -> Vec<DimensionScore> {
    score_dimensions_with(&KEYWORDS, message, weights)
}

/// Same as [`score_dimensions`], against an explicit keyword table.
pub fn score_dimensions_with(
    table: &KeywordTable,
    message: &str,
    weights: &Weights,
) -> Vec<DimensionScore> {
    let lower = message.to_lowercase();
    Dimension::ALL
        .iter()
        .map(|&dimension| {
            let raw = clamp(raw_score(table, dimension, message, &lower));
            let weight = weights
                .get(&dimension)
                .copied()
                .unwrap_or_else(|| dimension.default_weight());
            DimensionScore { dimension, raw, weight, weighted: raw * weight }
        })
        .collect()
}

fn raw_score(table: &KeywordTable, dimension: Dimension, message: &str, lower: &str) -> f64 {
    match dimension {
        Dimension::MessageLength => score_length(message),
        Dimension::TaskSteps => {
            score_keywords(table, dimension, lower).max(score_structural_steps(message))
        }
        Dimension::ContextDepend => {
            score_keywords(table, dimension, lower).max(score_context_signals(lower))
        }
        Dimension::Creativity => {
            let raw = score_keywords(table, dimension, lower).max(score_creative_request(lower));
            if has_code_context(lower) {
                raw * CODE_CONTEXT_DAMPING
            } else {
                raw
            }
        }
        Dimension::CodeTech => {
            let raw = score_keywords(table, dimension, lower);
            if raw > 0.0
                && message.chars().count() < SHORT_TECH_MAX_CHARS
                && !has_complexity_signals(message, lower)
            {
                raw * SHORT_TECH_DAMPING
            } else {
                raw
            }
        }
        Dimension::Reasoning => {
            score_keywords(table, dimension, lower).max(score_reasoning_structure(lower))
        }
        Dimension::DomainExpert | Dimension::OutputComplex => {
            score_keywords(table, dimension, lower)
        }
    }
}

// ── Keyword aggregation ────────────────────────────────────────────────────

/// Soft-max over matched entries: `1 − ∏(1 − wᵢ)`.
///
/// Saturates towards 1 without hard clipping; adding a match never lowers the
/// result.
pub fn score_keywords(table: &KeywordTable, dimension: Dimension, lower: &str) -> f64 {
    let complement = table
        .matches(dimension, lower)
        .fold(1.0, |acc, entry| acc * (1.0 - entry.weight));
    1.0 - complement
}

// ── Structural heuristics ──────────────────────────────────────────────────

/// Multi-step structure from list punctuation, numbering, sentences and bullets.
fn score_structural_steps(message: &str) -> f64 {
    let mut score = 0.0;

    let cjk_separators = message.chars().filter(|c| matches!(c, '，' | '、' | '；')).count();
    if cjk_separators >= 3 {
        score += 0.3;
    } else if cjk_separators >= 1 {
        score += 0.15;
    }

    if message.chars().filter(|&c| c == ',').count() >= 3 {
        score += 0.2;
    }

    if NUMBERED_ITEM.find_iter(message).count() >= 2 {
        score += 0.4;
    }

    let terminators = message
        .chars()
        .filter(|c| matches!(c, '。' | '！' | '？' | '.' | '!' | '?'))
        .count();
    if terminators >= 3 {
        score += 0.25;
    }

    if BULLET_ITEM.find_iter(message).count() >= 2 {
        score += 0.3;
    }

    clamp(score)
}

/// Reasoning cues from question density and connective words.
fn score_reasoning_structure(lower: &str) -> f64 {
    let mut score = 0.0;

    let question_marks = lower.chars().filter(|&c| c == '?' || c == '？').count();
    score += match question_marks {
        0 => 0.0,
        1 => 0.10,
        2 => 0.25,
        _ => 0.40,
    };

    if CJK_QUESTION.is_match(lower) {
        score += 0.10;
    }
    if EN_QUESTION.is_match(lower) {
        score += 0.08;
    }
    if CONDITIONAL.is_match(lower) {
        score += 0.25;
    }
    if COMPARATIVE.is_match(lower) {
        score += 0.30;
    }
    if CAUSAL.is_match(lower) {
        score += 0.25;
    }
    if POLITE_REQUEST.is_match(lower) {
        score += 0.05;
    }

    clamp(score)
}

/// Dependence on earlier conversation: pronouns and "as above" references.
fn score_context_signals(lower: &str) -> f64 {
    let mut score = 0.0;
    if ANAPHORA.is_match(lower) {
        score += 0.2;
    }
    if AS_MENTIONED.is_match(lower) {
        score += 0.4;
    }
    clamp(score)
}

/// Creative-writing request phrasing.
fn score_creative_request(lower: &str) -> f64 {
    let mut score = 0.0;
    if CN_WRITE_REQUEST.is_match(lower) {
        score += 0.40;
    }
    if CN_ABOUT_TOPIC.is_match(lower) {
        score += 0.25;
    }
    if EN_WRITE_REQUEST.is_match(lower) {
        score += 0.35;
    }
    if WORD_COUNT.is_match(lower) {
        score += 0.20;
    }
    clamp(score)
}

/// True when the message is about code: a language or tool, a fenced block,
/// a coding noun, or a source-file extension.
pub fn has_code_context(lower: &str) -> bool {
    lower.contains("```") || CODE_CONTEXT.is_match(lower)
}

/// System nouns, an enumeration of requirements, or a first/then/finally chain.
fn has_complexity_signals(message: &str, lower: &str) -> bool {
    if SYSTEM_NOUNS.is_match(lower) || STEP_CHAIN.is_match(lower) {
        return true;
    }
    let separators = message
        .chars()
        .filter(|c| matches!(c, '，' | '、' | '；' | ','))
        .count();
    separators >= 2 || NUMBERED_ITEM.find_iter(message).count() >= 2
}

// ── Length curve ───────────────────────────────────────────────────────────

/// Map character count to a 0–1 signal.
///
/// Counts Unicode scalar values, so an emoji or other astral-plane character
/// counts once (not as two UTF-16 units).
///
/// Piecewise linear up to 2000 chars, then an asymptotic approach to 1.0:
///
/// | chars     | score       |
/// |-----------|-------------|
/// | 0–10      | 0.00–0.05   |
/// | 10–50     | 0.05–0.25   |
/// | 50–150    | 0.25–0.50   |
/// | 150–500   | 0.50–0.75   |
/// | 500–2000  | 0.75–0.90   |
/// | 2000+     | 0.90–1.00   |
pub fn score_length(message: &str) -> f64 {
    let len = message.chars().count() as f64;
    if len <= 10.0 {
        lerp(0.0, 10.0, 0.00, 0.05, len)
    } else if len <= 50.0 {
        lerp(10.0, 50.0, 0.05, 0.25, len)
    } else if len <= 150.0 {
        lerp(50.0, 150.0, 0.25, 0.50, len)
    } else if len <= 500.0 {
        lerp(150.0, 500.0, 0.50, 0.75, len)
    } else if len <= 2000.0 {
        lerp(500.0, 2000.0, 0.75, 0.90, len)
    } else {
        0.90 + 0.10 * (1.0 - (-(len - 2000.0) / 3000.0).exp())
    }
}

fn lerp(x0: f64, x1: f64, y0: f64, y1: f64, x: f64) -> f64 {
    if x1 == x0 {
        return y0;
    }
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

pub(crate) fn clamp(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}
