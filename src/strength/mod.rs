/// Overwrite-plan strength scoring
///
/// Turns caller-supplied pass tokens into a plan and scores how resistant
/// that plan is presumed to be against forensic recovery. Scoring rewards
/// random passes and pattern diversity, and penalizes homogeneous or
/// deterministic-heavy plans. Both operations are total: unparseable tokens
/// are dropped, and every plan maps to a report.
pub mod suggest;


use crate::PassType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Human-readable strength band derived from the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthLabel {
    Weak,
    Moderate,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl StrengthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Moderate => "Moderate",
            StrengthLabel::Strong => "Strong",
            StrengthLabel::VeryStrong => "Very Strong",
        }
    }

    /// Band boundaries form a total order over non-negative scores with no
    /// gaps: <=4, <=8, <=14, above.
    fn for_score(score: u32) -> Self {
        match score {
            0..=4 => StrengthLabel::Weak,
            5..=8 => StrengthLabel::Moderate,
            9..=14 => StrengthLabel::Strong,
            _ => StrengthLabel::VeryStrong,
        }
    }

    /// Coarse 0-100 indicator for strength meters
    fn visual(&self) -> u8 {
        match self {
            StrengthLabel::Weak => 25,
            StrengthLabel::Moderate => 50,
            StrengthLabel::Strong => 75,
            StrengthLabel::VeryStrong => 100,
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring one plan. Recomputed on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthReport {
    pub score: u32,
    pub label: StrengthLabel,
    /// 25/50/75/100 per band, or 0 for an empty plan
    pub visual: u8,
}

/// Tolerant token parser plus the scoring heuristic
pub struct StrengthEvaluator;

impl StrengthEvaluator {
    /// Maximum score a homogeneous plan (a single pass kind) can reach
    pub const HOMOGENEOUS_CAP: u32 = 4;

    /// Ceiling applied once any random pass is present
    pub const RANDOM_CEILING: u32 = 20;

    /// Map raw tokens onto a plan. Tokens that match no rule are dropped;
    /// order is preserved and duplicates are kept.
    pub fn parse_plan<S: AsRef<str>>(tokens: &[S]) -> Vec<PassType> {
        tokens
            .iter()
            .filter_map(|token| Self::parse_token(token.as_ref()))
            .collect()
    }

    /// Ordered matching rules, first hit wins. Prefix rules let decorated
    /// labels like "Zero (0x00)" parse; the final rule is a strict
    /// variant-name match.
    fn parse_token(token: &str) -> Option<PassType> {
        let token = token.trim();
        let lower = token.to_ascii_lowercase();

        if lower.starts_with("zero") {
            return Some(PassType::Zeros);
        }
        if lower.starts_with("one") {
            return Some(PassType::Ones);
        }
        if lower == "random" {
            return Some(PassType::Random);
        }
        token.parse().ok()
    }

    /// Parse tokens and score the resulting plan
    pub fn evaluate<S: AsRef<str>>(tokens: &[S]) -> StrengthReport {
        Self::evaluate_plan(&Self::parse_plan(tokens))
    }

    /// Score a plan. Random passes contribute 3 points each, deterministic
    /// passes 1; a diversity bonus of up to 3 applies to mixed plans, and
    /// the band ceilings keep single-kind and deterministic-heavy plans in
    /// the lower labels.
    pub fn evaluate_plan(plan: &[PassType]) -> StrengthReport {
        if plan.is_empty() {
            return StrengthReport {
                score: 0,
                label: StrengthLabel::Weak,
                visual: 0,
            };
        }

        let mut score: u32 = 0;
        let mut strong: u32 = 0;
        let mut weak: u32 = 0;

        for pass in plan {
            match pass {
                PassType::Random => {
                    score += 3;
                    strong += 1;
                }
                PassType::Zeros | PassType::Ones => {
                    score += 1;
                    weak += 1;
                }
            }
        }

        let distinct = plan.iter().collect::<HashSet<_>>().len() as u32;

        let score = if distinct == 1 {
            score.min(Self::HOMOGENEOUS_CAP)
        } else {
            let score = score + distinct.min(3);
            if strong >= 2 && distinct >= 3 {
                (score + 2).min(Self::RANDOM_CEILING)
            } else if strong >= 1 {
                score.min(Self::RANDOM_CEILING)
            } else if weak as f64 / plan.len() as f64 > 0.6 {
                score.min(8)
            } else {
                score
            }
        };

        let label = StrengthLabel::for_score(score);
        StrengthReport {
            score,
            label,
            visual: label.visual(),
        }
    }
}
