/// Recommended default overwrite plan
///
/// A fixed, pre-vetted five-pass recipe for callers that want a sane
/// default: random, the two deterministic patterns, then two more random
/// passes. Nothing in the engine or evaluator consumes this; it exists so a
/// host can seed its pass selection and feed the tokens back through
/// `StrengthEvaluator` or the parser.
use crate::PassType;

/// The recommended token sequence, in execution order. The deterministic
/// entries use decorated labels so they double as display strings; the plan
/// parser maps them through its prefix rules.
pub const RECOMMENDED_TOKENS: [&str; 5] =
    ["Random", "Zero (0x00)", "One (0xFF)", "Random", "Random"];

/// Recommended plan as raw tokens, independent of any input or prior calls
pub fn suggested_passes() -> &'static [&'static str] {
    &RECOMMENDED_TOKENS
}

/// Recommended plan as parsed pass kinds, for callers going straight to the
/// erase engine
pub fn suggested_plan() -> Vec<PassType> {
    super::StrengthEvaluator::parse_plan(&RECOMMENDED_TOKENS)
}
