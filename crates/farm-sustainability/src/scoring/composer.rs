use serde::{Deserialize, Serialize};

use super::fuzzy::{defuzzify, Membership, STANDARD_BREAKPOINTS};
use super::normalize::clamp_score;

/// A low membership above this fires the "low sustainability" rule.
const LOW_RULE_THRESHOLD: f64 = 0.5;
/// Medium/high memberships above this count towards their majority rule.
const MAJORITY_RULE_THRESHOLD: f64 = 0.3;
const MAJORITY: usize = 2;

/// Inference rules that can set a band of the composite membership.
///
/// The rules are not mutually exclusive: bimodal inputs can fire both the
/// low and the high rule, and the bands simply accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionRule {
    AnyIndexLow,
    MajorityMedium,
    MajorityHigh,
}

/// Result of fusing the three index scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionOutcome {
    pub score: f64,
    pub fired: Vec<CompositionRule>,
    /// Composite membership after normalization; empty when no rule fired.
    pub membership: Membership,
    /// True when no rule fired and the arithmetic mean was returned instead.
    pub used_mean_fallback: bool,
}

pub fn compose_sustainability(economic: f64, social: f64, environmental: f64) -> CompositionOutcome {
    let inputs = [
        STANDARD_BREAKPOINTS.membership(economic),
        STANDARD_BREAKPOINTS.membership(social),
        STANDARD_BREAKPOINTS.membership(environmental),
    ];

    let mut fired = Vec::new();
    let mut composite = Membership::default();

    if inputs.iter().any(|input| input.low > LOW_RULE_THRESHOLD) {
        composite.low = inputs.iter().map(|input| input.low).fold(0.0, f64::max);
        fired.push(CompositionRule::AnyIndexLow);
    }

    if majority(&inputs, |input| input.medium) {
        composite.medium = mean(&inputs, |input| input.medium);
        fired.push(CompositionRule::MajorityMedium);
    }

    if majority(&inputs, |input| input.high) {
        composite.high = mean(&inputs, |input| input.high);
        fired.push(CompositionRule::MajorityHigh);
    }

    if composite.is_empty() {
        let mean_score = clamp_score((economic + social + environmental) / 3.0);
        tracing::debug!(mean_score, "no composition rule fired; using arithmetic mean");
        return CompositionOutcome {
            score: mean_score,
            fired,
            membership: composite,
            used_mean_fallback: true,
        };
    }

    let membership = composite.normalized();
    CompositionOutcome {
        score: clamp_score(defuzzify(&membership)),
        fired,
        membership,
        used_mean_fallback: false,
    }
}

fn majority(inputs: &[Membership; 3], band: impl Fn(&Membership) -> f64) -> bool {
    inputs
        .iter()
        .filter(|input| band(*input) > MAJORITY_RULE_THRESHOLD)
        .count()
        >= MAJORITY
}

fn mean(inputs: &[Membership; 3], band: impl Fn(&Membership) -> f64) -> f64 {
    inputs.iter().map(band).sum::<f64>() / inputs.len() as f64
}
