//! Threshold-precedence decision rules.
//!
//! The decoder is not an argmax. Rules are examined in order and the first
//! match wins: `non_dental` must clear a strict 0.5 bar, `caries` an
//! inclusive 0.35 one, and everything else is `healthy`. A 0.35 caries
//! score therefore outranks a 0.55 healthy score.

use crate::classes::{Prediction, RawScores, ToothClass};

/// Inclusive bar for flagging caries.
pub const CARIES_THRESHOLD: f32 = 0.35;
/// Strict bar for rejecting an input as not a dental photograph.
pub const NON_DENTAL_THRESHOLD: f32 = 0.5;

/// One entry of the ordered rule table.
#[derive(Debug, Clone, Copy)]
struct ThresholdRule {
    class: ToothClass,
    threshold: f32,
    /// `true` compares with `>=`, `false` with strict `>`.
    inclusive: bool,
}

impl ThresholdRule {
    fn fires(&self, score: f32) -> bool {
        if self.inclusive { score >= self.threshold } else { score > self.threshold }
    }
}

/// The decision table. Order matters: the first rule whose class score
/// clears its threshold wins, whatever the other scores are.
const PRECEDENCE: [ThresholdRule; 2] = [
    ThresholdRule { class: ToothClass::NonDental, threshold: NON_DENTAL_THRESHOLD, inclusive: false },
    ThresholdRule { class: ToothClass::Caries, threshold: CARIES_THRESHOLD, inclusive: true },
];

/// Scores that match no rule fall through to healthy.
const FALLBACK: ToothClass = ToothClass::Healthy;

/// Map raw class scores to a labeled prediction.
///
/// Pure function: any three finite numbers are accepted, even ones that do
/// not sum to 1. The returned probabilities are the raw scores echoed
/// unmodified, and the confidence is the chosen class's own score, not
/// necessarily the largest of the three.
pub fn decode(scores: RawScores) -> Prediction {
    let class = PRECEDENCE
        .iter()
        .find(|rule| rule.fires(scores.score(rule.class)))
        .map(|rule| rule.class)
        .unwrap_or(FALLBACK);
    Prediction {
        prediction: class,
        confidence: scores.score(class),
        probabilities: scores.into(),
    }
}
