//! Classification domain types, shared by the local and remote paths.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of classes the model scores, and the width of its output tensor.
pub const CLASS_COUNT: usize = 3;

/// The three classes a jaw photograph can resolve to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToothClass {
    Caries,
    Healthy,
    NonDental,
}

impl ToothClass {
    /// All classes, in the model's output order.
    pub const ORDERED: [ToothClass; CLASS_COUNT] =
        [ToothClass::Caries, ToothClass::Healthy, ToothClass::NonDental];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToothClass::Caries => "caries",
            ToothClass::Healthy => "healthy",
            ToothClass::NonDental => "non_dental",
        }
    }
}

impl fmt::Display for ToothClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw model output, in the fixed order `[caries, healthy, non_dental]`.
///
/// Ephemeral: one triple per inference call, handed straight to the
/// decoder. No validation happens here; the scores are whatever the graph
/// produced.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawScores(pub [f32; CLASS_COUNT]);

impl RawScores {
    pub fn caries(&self) -> f32 {
        self.0[0]
    }

    pub fn healthy(&self) -> f32 {
        self.0[1]
    }

    pub fn non_dental(&self) -> f32 {
        self.0[2]
    }

    /// Score for `class`, per the model's output order.
    pub fn score(&self, class: ToothClass) -> f32 {
        match class {
            ToothClass::Caries => self.caries(),
            ToothClass::Healthy => self.healthy(),
            ToothClass::NonDental => self.non_dental(),
        }
    }
}

impl From<[f32; CLASS_COUNT]> for RawScores {
    fn from(scores: [f32; CLASS_COUNT]) -> Self {
        RawScores(scores)
    }
}

/// Per-class scores as exposed to callers: the raw triple, echoed
/// unmodified. The model softmaxes its output so the fields sum to ≈1,
/// but nothing here enforces or renormalizes that.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub caries: f32,
    pub healthy: f32,
    pub non_dental: f32,
}

impl From<RawScores> for Probabilities {
    fn from(scores: RawScores) -> Self {
        Probabilities {
            caries: scores.caries(),
            healthy: scores.healthy(),
            non_dental: scores.non_dental(),
        }
    }
}

/// A labeled, thresholded classification of one jaw photograph.
///
/// `confidence` is the probability of the chosen class under the decision
/// rules, not necessarily the largest of the three.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: ToothClass,
    pub confidence: f32,
    pub probabilities: Probabilities,
}

/// One of the two independent classification units of the paired workflow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JawPosition {
    Upper,
    Lower,
}

impl fmt::Display for JawPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JawPosition::Upper => f.write_str("upper"),
            JawPosition::Lower => f.write_str("lower"),
        }
    }
}

/// Paired result of a full screening, one prediction per jaw. This is also
/// the exact shape of the hosted endpoint's response body.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub upper_jaw: Prediction,
    pub lower_jaw: Prediction,
}

impl ScreeningReport {
    pub fn for_jaw(&self, jaw: JawPosition) -> &Prediction {
        match jaw {
            JawPosition::Upper => &self.upper_jaw,
            JawPosition::Lower => &self.lower_jaw,
        }
    }
}
