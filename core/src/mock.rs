//! Canned predictions for exercising callers without a model artifact.

use crate::classes::{Prediction, Probabilities, ToothClass};

/// A fixed, plausible healthy result.
///
/// Lets the surrounding plumbing (display, serialization, the paired
/// workflow) be driven end to end while no artifact or endpoint is
/// reachable.
pub fn mock_prediction() -> Prediction {
    Prediction {
        prediction: ToothClass::Healthy,
        confidence: 0.87,
        probabilities: Probabilities { caries: 0.05, healthy: 0.87, non_dental: 0.08 },
    }
}
