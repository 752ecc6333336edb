//! Dental-image classification over a tract-onnx inference session.
//!
//! Photographs of the upper and lower jaw are classified as `caries`,
//! `healthy` or `non_dental`. [`preprocess::preprocess`] turns a decoded
//! bitmap into the `1x224x224x3` float tensor the model expects, and a
//! lazily-created [`session::ClassifierSession`] executes the graph.
//! [`decode::decode`] then maps the raw scores to a labeled prediction
//! using fixed precedence rules, with [`classifier::Classifier`]
//! composing the whole pipeline behind one call.
//!
//! ```no_run
//! use dentascan_core::prelude::*;
//!
//! fn main() -> Result<(), PipelineError> {
//!     let classifier = Classifier::new(ModelConfig::default());
//!     let prediction = classifier.classify_file("upper.jpg")?;
//!     println!("{} ({:.1}%)", prediction.prediction, prediction.confidence * 100.0);
//!     Ok(())
//! }
//! ```

pub mod classes;
pub mod classifier;
pub mod config;
pub mod decode;
pub mod error;
pub mod mock;
pub mod preprocess;
pub mod provider;
pub mod session;

pub use tract_onnx;

pub mod prelude {
    pub use crate::classes::{
        CLASS_COUNT, JawPosition, Prediction, Probabilities, RawScores, ScreeningReport,
        ToothClass,
    };
    pub use crate::classifier::Classifier;
    pub use crate::config::{DEFAULT_MODEL_PATH, ModelConfig};
    pub use crate::decode::{CARIES_THRESHOLD, NON_DENTAL_THRESHOLD, decode};
    pub use crate::error::PipelineError;
    pub use crate::mock::mock_prediction;
    pub use crate::preprocess::{INPUT_SIZE, preprocess};
    pub use crate::provider::{
        OnnxSessionLoader, OnnxSessionProvider, SessionLoader, SessionProvider,
    };
    pub use crate::session::ClassifierSession;
    pub use tract_onnx::prelude::Tensor;
}
