//! Local-path entry point: preprocessing, execution and decoding composed.

use std::path::Path;

use image::DynamicImage;
use log::debug;

use crate::classes::{Prediction, ScreeningReport};
use crate::config::ModelConfig;
use crate::decode::decode;
use crate::error::PipelineError;
use crate::preprocess::preprocess;
use crate::provider::OnnxSessionProvider;

/// In-process classifier over a lazily-loaded session.
///
/// Intended to be created once and shared (`Arc` it for cross-thread use);
/// the underlying session is loaded on the first classification and reused
/// for every later one.
pub struct Classifier {
    provider: OnnxSessionProvider,
}

impl Classifier {
    /// Classifier over the artifact described by `config`. Loading is
    /// deferred to the first classification.
    pub fn new(config: ModelConfig) -> Self {
        Classifier { provider: OnnxSessionProvider::for_config(config) }
    }

    /// The session provider, e.g. to force the load ahead of the first
    /// classification.
    pub fn provider(&self) -> &OnnxSessionProvider {
        &self.provider
    }

    /// Classify one decoded jaw photograph.
    ///
    /// Preprocessing strictly precedes execution, which strictly precedes
    /// decoding; the call either yields a complete prediction or an error.
    pub fn classify(&self, image: &DynamicImage) -> Result<Prediction, PipelineError> {
        let session = self.provider.get()?;
        let input = preprocess(image);
        let scores = session.run(input)?;
        let prediction = decode(scores);
        debug!("scores {scores:?} -> {}", prediction.prediction);
        Ok(prediction)
    }

    /// Decode the image at `path` and classify it.
    pub fn classify_file(&self, path: impl AsRef<Path>) -> Result<Prediction, PipelineError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| PipelineError::image_decode(path, e))?;
        self.classify(&image)
    }

    /// Classify an upper/lower pair into a full screening report.
    pub fn screen_pair(
        &self,
        upper: impl AsRef<Path>,
        lower: impl AsRef<Path>,
    ) -> Result<ScreeningReport, PipelineError> {
        Ok(ScreeningReport {
            upper_jaw: self.classify_file(upper)?,
            lower_jaw: self.classify_file(lower)?,
        })
    }
}
