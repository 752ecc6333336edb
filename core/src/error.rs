//! Error taxonomy for the local classification path.
//!
//! Every failure propagates one level up to the caller. Nothing is retried
//! or silently suppressed, and no partial result is ever produced: a call
//! fully succeeds with a complete prediction, or it fails with one of
//! these.

use std::path::PathBuf;

use thiserror::Error;

type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The model artifact is missing, corrupt, or incompatible with the
    /// runtime. Fatal to the local path until the artifact changes.
    #[error("failed to load model from {}", path.display())]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: BoxedCause,
    },

    /// The compute call failed, or produced something other than the three
    /// expected class scores.
    #[error("inference execution failed")]
    Execution {
        #[source]
        source: BoxedCause,
    },

    /// The input image could not be decoded.
    #[error("failed to decode image {}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PipelineError {
    pub fn model_load(path: impl Into<PathBuf>, source: impl Into<BoxedCause>) -> Self {
        PipelineError::ModelLoad { path: path.into(), source: source.into() }
    }

    pub fn execution(source: impl Into<BoxedCause>) -> Self {
        PipelineError::Execution { source: source.into() }
    }

    pub fn image_decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        PipelineError::ImageDecode { path: path.into(), source }
    }
}
