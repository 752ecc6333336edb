//! Model artifact configuration.

use std::path::{Path, PathBuf};

/// Well-known artifact location, relative to the process working
/// directory.
pub const DEFAULT_MODEL_PATH: &str = "models/model_v2.onnx";

/// Where the classification graph lives and how to prepare it.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Path to the ONNX artifact.
    pub path: PathBuf,
    /// Run the runtime's graph-level optimizations after typing the model.
    pub optimize: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig { path: DEFAULT_MODEL_PATH.into(), optimize: true }
    }
}

impl ModelConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        ModelConfig { path: path.as_ref().to_path_buf(), ..ModelConfig::default() }
    }

    /// Disable (or re-enable) graph-level optimization.
    pub fn with_graph_optimization(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }
}
