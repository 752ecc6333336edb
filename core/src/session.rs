//! Loading and running the classification graph.

use std::fmt;

use log::{debug, info};
use tract_onnx::prelude::*;

use crate::classes::{CLASS_COUNT, RawScores};
use crate::config::ModelConfig;
use crate::error::PipelineError;
use crate::preprocess::{INPUT_CHANNELS, INPUT_SIZE};

type RunnablePlan = RunnableModel<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// A loaded, ready-to-execute instance of the classification graph.
///
/// Created once by the [`SessionProvider`](crate::provider::SessionProvider)
/// and shared for the life of the process. `run` borrows `&self`, so
/// executions may proceed concurrently against the shared session; the
/// runtime spawns a fresh state per run.
pub struct ClassifierSession {
    plan: RunnablePlan,
    input_name: String,
    output_name: String,
}

impl ClassifierSession {
    /// Load the artifact at `config.path` and prepare it for execution.
    ///
    /// The graph must expose exactly one `1x224x224x3` f32 input and one
    /// output of three f32 scores; anything else is a [`ModelLoad`]
    /// error. Input and output slot names are read from the loaded graph,
    /// never assumed.
    ///
    /// [`ModelLoad`]: PipelineError::ModelLoad
    pub fn load(config: &ModelConfig) -> Result<Self, PipelineError> {
        let path = config.path.as_path();
        let load_err = |e: TractError| PipelineError::model_load(path, e);

        info!("loading model from {}", path.display());
        let inference = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(load_err)?
            .with_input_fact(
                0,
                f32::fact([1, INPUT_SIZE as usize, INPUT_SIZE as usize, INPUT_CHANNELS]).into(),
            )
            .map_err(load_err)?;
        let typed = if config.optimize {
            inference.into_optimized()
        } else {
            inference.into_typed()
        }
        .map_err(load_err)?;

        if typed.inputs.len() != 1 || typed.outputs.len() != 1 {
            return Err(PipelineError::model_load(
                path,
                format!(
                    "expected one input and one output slot, found {} and {}",
                    typed.inputs.len(),
                    typed.outputs.len()
                ),
            ));
        }
        let output_fact = typed.output_fact(0).map_err(load_err)?;
        if output_fact.datum_type != f32::datum_type() {
            return Err(PipelineError::model_load(
                path,
                format!("expected f32 scores, model outputs {:?}", output_fact.datum_type),
            ));
        }
        let score_count =
            output_fact.shape.as_concrete().map(|dims| dims.iter().product::<usize>());
        if score_count != Some(CLASS_COUNT) {
            return Err(PipelineError::model_load(
                path,
                format!("expected {CLASS_COUNT} class scores, model outputs {:?}", output_fact.shape),
            ));
        }

        let input_name = typed.node(typed.inputs[0].node).name.clone();
        let output_name = typed.node(typed.outputs[0].node).name.clone();
        let plan = typed.into_runnable().map_err(load_err)?;
        debug!("model ready, input slot {input_name:?}, output slot {output_name:?}");
        Ok(ClassifierSession { plan, input_name, output_name })
    }

    /// Execute the graph on a prepared input tensor and pull out the three
    /// class scores.
    pub fn run(&self, input: Tensor) -> Result<RawScores, PipelineError> {
        let outputs =
            self.plan.run(tvec!(input.into())).map_err(PipelineError::execution)?;
        let scores = outputs[0].as_slice::<f32>().map_err(PipelineError::execution)?;
        if scores.len() != CLASS_COUNT {
            return Err(PipelineError::execution(format!(
                "expected {CLASS_COUNT} scores, the graph produced {}",
                scores.len()
            )));
        }
        Ok(RawScores([scores[0], scores[1], scores[2]]))
    }

    /// Name of the graph's input slot, as read from the artifact.
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Name of the graph's output slot, as read from the artifact.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}

impl fmt::Debug for ClassifierSession {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ClassifierSession")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_artifact_is_a_model_load_error() {
        let config = ModelConfig::new("does/not/exist.onnx");
        let err = ClassifierSession::load(&config).unwrap_err();
        assert!(matches!(err, PipelineError::ModelLoad { .. }), "got {err:?}");
    }

    #[test]
    fn garbage_artifact_is_a_model_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_v2.onnx");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"this is not an onnx graph").unwrap();
        drop(file);

        let err = ClassifierSession::load(&ModelConfig::new(&path)).unwrap_err();
        match err {
            PipelineError::ModelLoad { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected ModelLoad, got {other:?}"),
        }
    }
}
