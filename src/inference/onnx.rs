//! ONNX Runtime session wrapper.

use crate::error::{Error, Result};
use crate::inference::adapter::{ModelAdapter, load_labels};
use ndarray::Array4;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use tracing::info;

/// A classification model backed by an ONNX Runtime session.
///
/// Holds the resolved graph input and output names so each call can use
/// named binding without re-reading session metadata.
pub struct OnnxModel {
    session: Session,
    labels: Vec<String>,
    input_name: String,
    output_name: String,
}

impl OnnxModel {
    /// Load a model and its label file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelLoad`] if the session cannot be created,
    /// [`Error::ModelShape`] if the graph has no inputs or outputs, and
    /// label errors from [`load_labels`].
    pub fn load(model_path: &Path, labels_path: &Path) -> Result<Self> {
        let labels = load_labels(labels_path)?;

        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(model_path))
            .map_err(|source| Error::ModelLoad {
                path: model_path.to_path_buf(),
                source,
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| Error::ModelShape {
                path: model_path.to_path_buf(),
                reason: "graph declares no inputs".to_string(),
            })?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| Error::ModelShape {
                path: model_path.to_path_buf(),
                reason: "graph declares no outputs".to_string(),
            })?;

        info!(
            "Loaded model: {}, input: {}, output: {}, classes: {}",
            model_path.display(),
            input_name,
            output_name,
            labels.len()
        );

        Ok(Self {
            session,
            labels,
            input_name,
            output_name,
        })
    }
}

impl ModelAdapter for OnnxModel {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn predict(&mut self, input: &Array4<f32>) -> Result<Vec<f32>> {
        let value =
            Value::from_array(input.clone()).map_err(|source| Error::ModelRun { source })?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => value])
            .map_err(|source| Error::ModelRun { source })?;

        let (_, data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|source| Error::ModelRun { source })?;

        let scores = data.to_vec();
        if scores.len() != self.labels.len() {
            return Err(Error::ModelOutput {
                expected: self.labels.len(),
                actual: scores.len(),
            });
        }

        Ok(scores)
    }
}
