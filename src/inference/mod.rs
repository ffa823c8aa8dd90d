//! Inference module for whistle detection and classification models.

mod adapter;
mod aggregate;
mod onnx;

pub use adapter::{ModelAdapter, load_labels};
pub use aggregate::{Prediction, is_positive, top_predictions, whistle_score};
pub use onnx::OnnxModel;
