//! Model adapter seam between feature images and score aggregation.

use crate::error::{Error, Result};
use ndarray::Array4;
use std::path::Path;

/// Runs a classification model on one feature image at a time.
///
/// Aggregation and the pipelines depend on this trait rather than on a
/// concrete runtime, so tests can drive them with fixed score tables.
pub trait ModelAdapter {
    /// Class labels in model output order.
    fn labels(&self) -> &[String];

    /// Score one `(1, height, width, channels)` input.
    ///
    /// Returns one score per class, in label order.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime rejects the input or the output
    /// length does not match the label count.
    fn predict(&mut self, input: &Array4<f32>) -> Result<Vec<f32>>;
}

/// Read class labels from a text file, one label per line.
///
/// Blank lines are skipped; surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns [`Error::LabelsRead`] if the file cannot be read and
/// [`Error::EmptyLabels`] if it contains no labels.
pub fn load_labels(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::LabelsRead {
        path: path.to_path_buf(),
        source,
    })?;

    let labels: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect();

    if labels.is_empty() {
        return Err(Error::EmptyLabels {
            path: path.to_path_buf(),
        });
    }

    Ok(labels)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_labels_trims_and_skips_blanks() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "bottlenose").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  common  ").unwrap();
        writeln!(file, "spinner").unwrap();

        let labels = load_labels(file.path()).unwrap();
        assert_eq!(labels, vec!["bottlenose", "common", "spinner"]);
    }

    #[test]
    fn test_load_labels_rejects_empty_file() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            load_labels(file.path()),
            Err(Error::EmptyLabels { .. })
        ));
    }

    #[test]
    fn test_load_labels_missing_file() {
        let result = load_labels(Path::new("/nonexistent/labels.txt"));
        assert!(matches!(result, Err(Error::LabelsRead { .. })));
    }
}
