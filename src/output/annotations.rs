//! Classification annotation table writer.

use crate::constants::TOP_K;
use crate::constants::confidence::DECIMAL_PLACES;
use crate::error::{Error, Result};
use crate::output::ClipClassification;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Tab-delimited classification annotation table.
///
/// One row per classified clip: file name, the ranked predictions with
/// their confidences, and an empty user-label column to be filled during
/// the annotation pass.
pub struct ClassificationTableWriter {
    writer: BufWriter<File>,
}

impl ClassificationTableWriter {
    /// Create a new writer at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutputWrite`] if the file cannot be created.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Write the column header row.
    pub fn write_header(&mut self) -> Result<()> {
        writeln!(
            self.writer,
            "Filename\t1st Prediction\t1st Confidence\t2nd Prediction\t2nd Confidence\t3rd Prediction\t3rd Confidence\tUser Label"
        )?;
        Ok(())
    }

    /// Write one classified clip.
    ///
    /// Missing trailing predictions (model with fewer classes than the
    /// ranking width) leave their cells empty.
    pub fn write_row(&mut self, classification: &ClipClassification) -> Result<()> {
        write!(self.writer, "{}", classification.key.file_name())?;
        for slot in 0..TOP_K {
            match classification.predictions.get(slot) {
                Some(prediction) => write!(
                    self.writer,
                    "\t{}\t{}",
                    prediction.label,
                    format_confidence(prediction.confidence)
                )?,
                None => write!(self.writer, "\t\t")?,
            }
        }
        // Trailing empty User Label cell
        writeln!(self.writer, "\t")?;
        Ok(())
    }

    /// Flush buffered rows.
    pub fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Format a raw `[0, 1]` confidence as a percentage string.
#[must_use]
pub fn format_confidence(confidence: f32) -> String {
    format!(
        "{:.prec$}%",
        confidence * 100.0,
        prec = DECIMAL_PLACES
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::inference::Prediction;
    use crate::output::ClipKey;
    use std::path::Path as StdPath;
    use tempfile::NamedTempFile;

    fn prediction(label: &str, confidence: f32, index: usize) -> Prediction {
        Prediction {
            label: label.to_string(),
            confidence,
            index,
        }
    }

    #[test]
    fn test_format_confidence_percentage() {
        assert_eq!(format_confidence(0.8542), "85.42%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.0), "0.00%");
    }

    #[test]
    fn test_write_classification_rows() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = ClassificationTableWriter::new(file.path()).unwrap();
        writer.write_header().unwrap();

        let classification = ClipClassification {
            key: ClipKey::new(StdPath::new("/clips/sw_031.wav"), 0),
            predictions: vec![
                prediction("SW1", 0.91, 2),
                prediction("SW4", 0.06, 5),
                prediction("SW2", 0.02, 3),
            ],
        };
        writer.write_row(&classification).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Filename\t1st Prediction\t1st Confidence\t2nd Prediction\t2nd Confidence\t3rd Prediction\t3rd Confidence\tUser Label"
        );
        assert_eq!(
            lines.next().unwrap(),
            "sw_031.wav\tSW1\t91.00%\tSW4\t6.00%\tSW2\t2.00%\t"
        );
    }

    #[test]
    fn test_write_row_pads_missing_predictions() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = ClassificationTableWriter::new(file.path()).unwrap();

        let classification = ClipClassification {
            key: ClipKey::new(StdPath::new("short.wav"), 0),
            predictions: vec![prediction("SW1", 0.7, 0), prediction("SW2", 0.3, 1)],
        };
        writer.write_row(&classification).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents.lines().next().unwrap(), "short.wav\tSW1\t70.00%\tSW2\t30.00%\t\t\t");
    }
}
