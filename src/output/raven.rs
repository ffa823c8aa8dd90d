//! Raven selection table output for detection runs.

use crate::constants::raven;
use crate::error::{Error, Result};
use crate::output::ChunkDetection;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Raven-compatible selection table writer for positive chunks.
///
/// One table per recording; `Selection` numbers positives sequentially
/// from 1 in chunk order.
pub struct DetectionTableWriter {
    writer: BufWriter<File>,
    high_freq: f32,
    selection_id: u32,
}

impl DetectionTableWriter {
    /// Create a new writer.
    ///
    /// `sample_rate` fixes the High Freq column at the Nyquist frequency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutputWrite`] if the file cannot be created.
    pub fn new(path: &Path, sample_rate: u32) -> Result<Self> {
        let file = File::create(path).map_err(|source| Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        #[allow(clippy::cast_precision_loss)]
        let high_freq = sample_rate as f32 / 2.0;
        Ok(Self {
            writer: BufWriter::new(file),
            high_freq,
            selection_id: 0,
        })
    }

    /// Write the column header row.
    pub fn write_header(&mut self) -> Result<()> {
        writeln!(
            self.writer,
            "Selection\tView\tChannel\tBegin Time (s)\tEnd Time (s)\tLow Freq (Hz)\tHigh Freq (Hz)\tFilepath\tFound"
        )?;
        Ok(())
    }

    /// Write one positive chunk.
    pub fn write_detection(&mut self, detection: &ChunkDetection) -> Result<()> {
        self.selection_id += 1;

        writeln!(
            self.writer,
            "{}\t{}\t{}\t{:.1}\t{:.1}\t{:.1}\t{:.1}\t{}\t{}",
            self.selection_id,
            raven::VIEW,
            raven::CHANNEL,
            detection.start_time,
            detection.end_time,
            raven::LOW_FREQ,
            self.high_freq,
            detection.key.source.display(),
            raven::FOUND_LABEL,
        )?;
        Ok(())
    }

    /// Flush buffered rows.
    pub fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
