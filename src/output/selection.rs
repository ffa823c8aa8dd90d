//! Selection table parsing and reclassification output.
//!
//! Parses Raven-style tab-delimited selection tables produced by a prior
//! detection pass, and writes them back out augmented with classifier
//! predictions. Uses the `csv` crate for robust parsing.

use crate::constants::TOP_K;
use crate::error::{Error, Result};
use crate::inference::Prediction;
use crate::output::annotations::format_confidence;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Internal record for table deserialization.
#[derive(Debug, Deserialize)]
struct SelectionRecord {
    #[serde(rename = "Selection")]
    selection: u32,
    #[serde(rename = "View")]
    view: String,
    #[serde(rename = "Channel")]
    channel: u32,
    #[serde(rename = "Begin Time (s)")]
    begin_time: f64,
    #[serde(rename = "End Time (s)")]
    end_time: f64,
    #[serde(rename = "Low Freq (Hz)")]
    low_freq: f64,
    #[serde(rename = "High Freq (Hz)")]
    high_freq: f64,
}

/// One interval from a prior-detection selection table.
#[derive(Debug, Clone)]
pub struct SelectionRow {
    /// Selection number from the source table.
    pub selection: u32,
    /// View column, carried through unchanged.
    pub view: String,
    /// Channel number, carried through unchanged.
    pub channel: u32,
    /// Interval start in seconds.
    pub begin_time: f64,
    /// Interval end in seconds.
    pub end_time: f64,
    /// Low frequency bound in Hz.
    pub low_freq: f64,
    /// High frequency bound in Hz.
    pub high_freq: f64,
}

/// Parse a tab-delimited selection table.
///
/// Requires the columns Selection, View, Channel, Begin Time (s),
/// End Time (s), Low Freq (Hz), High Freq (Hz); extra columns are
/// ignored. Returns `Ok(vec![])` for a header-only table.
///
/// # Errors
///
/// Returns [`Error::SelectionTableParse`] if the file cannot be opened
/// and [`Error::InvalidSelectionTable`] for malformed rows or intervals
/// that do not satisfy `begin < end` with a non-negative begin.
pub fn parse_selection_table(path: &Path) -> Result<Vec<SelectionRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::SelectionTableParse {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut rows = Vec::new();

    for (line_num, result) in reader.deserialize::<SelectionRecord>().enumerate() {
        let record = result.map_err(|e| Error::InvalidSelectionTable {
            message: format!("line {}: {e}", line_num + 2),
        })?;

        if record.begin_time < 0.0 {
            return Err(Error::InvalidSelectionTable {
                message: format!(
                    "line {}: begin time ({}) must not be negative",
                    line_num + 2,
                    record.begin_time
                ),
            });
        }
        if record.end_time <= record.begin_time {
            return Err(Error::InvalidSelectionTable {
                message: format!(
                    "line {}: end time ({}) must be greater than begin time ({})",
                    line_num + 2,
                    record.end_time,
                    record.begin_time
                ),
            });
        }

        rows.push(SelectionRow {
            selection: record.selection,
            view: record.view,
            channel: record.channel,
            begin_time: record.begin_time,
            end_time: record.end_time,
            low_freq: record.low_freq,
            high_freq: record.high_freq,
        });
    }

    Ok(rows)
}

/// Writer for a selection table augmented with classifier predictions.
///
/// Rows are written in the order of the source table, one output row per
/// input row; the Label column is left empty for the annotation pass.
pub struct ReclassifiedTableWriter {
    writer: BufWriter<File>,
}

impl ReclassifiedTableWriter {
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
            "Selection\tView\tChannel\tBegin Time (s)\tEnd Time (s)\tLow Freq (Hz)\tHigh Freq (Hz)\tFilepath\tLabel\t1st Prediction\t1st Confidence\t2nd Prediction\t2nd Confidence\t3rd Prediction\t3rd Confidence"
        )?;
        Ok(())
    }

    /// Write one source row together with its predictions.
    pub fn write_row(
        &mut self,
        row: &SelectionRow,
        filepath: &str,
        predictions: &[Prediction],
    ) -> Result<()> {
        write!(
            self.writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t",
            row.selection,
            row.view,
            row.channel,
            row.begin_time,
            row.end_time,
            row.low_freq,
            row.high_freq,
            filepath,
        )?;
        for slot in 0..TOP_K {
            match predictions.get(slot) {
                Some(prediction) => write!(
                    self.writer,
                    "\t{}\t{}",
                    prediction.label,
                    format_confidence(prediction.confidence)
                )?,
                None => write!(self.writer, "\t\t")?,
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// Flush buffered rows.
    pub fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
