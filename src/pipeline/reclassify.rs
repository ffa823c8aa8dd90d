//! Reclassification of prior-detection selection tables.
//!
//! Takes a recording plus a Raven selection table produced by an earlier
//! detection pass, cuts one clip per selection interval, and classifies
//! each clip, writing the table back out with prediction columns added.

use crate::audio::{Waveform, decode_audio_file, resample_to};
use crate::config::Config;
use crate::constants::image::MODEL_CHANNELS;
use crate::error::{Error, Result};
use crate::features::{FeatureExtractor, FeatureImage};
use crate::inference::{ModelAdapter, top_predictions};
use crate::output::{ClipKey, ReclassifiedTableWriter, SelectionRow, parse_selection_table};
use crate::pipeline::{reclassified_table_path, stage_image_path};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One clip cut out of a recording for a selection interval.
#[derive(Debug, Clone)]
pub struct IntervalClip {
    /// Sample offset of the clip within the recording.
    pub start_sample: usize,
    /// Clip samples; at most one window, never read past the end.
    pub samples: Vec<f32>,
}

/// Map selection intervals onto clip sample ranges.
///
/// Each interval yields one clip starting at `floor(begin_time * rate)`
/// and running for at most `window_seconds`. The interval's own end time
/// is ignored: clips have a fixed analysis length, bounded only by the
/// end of the recording.
pub fn correlate_intervals(
    waveform: &Waveform,
    rows: &[SelectionRow],
    window_seconds: u32,
) -> Vec<IntervalClip> {
    let len = waveform.samples.len();
    let window_samples = window_seconds as usize * waveform.sample_rate as usize;

    rows.iter()
        .map(|row| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let start = (row.begin_time * f64::from(waveform.sample_rate)).floor() as usize;
            let start = start.min(len);
            let end = (start + window_samples).min(len);
            IntervalClip {
                start_sample: start,
                samples: waveform.samples[start..end].to_vec(),
            }
        })
        .collect()
}

/// Result of reclassifying one selection table.
#[derive(Debug)]
pub struct ReclassifyResult {
    /// Number of selections classified.
    pub rows: usize,
    /// Path of the written table.
    pub table_path: PathBuf,
}

/// Classify every selection of a prior-detection table.
///
/// Output rows keep the original order and carry the original columns,
/// followed by the audio path, an empty label column for the human pass,
/// and the top predictions. A selection that begins past the end of the
/// recording fails the whole table.
///
/// # Arguments
///
/// * `audio_path` - Recording the selection table refers to
/// * `table_path` - Prior-detection selection table
/// * `output_dir` - Directory for the reclassified table
/// * `stage_dir` - Directory for staged feature images
/// * `config` - Analysis configuration
/// * `extractor` - Feature extractor built from `config`
/// * `model` - Classification model adapter
pub fn reclassify_table(
    audio_path: &Path,
    table_path: &Path,
    output_dir: &Path,
    stage_dir: &Path,
    config: &Config,
    extractor: &FeatureExtractor,
    model: &mut dyn ModelAdapter,
) -> Result<ReclassifyResult> {
    info!(
        "Reclassifying {} against {}",
        table_path.display(),
        audio_path.display()
    );

    let rows = parse_selection_table(table_path)?;
    info!("Parsed {} selections", rows.len());

    let decoded = decode_audio_file(audio_path)?;
    if decoded.sample_rate != config.sampling_rate {
        debug!(
            "Resampling from {} Hz to {} Hz...",
            decoded.sample_rate, config.sampling_rate
        );
    }
    let waveform = resample_to(decoded, config.sampling_rate)?;

    let clips = correlate_intervals(&waveform, &rows, config.spectrogram_max_length);

    let out_path = reclassified_table_path(audio_path, output_dir);
    let mut writer = ReclassifiedTableWriter::new(&out_path)?;
    writer.write_header()?;

    let filepath = audio_path.to_string_lossy();
    for (index, (row, clip)) in rows.iter().zip(&clips).enumerate() {
        if clip.samples.is_empty() {
            return Err(Error::InvalidSelectionTable {
                message: format!(
                    "selection {} begins past the end of the audio",
                    row.selection
                ),
            });
        }

        let key = ClipKey::new(audio_path, index);
        let clip_wave = Waveform::new(clip.samples.clone(), waveform.sample_rate);
        let tensor = extractor.extract(&clip_wave, false)?;
        let image = FeatureImage::from_tensor(&tensor, extractor.kind(), config.dynamic_range);
        image.write_pgm(&stage_image_path(stage_dir, &key, true))?;

        let scores = model.predict(&image.to_model_input(MODEL_CHANNELS))?;
        let predictions = top_predictions(&scores, model.labels());
        writer.write_row(row, &filepath, &predictions)?;
    }
    writer.finalize()?;

    info!(
        "Wrote {} reclassified selections to {}",
        rows.len(),
        out_path.display()
    );

    Ok(ReclassifyResult {
        rows: rows.len(),
        table_path: out_path,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::pipeline::tests::{ScriptedModel, test_config, write_test_wav};

    fn wave(seconds: f32, rate: u32) -> Waveform {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let n = (seconds * rate as f32) as usize;
        #[allow(clippy::cast_precision_loss)]
        let samples = (0..n).map(|i| (i as f32 * 0.01).sin()).collect();
        Waveform::new(samples, rate)
    }

    fn row(selection: u32, begin: f64, end: f64) -> SelectionRow {
        SelectionRow {
            selection,
            view: "Spectrogram 1".to_string(),
            channel: 1,
            begin_time: begin,
            end_time: end,
            low_freq: 0.0,
            high_freq: 4000.0,
        }
    }

    fn write_table(path: &Path, rows: &[(u32, f64, f64)]) {
        let mut table = String::from(
            "Selection\tView\tChannel\tBegin Time (s)\tEnd Time (s)\tLow Freq (Hz)\tHigh Freq (Hz)\n",
        );
        for (selection, begin, end) in rows {
            table.push_str(&format!(
                "{selection}\tSpectrogram 1\t1\t{begin}\t{end}\t0\t4000\n"
            ));
        }
        std::fs::write(path, table).unwrap();
    }

    #[test]
    fn test_correlate_intervals_start_and_length() {
        let w = wave(20.0, 1000);
        let rows = [row(1, 0.0, 3.0), row(2, 5.0, 8.0)];

        let clips = correlate_intervals(&w, &rows, 3);

        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].start_sample, 0);
        assert_eq!(clips[0].samples.len(), 3000);
        assert_eq!(clips[1].start_sample, 5000);
        assert_eq!(clips[1].samples.len(), 3000);
    }

    #[test]
    fn test_correlate_intervals_truncates_at_end() {
        let w = wave(20.0, 1000);
        let rows = [row(1, 19.0, 22.0)];

        let clips = correlate_intervals(&w, &rows, 3);

        assert_eq!(clips[0].start_sample, 19_000);
        assert_eq!(clips[0].samples.len(), 1000);
    }

    #[test]
    fn test_correlate_intervals_floors_fractional_start() {
        let w = wave(10.0, 1000);
        let rows = [row(1, 1.4447, 4.4447)];

        let clips = correlate_intervals(&w, &rows, 3);

        assert_eq!(clips[0].start_sample, 1444);
    }

    #[test]
    fn test_reclassify_preserves_row_order_and_columns() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("pod_b.wav");
        write_test_wav(&audio, 20.0, 8000);
        let table = dir.path().join("pod_b.selections.txt");
        write_table(&table, &[(1, 0.0, 3.0), (2, 5.0, 8.0), (3, 12.0, 15.0)]);

        let config = test_config();
        let extractor = FeatureExtractor::new(&config);
        let mut model = ScriptedModel::new(
            &["SW1", "SW2", "SW3", "SW4", "SW5"],
            &[&[0.20, 0.74, 0.01, 0.01, 0.04]],
        );

        let result = reclassify_table(
            &audio,
            &table,
            dir.path(),
            dir.path(),
            &config,
            &extractor,
            &mut model,
        )
        .unwrap();

        assert_eq!(result.rows, 3);
        assert!(result.table_path.ends_with("pod_b.classified.selections.txt"));

        let written = std::fs::read_to_string(&result.table_path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("3rd Prediction\t3rd Confidence"));
        assert!(lines[1].starts_with("1\tSpectrogram 1\t1\t0\t3\t0\t4000\t"));
        assert!(lines[3].starts_with("3\tSpectrogram 1\t1\t12\t15\t"));
        for line in &lines[1..] {
            assert!(line.contains("SW2\t74.00%\tSW1\t20.00%\tSW5\t4.00%"));
        }
    }

    #[test]
    fn test_reclassify_stages_indexed_images() {
        let dir = tempfile::tempdir().unwrap();
        let stage = dir.path().join("stage");
        std::fs::create_dir(&stage).unwrap();
        let audio = dir.path().join("pod_b.wav");
        write_test_wav(&audio, 10.0, 8000);
        let table = dir.path().join("pod_b.selections.txt");
        write_table(&table, &[(1, 0.0, 3.0), (2, 4.0, 7.0)]);

        let config = test_config();
        let extractor = FeatureExtractor::new(&config);
        let mut model = ScriptedModel::new(&["SW1", "SW2", "SW3"], &[&[0.5, 0.3, 0.2]]);

        reclassify_table(
            &audio,
            &table,
            dir.path(),
            &stage,
            &config,
            &extractor,
            &mut model,
        )
        .unwrap();

        assert!(stage.join("pod_b_0.pgm").is_file());
        assert!(stage.join("pod_b_1.pgm").is_file());
    }

    #[test]
    fn test_reclassify_rejects_selection_past_end() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("short.wav");
        write_test_wav(&audio, 2.0, 8000);
        let table = dir.path().join("short.selections.txt");
        write_table(&table, &[(1, 30.0, 33.0)]);

        let config = test_config();
        let extractor = FeatureExtractor::new(&config);
        let mut model = ScriptedModel::new(&["SW1"], &[&[0.9]]);

        let result = reclassify_table(
            &audio,
            &table,
            dir.path(),
            dir.path(),
            &config,
            &extractor,
            &mut model,
        );
        assert!(matches!(
            result,
            Err(Error::InvalidSelectionTable { .. })
        ));
    }

    #[test]
    fn test_reclassify_empty_table_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("pod.wav");
        write_test_wav(&audio, 2.0, 8000);
        let table = dir.path().join("pod.selections.txt");
        write_table(&table, &[]);

        let config = test_config();
        let extractor = FeatureExtractor::new(&config);
        let mut model = ScriptedModel::new(&["SW1"], &[&[0.9]]);

        let result = reclassify_table(
            &audio,
            &table,
            dir.path(),
            dir.path(),
            &config,
            &extractor,
            &mut model,
        )
        .unwrap();

        assert_eq!(result.rows, 0);
        let written = std::fs::read_to_string(&result.table_path).unwrap();
        assert_eq!(written.lines().count(), 1);
    }
}
