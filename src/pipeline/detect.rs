//! Whole-recording detection pipeline.

use crate::audio::{Waveform, chunk_waveform, decode_audio_file, resample_to};
use crate::config::Config;
use crate::constants::image::MODEL_CHANNELS;
use crate::error::Result;
use crate::features::{FeatureExtractor, FeatureImage};
use crate::inference::{ModelAdapter, is_positive, whistle_score};
use crate::output::{
    ChunkDetection, ClipKey, DetectionTableWriter, create_chunk_progress, finish_progress,
    inc_progress,
};
use crate::pipeline::{detection_table_path, stage_image_path};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of running detection over one recording.
#[derive(Debug)]
pub struct DetectResult {
    /// Number of windows scored.
    pub windows: usize,
    /// Number of windows at or above the threshold.
    pub positives: usize,
    /// Selection table path, present only when a positive window exists.
    pub table_path: Option<PathBuf>,
    /// Audio duration in seconds.
    pub audio_duration_secs: f32,
}

/// Run the detection model over one recording and write its selection table.
///
/// The recording is resampled to the configured rate and split into
/// consecutive fixed windows; every window is staged as a feature image
/// and scored. A window whose model call fails is skipped with a warning.
/// When no window reaches the threshold, no table is written and
/// `table_path` is `None`.
///
/// # Arguments
///
/// * `input_path` - Path to the input audio file
/// * `output_dir` - Directory for the selection table
/// * `stage_dir` - Directory for staged feature images
/// * `config` - Analysis configuration
/// * `extractor` - Feature extractor built from `config`
/// * `model` - Detection model adapter
/// * `threshold` - Detection threshold (0.0-1.0)
/// * `progress_enabled` - Whether to show the window progress bar
#[allow(clippy::too_many_arguments)]
pub fn detect_file(
    input_path: &Path,
    output_dir: &Path,
    stage_dir: &Path,
    config: &Config,
    extractor: &FeatureExtractor,
    model: &mut dyn ModelAdapter,
    threshold: f32,
    progress_enabled: bool,
) -> Result<DetectResult> {
    let start_time = Instant::now();

    info!("Processing: {}", input_path.display());

    let decoded = decode_audio_file(input_path)?;
    let audio_duration_secs = decoded.duration_secs();
    if decoded.sample_rate != config.sampling_rate {
        debug!(
            "Resampling from {} Hz to {} Hz...",
            decoded.sample_rate, config.sampling_rate
        );
    }
    let waveform = resample_to(decoded, config.sampling_rate)?;

    let window_seconds = config.window_seconds();
    debug!("Chunking into {window_seconds:.1}s windows...");
    let chunks = chunk_waveform(&waveform, window_seconds);

    if chunks.is_empty() {
        info!("No windows to process");
        return Ok(DetectResult {
            windows: 0,
            positives: 0,
            table_path: None,
            audio_duration_secs,
        });
    }

    let file_name = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let chunk_progress = create_chunk_progress(chunks.len(), file_name, progress_enabled);

    let mut detections = Vec::new();
    for chunk in &chunks {
        let key = ClipKey::new(input_path, chunk.index);
        let clip = Waveform::new(chunk.samples.clone(), waveform.sample_rate);
        let tensor = extractor.extract(&clip, false)?;
        let image = FeatureImage::from_tensor(&tensor, extractor.kind(), config.dynamic_range);
        image.write_pgm(&stage_image_path(stage_dir, &key, true))?;

        match model.predict(&image.to_model_input(MODEL_CHANNELS)) {
            Ok(scores) => {
                if let Some(score) = whistle_score(&scores) {
                    if is_positive(score, threshold) {
                        detections.push(ChunkDetection {
                            key,
                            start_time: chunk.start_offset,
                            end_time: chunk.start_offset + window_seconds,
                            confidence: score,
                        });
                    }
                }
            }
            Err(e) => warn!(
                "Skipping window {} of {}: {e}",
                chunk.index,
                input_path.display()
            ),
        }
        inc_progress(chunk_progress.as_ref());
    }
    finish_progress(chunk_progress, "Detection complete");

    info!(
        "Found {} positive windows of {} at threshold {threshold:.2}",
        detections.len(),
        chunks.len()
    );

    let table_path = if detections.is_empty() {
        info!("No whistles found in {}; no table written", file_name);
        None
    } else {
        let path = detection_table_path(input_path, output_dir);
        debug!("Writing selection table: {}", path.display());
        let mut writer = DetectionTableWriter::new(&path, waveform.sample_rate)?;
        writer.write_header()?;
        for detection in &detections {
            writer.write_detection(detection)?;
        }
        writer.finalize()?;
        Some(path)
    };

    let duration_secs = start_time.elapsed().as_secs_f64();
    info!("Processed {} windows in {duration_secs:.2}s", chunks.len());

    Ok(DetectResult {
        windows: chunks.len(),
        positives: detections.len(),
        table_path,
        audio_duration_secs,
    })
}
