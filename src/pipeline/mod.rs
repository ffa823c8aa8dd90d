//! Processing pipelines for the detection and classification workflows.

mod augment_preview;
mod classify;
mod coordinator;
mod detect;
mod reclassify;

pub use augment_preview::augment_file;
pub use classify::classify_file;
pub use coordinator::{
    collect_input_files, detection_table_path, ensure_dir, is_audio_file, output_dir_for,
    reclassified_table_path, stage_dir_for, stage_image_path,
};
pub use detect::{DetectResult, detect_file};
pub use reclassify::{IntervalClip, ReclassifyResult, correlate_intervals, reclassify_table};

pub(crate) use coordinator::file_stem;
