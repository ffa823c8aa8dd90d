//! Annotation table writers and output utilities.

mod annotations;
mod progress;
mod raven;
mod selection;
mod types;
mod wav;

pub use annotations::{ClassificationTableWriter, format_confidence};
pub use progress::{create_chunk_progress, create_file_progress, finish_progress, inc_progress};
pub use raven::DetectionTableWriter;
pub use selection::{ReclassifiedTableWriter, SelectionRow, parse_selection_table};
pub use types::{ChunkDetection, ClipClassification, ClipKey};
pub use wav::write_wav_file;
