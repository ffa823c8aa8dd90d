//! Result types shared by the annotation writers.

use crate::inference::Prediction;
use std::path::{Path, PathBuf};

/// Identifies one fixed-length window of a source recording.
///
/// Results are keyed by this pair instead of by re-derived file names,
/// so chunk-to-file joins cannot drift when names collide or repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipKey {
    /// Source recording path.
    pub source: PathBuf,
    /// Zero-based window index within the recording.
    pub chunk_index: usize,
}

impl ClipKey {
    /// Key for the given window of a recording.
    #[must_use]
    pub fn new(source: &Path, chunk_index: usize) -> Self {
        Self {
            source: source.to_path_buf(),
            chunk_index,
        }
    }

    /// File name of the source recording, for display columns.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned())
    }

    /// File stem of the source recording, for derived artifact names.
    #[must_use]
    pub fn stem(&self) -> String {
        self.source
            .file_stem()
            .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned())
    }
}

/// A positive detector hit for one chunk.
#[derive(Debug, Clone)]
pub struct ChunkDetection {
    /// Which window of which recording.
    pub key: ClipKey,
    /// Window start relative to the recording, in seconds.
    pub start_time: f32,
    /// Window end relative to the recording, in seconds.
    pub end_time: f32,
    /// Raw detector score.
    pub confidence: f32,
}

/// Top-k classification of one clip.
#[derive(Debug, Clone)]
pub struct ClipClassification {
    /// Which clip was classified.
    pub key: ClipKey,
    /// Predictions ordered by descending confidence.
    pub predictions: Vec<Prediction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_key_file_name_and_stem() {
        let key = ClipKey::new(Path::new("/data/pod/encounter_07.wav"), 4);
        assert_eq!(key.file_name(), "encounter_07.wav");
        assert_eq!(key.stem(), "encounter_07");
        assert_eq!(key.chunk_index, 4);
    }

    #[test]
    fn test_clip_keys_differ_by_index() {
        let a = ClipKey::new(Path::new("a.wav"), 0);
        let b = ClipKey::new(Path::new("a.wav"), 1);
        assert_ne!(a, b);
    }
}
