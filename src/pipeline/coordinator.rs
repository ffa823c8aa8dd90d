//! Pipeline coordination: input collection and artifact paths.

use crate::constants::{AUDIO_EXTENSIONS, image, raven};
use crate::error::{Error, Result};
use crate::output::ClipKey;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Determine the output directory for a file.
pub fn output_dir_for(input: &Path, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

/// Determine the stage directory for feature images.
pub fn stage_dir_for(output_dir: &Path, explicit_stage_dir: Option<&Path>) -> PathBuf {
    explicit_stage_dir.map_or_else(|| output_dir.join(image::STAGE_DIR_NAME), Path::to_path_buf)
}

/// Create a directory and its parents if they do not exist.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| Error::OutputDirCreateFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Path of the detection selection table for an input file.
pub fn detection_table_path(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}{}", file_stem(input), raven::TABLE_EXTENSION))
}

/// Path of the reclassified selection table for an input file.
pub fn reclassified_table_path(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!(
        "{}{}",
        file_stem(input),
        raven::RECLASSIFIED_TABLE_EXTENSION
    ))
}

/// Path of the staged feature image for a clip.
///
/// Chunked workflows append the chunk index so images from one recording
/// stay distinct; whole-file workflows use the bare stem.
pub fn stage_image_path(stage_dir: &Path, key: &ClipKey, indexed: bool) -> PathBuf {
    let name = if indexed {
        format!("{}_{}.{}", key.stem(), key.chunk_index, image::EXTENSION)
    } else {
        format!("{}.{}", key.stem(), image::EXTENSION)
    };
    stage_dir.join(name)
}

// Use to_string_lossy() to handle non-UTF-8 filenames gracefully
// Invalid UTF-8 sequences will be replaced with the Unicode replacement character
pub(crate) fn file_stem(input: &Path) -> std::borrow::Cow<'_, str> {
    input.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    )
}

/// Collect input files from paths (files and directories).
///
/// Directories are walked recursively. The final list is sorted so batch
/// order does not depend on filesystem enumeration order.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_audio_file(path) {
                files.push(path.clone());
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            collect_audio_files_recursive(path, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    files.sort();
    Ok(files)
}

/// Recursively collect audio files from a directory.
fn collect_audio_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_audio_files_recursive(&path, files)?;
        } else if is_audio_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file is a supported audio format.
pub fn is_audio_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    // Compare extensions as OsStr to handle non-UTF-8 filenames
    path.extension().is_some_and(|ext| {
        AUDIO_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}
