//! WAV file writing for augmentation previews.

use crate::audio::Waveform;
use crate::error::{Error, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// Write a mono waveform as 16-bit PCM.
///
/// Samples outside `[-1, 1]` are clamped before conversion.
///
/// # Errors
///
/// Returns [`Error::WavWriteFailed`] if the file cannot be created or
/// written.
pub fn write_wav_file(path: &Path, waveform: &Waveform) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| Error::WavWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    for &sample in &waveform.samples {
        #[allow(clippy::cast_possible_truncation)]
        let sample_i16 = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| Error::WavWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    writer.finalize().map_err(|e| Error::WavWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let waveform = Waveform::new(vec![0.0, 0.5, -0.5, 1.0, -1.0], 16_000);

        write_wav_file(&path, &waveform).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0], 0);
        assert_eq!(samples[3], i16::MAX);
        assert_eq!(samples[4], -i16::MAX);
    }

    #[test]
    fn test_clamps_out_of_range_samples() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hot.wav");
        let waveform = Waveform::new(vec![2.0, -3.0], 8_000);

        write_wav_file(&path, &waveform).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![i16::MAX, -i16::MAX]);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let path = Path::new("/nonexistent/dir/clip.wav");
        let waveform = Waveform::new(vec![0.0], 8_000);
        assert!(matches!(
            write_wav_file(path, &waveform),
            Err(Error::WavWriteFailed { .. })
        ));
    }
}
