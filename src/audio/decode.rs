//! Audio decoding using symphonia.

use crate::audio::Waveform;
use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode an audio file to a mono waveform at its native sample rate.
///
/// Supports WAV, FLAC, MP3, and AAC formats. Multi-channel recordings are
/// mixed down to mono by averaging channels.
pub fn decode_audio_file(path: &Path) -> Result<Waveform> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    // Create hint from file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    // Probe the file
    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;
    let channels = track
        .codec_params
        .channels
        .map_or(1, symphonia::core::audio::Channels::count);

    // Create decoder
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut samples = Vec::new();

    // Decode all packets
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        append_samples(&decoded, channels, &mut samples);
    }

    Ok(Waveform::new(samples, sample_rate))
}

/// Append decoded samples to the output buffer, converting to mono.
fn append_samples(buffer: &AudioBufferRef, channels: usize, output: &mut Vec<f32>) {
    match buffer {
        AudioBufferRef::F32(buf) => {
            mix_to_mono(buf.frames(), channels, output, |ch, i| buf.chan(ch)[i]);
        }
        AudioBufferRef::S16(buf) => {
            const I16_NORM: f32 = 32768.0;
            mix_to_mono(buf.frames(), channels, output, |ch, i| {
                f32::from(buf.chan(ch)[i]) / I16_NORM
            });
        }
        AudioBufferRef::S32(buf) => {
            const I32_NORM: f32 = 2_147_483_648.0;
            #[allow(clippy::cast_precision_loss)]
            mix_to_mono(buf.frames(), channels, output, |ch, i| {
                buf.chan(ch)[i] as f32 / I32_NORM
            });
        }
        _ => {
            // Unsupported sample format, skip
        }
    }
}

/// Average the channels of one decoded buffer into the mono output.
fn mix_to_mono(
    frames: usize,
    channels: usize,
    output: &mut Vec<f32>,
    sample: impl Fn(usize, usize) -> f32,
) {
    if channels <= 1 {
        output.extend((0..frames).map(|i| sample(0, i)));
    } else {
        #[allow(clippy::cast_precision_loss)]
        let scale = 1.0 / channels as f32;
        for i in 0..frames {
            let sum: f32 = (0..channels).map(|ch| sample(ch, i)).sum();
            output.push(sum * scale);
        }
    }
}
