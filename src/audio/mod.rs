//! Audio ingestion: decoding, resampling, chunking.

mod chunker;
mod decode;
mod resample;
mod waveform;

pub use chunker::{Chunk, chunk_waveform};
pub use decode::decode_audio_file;
pub use resample::{resample, resample_to};
pub use waveform::Waveform;
