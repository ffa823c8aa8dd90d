//! Waveform augmentation engine.
//!
//! Produces the variants a training-time augmentation pipeline would see:
//! pitch shifts, time-scale changes, additive noise, and background
//! mixtures at fixed event-to-background ratios. Every operation is pure
//! and returns a new waveform.

mod mixture;
mod ops;
mod shape;

pub use mixture::{BackgroundPool, mix_at_ebr};
pub use ops::{add_noise, pitch_shift, time_stretch};
pub use shape::{to_fixed_length, to_fixed_length_random};

use crate::audio::Waveform;
use crate::constants::augment as defaults;
use crate::error::Result;
use rand::Rng;

/// Single-waveform augmentation strategies.
///
/// Background mixing is a separate operation ([`mix_at_ebr`]) since it
/// needs a second input clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugmentKind {
    /// Raise pitch by the given number of semitone steps.
    ShiftPitchUp,
    /// Lower pitch by the given number of semitone steps.
    ShiftPitchDown,
    /// Time-scale by a rate factor, conventionally > 1.
    SpeedUp,
    /// Time-scale by a rate factor, conventionally < 1.
    SlowDown,
    /// Add zero-mean Gaussian noise with the given standard deviation.
    AddRandomNoise,
}

impl AugmentKind {
    /// All single-waveform kinds, in preview order.
    pub const ALL: [Self; 5] = [
        Self::ShiftPitchUp,
        Self::ShiftPitchDown,
        Self::SpeedUp,
        Self::SlowDown,
        Self::AddRandomNoise,
    ];

    /// Default parameter value when none is given on the command line.
    #[must_use]
    pub fn default_amount(self) -> f32 {
        match self {
            Self::ShiftPitchUp | Self::ShiftPitchDown => defaults::PITCH_STEPS,
            Self::SpeedUp => defaults::RATE,
            Self::SlowDown => 1.0 / defaults::RATE,
            Self::AddRandomNoise => defaults::NOISE_STD,
        }
    }
}

impl std::fmt::Display for AugmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShiftPitchUp => write!(f, "shiftpitchup"),
            Self::ShiftPitchDown => write!(f, "shiftpitchdown"),
            Self::SpeedUp => write!(f, "speedup"),
            Self::SlowDown => write!(f, "slowdown"),
            Self::AddRandomNoise => write!(f, "addrandomnoise"),
        }
    }
}

impl std::str::FromStr for AugmentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shiftpitchup" => Ok(Self::ShiftPitchUp),
            "shiftpitchdown" => Ok(Self::ShiftPitchDown),
            "speedup" => Ok(Self::SpeedUp),
            "slowdown" => Ok(Self::SlowDown),
            "addrandomnoise" => Ok(Self::AddRandomNoise),
            other => Err(format!("unknown augmentation kind: {other}")),
        }
    }
}

/// Apply one augmentation kind to a waveform.
///
/// The parameter's meaning depends on the kind: semitone steps for pitch
/// shifts (the sign is set by the kind), a rate factor for time scaling
/// (applied as given), and a standard deviation for noise.
pub fn apply(
    kind: AugmentKind,
    waveform: &Waveform,
    amount: f32,
    rng: &mut impl Rng,
) -> Result<Waveform> {
    let samples = match kind {
        AugmentKind::ShiftPitchUp => pitch_shift(&waveform.samples, amount.abs())?,
        AugmentKind::ShiftPitchDown => pitch_shift(&waveform.samples, -amount.abs())?,
        AugmentKind::SpeedUp | AugmentKind::SlowDown => {
            time_stretch(&waveform.samples, amount)?
        }
        AugmentKind::AddRandomNoise => add_noise(&waveform.samples, amount, rng)?,
    };
    Ok(Waveform::new(samples, waveform.sample_rate))
}
