//! Audio loading and PCM conversion
//!
//! The pipeline consumes mono f32 samples in [-1, 1]. This module loads the
//! transcoder's WAV output and converts float samples to the 16-bit PCM
//! framing the voice classifier expects.

pub mod wav;

pub use wav::{load_wav, WavAudio};

/// Pipeline sample rate (16 kHz), the rate the transcoder is asked for
pub const SAMPLE_RATE: u32 = 16000;

/// Rescale f32 samples in [-1, 1] to 16-bit PCM.
///
/// Uses a 32768 scale factor; the cast saturates at the i16 range, so a
/// full-scale 1.0 sample maps to 32767.
#[must_use]
pub fn samples_to_i16(samples: &[f32]) -> Vec<i16> {
    samples.iter().map(|&s| (s * 32768.0) as i16).collect()
}
