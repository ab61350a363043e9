//! WAV loading via hound
//!
//! Reads the transcoder's output into normalized mono f32 samples. Integer
//! PCM is scaled to [-1, 1]; multi-channel audio is averaged down to mono.

use std::path::Path;

use tracing::debug;

use crate::error::{VoxError, VoxResult};

/// Decoded WAV audio, normalized and downmixed
#[derive(Debug, Clone, PartialEq)]
pub struct WavAudio {
    /// Mono samples in [-1, 1]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count before the mono downmix
    pub original_channels: u16,
}

impl WavAudio {
    /// Duration in seconds
    #[must_use]
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Load a WAV file into mono f32 samples.
///
/// Supports integer PCM (normalized by the bit depth) and 32-bit float
/// sample formats. Multi-channel audio is averaged per frame.
pub fn load_wav(path: &Path) -> VoxResult<WavAudio> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| VoxError::Audio(format!("failed to open {}: {e}", path.display())))?;

    let spec = reader.spec();
    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| VoxError::Audio(format!("failed to read samples: {e}")))?
                .into_iter()
                .map(|s| s as f32 / max_val)
                .collect()
        }
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| VoxError::Audio(format!("failed to read samples: {e}")))?,
    };

    let channels = spec.channels;
    let samples = if channels > 1 {
        downmix(&samples, channels as usize)
    } else {
        samples
    };

    debug!(
        sample_rate = spec.sample_rate,
        channels,
        samples = samples.len(),
        "loaded wav"
    );

    Ok(WavAudio {
        samples,
        sample_rate: spec.sample_rate,
        original_channels: channels,
    })
}

/// Average interleaved channels into mono
fn downmix(samples: &[f32], channels: usize) -> Vec<f32> {
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
