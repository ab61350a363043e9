//! Voice Activity Detection (VAD) framing
//!
//! Slices the waveform into fixed-duration, non-overlapping frames and
//! classifies each as speech/non-speech through an injected binary
//! classifier.
//!
//! # Framing policy
//!
//! Frames tile the waveform left-to-right with no stride parameter; exactly
//! `len / samples_per_frame` complete frames are classified. A trailing
//! partial frame is excluded from classification, but its samples are
//! recovered by segment extraction when a segment is still open at the end
//! (see [`crate::diarization::segmentation`]).
//!
//! # Usage
//!
//! ```rust,ignore
//! use voxtitle::vad::{FrameSegmenter, FramingConfig, WebRtcClassifier};
//!
//! let segmenter = FrameSegmenter::new(FramingConfig::default())?;
//! let mut classifier = WebRtcClassifier::new(16000)?;
//! let flags = segmenter.classify_frames(&samples, &mut classifier)?;
//! ```

use tracing::debug;
use webrtc_vad::{SampleRate, Vad, VadMode};

use crate::audio::samples_to_i16;
use crate::error::{VoxError, VoxResult};

/// Frame durations the WebRTC classifier accepts, in milliseconds
pub const SUPPORTED_FRAME_MS: [u32; 3] = [10, 20, 30];

/// Framing configuration for voice-activity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramingConfig {
    /// Sample rate of input audio (default: 16000 Hz)
    pub sample_rate: u32,
    /// Frame duration in milliseconds (default: 30; must be 10, 20, or 30)
    pub frame_ms: u32,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            frame_ms: 30,
        }
    }
}

impl FramingConfig {
    /// Set the frame duration
    #[must_use]
    pub fn with_frame_ms(mut self, frame_ms: u32) -> Self {
        self.frame_ms = frame_ms;
        self
    }

    /// Set the sample rate
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Samples per complete frame (`sample_rate * frame_ms / 1000`)
    #[must_use]
    pub fn samples_per_frame(&self) -> usize {
        (self.sample_rate as usize * self.frame_ms as usize) / 1000
    }

    /// Validate against the classifier contract.
    ///
    /// The WebRTC classifier only supports 10/20/30 ms frames at
    /// 8/16/32/48 kHz; anything else is rejected up front rather than deep
    /// inside classification.
    pub fn validate(&self) -> VoxResult<()> {
        if !SUPPORTED_FRAME_MS.contains(&self.frame_ms) {
            return Err(VoxError::Vad(format!(
                "unsupported frame duration: {}ms (supported: 10, 20, 30)",
                self.frame_ms
            )));
        }
        if !matches!(self.sample_rate, 8000 | 16000 | 32000 | 48000) {
            return Err(VoxError::Vad(format!(
                "unsupported sample rate: {}Hz (supported: 8000, 16000, 32000, 48000)",
                self.sample_rate
            )));
        }
        Ok(())
    }
}

/// Seam for the external per-frame voice classifier.
///
/// Implementations receive one complete frame of 16-bit PCM at the configured
/// sample rate and decide whether it contains speech.
pub trait SpeechClassifier {
    /// Classify one complete PCM frame as speech or non-speech.
    fn classify(&mut self, frame: &[i16]) -> VoxResult<bool>;
}

/// WebRTC VAD adapter, fixed to the most aggressive filtering mode
pub struct WebRtcClassifier {
    vad: Vad,
}

impl WebRtcClassifier {
    /// Create a classifier for the given sample rate (`VeryAggressive` mode).
    pub fn new(sample_rate: u32) -> VoxResult<Self> {
        Self::with_mode(sample_rate, VadMode::VeryAggressive)
    }

    /// Create a classifier with an explicit aggressiveness mode.
    pub fn with_mode(sample_rate: u32, mode: VadMode) -> VoxResult<Self> {
        let rate = match sample_rate {
            8000 => SampleRate::Rate8kHz,
            16000 => SampleRate::Rate16kHz,
            32000 => SampleRate::Rate32kHz,
            48000 => SampleRate::Rate48kHz,
            other => {
                return Err(VoxError::Vad(format!(
                    "unsupported sample rate for VAD: {other}Hz"
                )))
            }
        };

        Ok(Self {
            vad: Vad::new_with_rate_and_mode(rate, mode),
        })
    }
}

impl SpeechClassifier for WebRtcClassifier {
    fn classify(&mut self, frame: &[i16]) -> VoxResult<bool> {
        self.vad
            .is_voice_segment(frame)
            .map_err(|()| VoxError::Vad(format!("classifier rejected frame of {} samples", frame.len())))
    }
}

impl std::fmt::Debug for WebRtcClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebRtcClassifier").finish_non_exhaustive()
    }
}

/// Frame segmenter: tiles the waveform and classifies complete frames
#[derive(Debug, Clone)]
pub struct FrameSegmenter {
    config: FramingConfig,
}

impl FrameSegmenter {
    /// Create a segmenter, validating the framing against the classifier
    /// contract.
    pub fn new(config: FramingConfig) -> VoxResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &FramingConfig {
        &self.config
    }

    /// Classify every complete frame of the waveform.
    ///
    /// Rescales the float waveform to 16-bit PCM, then feeds each
    /// `samples_per_frame` chunk to the classifier. Returns one flag per
    /// complete frame; a waveform shorter than one frame yields no flags.
    pub fn classify_frames<C: SpeechClassifier>(
        &self,
        samples: &[f32],
        classifier: &mut C,
    ) -> VoxResult<Vec<bool>> {
        let samples_per_frame = self.config.samples_per_frame();
        let pcm = samples_to_i16(samples);

        let mut flags = Vec::with_capacity(pcm.len() / samples_per_frame);
        for frame in pcm.chunks_exact(samples_per_frame) {
            flags.push(classifier.classify(frame)?);
        }

        debug!(
            frames = flags.len(),
            speech_frames = flags.iter().filter(|&&f| f).count(),
            "classified frames"
        );

        Ok(flags)
    }
}
