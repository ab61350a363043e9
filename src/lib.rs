//! # voxtitle
//!
//! Speaker-tagged subtitle generation from mono audio and externally-produced
//! transcripts.
//!
//! ## Overview
//!
//! voxtitle answers "who said what, when?" for a finished recording:
//! 1. Voice-activity segmentation slices the waveform into speech segments
//! 2. Speaker embeddings for each segment are clustered into speaker identities
//! 3. Transcript segments from an ASR collaborator are aligned to those
//!    identities and rendered as SRT or ASS subtitles
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use voxtitle::diarization::{DiarizationConfig, Diarizer, FilterbankEmbedder};
//! use voxtitle::subtitle::{render, SubtitleFormat};
//! use voxtitle::vad::WebRtcClassifier;
//!
//! let classifier = WebRtcClassifier::new(16000)?;
//! let embedder = FilterbankEmbedder::new(16000);
//! let mut diarizer = Diarizer::new(DiarizationConfig::default(), classifier, embedder)?;
//!
//! let timeline = diarizer.diarize(&samples)?;
//! let srt = render(&transcript, &timeline, SubtitleFormat::Srt);
//! ```
//!
//! ## External collaborators
//!
//! The pipeline owns no models. The voice classifier and the embedding model
//! are injected behind the [`vad::SpeechClassifier`] and
//! [`diarization::EmbeddingExtractor`] traits; the ASR that produces
//! [`TranscriptSegment`]s sits behind [`Transcriber`]. Container demuxing is
//! delegated to ffmpeg via [`transcode`].

#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

pub mod audio;
pub mod diarization;
pub mod error;
pub mod subtitle;
pub mod transcode;
pub mod vad;

/// CLI module for the voxtitle command-line interface
#[cfg(feature = "cli")]
pub mod cli;

pub use error::{VoxError, VoxResult};

/// A timed transcript segment produced by the ASR collaborator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct TranscriptSegment {
    /// Start time in seconds
    pub start: f32,
    /// End time in seconds
    pub end: f32,
    /// Raw transcribed text (may carry surrounding whitespace)
    pub text: String,
}

/// An ordered transcript, as delivered by the ASR collaborator
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct Transcript {
    /// Detected or requested language (ISO 639-1, or "auto")
    #[cfg_attr(feature = "cli", serde(default))]
    pub language: String,
    /// Timestamped segments in playback order
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Number of segments
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the transcript has no segments
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Seam for the speech-to-text collaborator.
///
/// Implementations map a fully-materialized waveform to an ordered
/// [`Transcript`]. `language` is an ISO 639-1 hint; `None` requests
/// auto-detection.
pub trait Transcriber {
    /// Transcribe a mono waveform at the pipeline sample rate.
    fn transcribe(&mut self, samples: &[f32], language: Option<&str>) -> VoxResult<Transcript>;
}
