//! Speaker diarization pipeline
//!
//! Answers "who spoke when?" for a fully-materialized waveform:
//! 1. Classify fixed-duration frames as speech/non-speech (VAD)
//! 2. Merge contiguous speech frames into speech segments
//! 3. Extract a speaker embedding per segment
//! 4. Cluster embeddings into a bounded number of speaker identities
//! 5. Emit a time-ordered speaker timeline in seconds
//!
//! The pipeline is a single-threaded, purely sequential batch transform. It
//! owns no models: the frame classifier and the embedding model are injected
//! behind their seams, so test doubles can stand in for the real thing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use voxtitle::diarization::{DiarizationConfig, Diarizer, FilterbankEmbedder};
//! use voxtitle::vad::WebRtcClassifier;
//!
//! let mut diarizer = Diarizer::new(
//!     DiarizationConfig::default(),
//!     WebRtcClassifier::new(16000)?,
//!     FilterbankEmbedder::new(16000),
//! )?;
//! let timeline = diarizer.diarize(&samples)?;
//! ```

pub mod clustering;
pub mod embedding;
pub mod segmentation;
pub mod timeline;

pub use clustering::{AgglomerativeClustering, ClusteringConfig};
pub use embedding::{EmbeddingExtractor, FilterbankEmbedder, SpeakerEmbedding, EMBEDDING_DIM};
pub use segmentation::{extract_segments, SpeechSegment};
pub use timeline::{DiarizationInterval, DiarizationTimeline};

use tracing::{debug, info};

use crate::error::VoxResult;
use crate::vad::{FrameSegmenter, FramingConfig, SpeechClassifier};

/// Diarization configuration
#[derive(Debug, Clone, Default)]
pub struct DiarizationConfig {
    /// Voice-activity framing configuration
    pub framing: FramingConfig,
    /// Speaker clustering configuration
    pub clustering: ClusteringConfig,
}

impl DiarizationConfig {
    /// Set the speaker ceiling
    #[must_use]
    pub fn with_max_speakers(mut self, max_speakers: usize) -> Self {
        self.clustering.max_speakers = max_speakers;
        self
    }

    /// Set the VAD frame duration in milliseconds
    #[must_use]
    pub fn with_frame_ms(mut self, frame_ms: u32) -> Self {
        self.framing.frame_ms = frame_ms;
        self
    }

    /// Set the sample rate
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.framing.sample_rate = sample_rate;
        self
    }
}

/// Speaker diarizer over injected classifier and embedder collaborators
#[derive(Debug)]
pub struct Diarizer<C, E> {
    config: DiarizationConfig,
    segmenter: FrameSegmenter,
    classifier: C,
    embedder: E,
}

impl<C: SpeechClassifier, E: EmbeddingExtractor> Diarizer<C, E> {
    /// Create a diarizer, validating the framing configuration.
    pub fn new(config: DiarizationConfig, classifier: C, embedder: E) -> VoxResult<Self> {
        let segmenter = FrameSegmenter::new(config.framing)?;
        Ok(Self {
            config,
            segmenter,
            classifier,
            embedder,
        })
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &DiarizationConfig {
        &self.config
    }

    /// Diarize a mono waveform into a speaker timeline.
    ///
    /// Degenerate inputs (waveform shorter than one frame, or no speech
    /// frames at all) resolve to the whole-waveform single-speaker fallback
    /// rather than an error; only collaborator failures propagate.
    pub fn diarize(&mut self, samples: &[f32]) -> VoxResult<DiarizationTimeline> {
        let sample_rate = self.config.framing.sample_rate;
        let samples_per_frame = self.config.framing.samples_per_frame();

        let flags = self
            .segmenter
            .classify_frames(samples, &mut self.classifier)?;

        let segments = extract_segments(&flags, samples_per_frame, samples.len());

        if segments.is_empty() {
            info!("no speech detected; labeling whole waveform as one speaker");
            return DiarizationTimeline::build(&[], &[], sample_rate, samples.len());
        }

        // One embedding per segment, in segment order; the zip with cluster
        // labels below depends on that order being preserved.
        let mut embeddings = Vec::with_capacity(segments.len());
        for segment in &segments {
            let slice = &samples[segment.start_sample..segment.end_sample.min(samples.len())];
            embeddings.push(self.embedder.embed(slice, sample_rate)?);
        }

        let labels =
            AgglomerativeClustering::new(self.config.clustering.clone()).cluster(&embeddings)?;

        debug!(
            segments = segments.len(),
            speakers = labels.iter().copied().max().map_or(0, |m| m + 1),
            "diarization complete"
        );

        DiarizationTimeline::build(&segments, &labels, sample_rate, samples.len())
    }
}
