//! Speech segment extraction
//!
//! Merges contiguous speech frames into speech segments expressed in sample
//! offsets. One forward scan over the frame flags: a segment opens at the
//! first speech frame after silence (or at the start) and closes at the next
//! silence frame.

use tracing::debug;

/// A detected speech region, half-open `[start_sample, end_sample)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechSegment {
    /// First sample of the segment
    pub start_sample: usize,
    /// One past the last sample of the segment
    pub end_sample: usize,
}

impl SpeechSegment {
    /// Create a new segment
    #[must_use]
    pub fn new(start_sample: usize, end_sample: usize) -> Self {
        Self {
            start_sample,
            end_sample,
        }
    }

    /// Segment length in samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_sample - self.start_sample
    }

    /// Whether the segment covers no samples (never true for extractor output)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end_sample <= self.start_sample
    }

    /// Start time in seconds at the given sample rate
    #[must_use]
    pub fn start_secs(&self, sample_rate: u32) -> f32 {
        self.start_sample as f32 / sample_rate as f32
    }

    /// End time in seconds at the given sample rate
    #[must_use]
    pub fn end_secs(&self, sample_rate: u32) -> f32 {
        self.end_sample as f32 / sample_rate as f32
    }
}

/// Extract speech segments from per-frame classification flags.
///
/// Offsets are `frame_index * samples_per_frame`. A segment still open when
/// the flags run out is closed at `total_samples` — the full waveform length,
/// including any trailing partial frame the classifier never saw — so audio
/// too short to classify is not silently lost.
///
/// All-silence flags produce an empty list; the whole-waveform fallback is
/// the timeline builder's job (see
/// [`crate::diarization::DiarizationTimeline::build`]).
#[must_use]
pub fn extract_segments(
    flags: &[bool],
    samples_per_frame: usize,
    total_samples: usize,
) -> Vec<SpeechSegment> {
    let mut segments = Vec::new();
    let mut open_at: Option<usize> = None;

    for (idx, &is_speech) in flags.iter().enumerate() {
        if is_speech {
            if open_at.is_none() {
                open_at = Some(idx * samples_per_frame);
            }
        } else if let Some(start) = open_at.take() {
            segments.push(SpeechSegment::new(start, idx * samples_per_frame));
        }
    }

    // Still in speech at the end of the classified frames: extend to the full
    // waveform length to recover the unclassified tail.
    if let Some(start) = open_at {
        segments.push(SpeechSegment::new(start, total_samples));
    }

    debug!(segments = segments.len(), "extracted speech segments");

    segments
}
