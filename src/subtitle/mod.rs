//! Subtitle serialization
//!
//! Turns transcript segments plus a diarization timeline into speaker-tagged
//! subtitle text. Two formats are supported: SRT and ASS. Formatting is a
//! pure function of its inputs — the same (transcript, timeline) pair always
//! yields byte-identical output.
//!
//! Zero-duration or out-of-order segments are rendered as-is; validating the
//! transcript is the ASR collaborator's responsibility, not the formatter's.

pub mod ass;
pub mod srt;

pub use ass::{format_ass, format_timestamp_ass};
pub use srt::{format_srt, format_timestamp_srt};

use crate::diarization::DiarizationTimeline;
use crate::{Transcript, TranscriptSegment};

/// Subtitle output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubRip subtitles
    Srt,
    /// Advanced SubStation Alpha subtitles
    Ass,
}

impl SubtitleFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Ass => "ass",
        }
    }
}

/// One subtitle entry ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    /// 1-based sequence index
    pub index: usize,
    /// Start time in seconds
    pub start: f32,
    /// End time in seconds
    pub end: f32,
    /// Speaker label assigned from the diarization timeline
    pub speaker: usize,
    /// Trimmed transcript text
    pub text: String,
}

/// Assign a speaker to every transcript segment and trim its text.
///
/// The speaker comes from midpoint containment against the timeline
/// (see [`DiarizationTimeline::assign`]); segments whose midpoint misses
/// every interval get label 0.
#[must_use]
pub fn build_entries(
    segments: &[TranscriptSegment],
    timeline: &DiarizationTimeline,
) -> Vec<SubtitleEntry> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| SubtitleEntry {
            index: i + 1,
            start: segment.start,
            end: segment.end,
            speaker: timeline.assign(segment.start, segment.end),
            text: segment.text.trim().to_string(),
        })
        .collect()
}

/// Render a transcript against a diarization timeline in the given format.
#[must_use]
pub fn render(
    transcript: &Transcript,
    timeline: &DiarizationTimeline,
    format: SubtitleFormat,
) -> String {
    let entries = build_entries(&transcript.segments, timeline);
    match format {
        SubtitleFormat::Srt => format_srt(&entries),
        SubtitleFormat::Ass => format_ass(&entries),
    }
}
