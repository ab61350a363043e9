//! Diarization timeline
//!
//! Converts labeled speech segments into a time-ordered list of speaker
//! intervals in seconds, and answers "who is speaking at time t?" queries for
//! transcript alignment.

use tracing::debug;

use super::segmentation::SpeechSegment;
use crate::error::{VoxError, VoxResult};

/// A speaker interval in seconds.
///
/// Intervals never overlap and are sorted by start time; the speaker label is
/// a small integer with no meaning across diarization calls.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct DiarizationInterval {
    /// Start time in seconds
    pub start: f32,
    /// End time in seconds
    pub end: f32,
    /// Speaker label assigned by clustering
    pub speaker: usize,
}

impl DiarizationInterval {
    /// Create a new interval
    #[must_use]
    pub fn new(start: f32, end: f32, speaker: usize) -> Self {
        Self {
            start,
            end,
            speaker,
        }
    }

    /// Interval duration in seconds
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.end - self.start
    }

    /// Whether the instant falls inside `[start, end]`, inclusive on both
    /// ends
    #[must_use]
    pub fn contains(&self, instant: f32) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Time-ordered speaker intervals for one diarization call
#[derive(Debug, Clone, PartialEq)]
pub struct DiarizationTimeline {
    intervals: Vec<DiarizationInterval>,
}

impl DiarizationTimeline {
    /// Build a timeline from speech segments and their cluster labels.
    ///
    /// Sample offsets convert to seconds by dividing by `sample_rate`. An
    /// empty segment list produces the whole-waveform single-speaker
    /// fallback `(0, duration, 0)` — the only place silence-only input is
    /// ever called "speaker 0".
    ///
    /// # Errors
    ///
    /// Returns a `Diarization` error when segment and label counts differ.
    pub fn build(
        segments: &[SpeechSegment],
        labels: &[usize],
        sample_rate: u32,
        total_samples: usize,
    ) -> VoxResult<Self> {
        if segments.len() != labels.len() {
            return Err(VoxError::Diarization(format!(
                "segment/label count mismatch: {} segments, {} labels",
                segments.len(),
                labels.len()
            )));
        }

        if segments.is_empty() {
            let duration = total_samples as f32 / sample_rate as f32;
            debug!(duration, "no speech segments; single-speaker fallback");
            return Ok(Self {
                intervals: vec![DiarizationInterval::new(0.0, duration, 0)],
            });
        }

        let mut intervals: Vec<DiarizationInterval> = segments
            .iter()
            .zip(labels.iter())
            .map(|(segment, &speaker)| {
                DiarizationInterval::new(
                    segment.start_secs(sample_rate),
                    segment.end_secs(sample_rate),
                    speaker,
                )
            })
            .collect();
        intervals.sort_by(|a, b| a.start.total_cmp(&b.start));

        Ok(Self { intervals })
    }

    /// Get the intervals
    #[must_use]
    pub fn intervals(&self) -> &[DiarizationInterval] {
        &self.intervals
    }

    /// Number of distinct speaker labels on the timeline
    #[must_use]
    pub fn num_speakers(&self) -> usize {
        let mut speakers: Vec<usize> = self.intervals.iter().map(|i| i.speaker).collect();
        speakers.sort_unstable();
        speakers.dedup();
        speakers.len()
    }

    /// Speaker at an instant, if any interval contains it.
    ///
    /// Containment is inclusive on both ends; the first interval in sort
    /// order wins, so at a shared boundary point the earlier interval's
    /// speaker is returned.
    #[must_use]
    pub fn speaker_at(&self, instant: f32) -> Option<usize> {
        self.intervals
            .iter()
            .find(|interval| interval.contains(instant))
            .map(|interval| interval.speaker)
    }

    /// Assign a speaker label to a query interval by midpoint containment.
    ///
    /// A midpoint falling in a silence gap or outside the timeline yields
    /// the default label 0 — never an error. This deliberately trades
    /// boundary precision for determinism and O(intervals) simplicity.
    #[must_use]
    pub fn assign(&self, start: f32, end: f32) -> usize {
        self.speaker_at((start + end) / 2.0).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(intervals: &[(f32, f32, usize)]) -> DiarizationTimeline {
        DiarizationTimeline {
            intervals: intervals
                .iter()
                .map(|&(start, end, speaker)| DiarizationInterval::new(start, end, speaker))
                .collect(),
        }
    }

    // =========================================================================
    // DiarizationInterval Tests
    // =========================================================================

    #[test]
    fn test_interval_duration() {
        let interval = DiarizationInterval::new(1.0, 3.5, 0);
        assert!((interval.duration() - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_interval_contains_inclusive_bounds() {
        let interval = DiarizationInterval::new(1.0, 2.0, 0);
        assert!(interval.contains(1.0));
        assert!(interval.contains(2.0));
        assert!(interval.contains(1.5));
        assert!(!interval.contains(0.99));
        assert!(!interval.contains(2.01));
    }

    // =========================================================================
    // Timeline Builder Tests
    // =========================================================================

    #[test]
    fn test_build_converts_samples_to_seconds() {
        let segments = vec![
            SpeechSegment::new(0, 8000),
            SpeechSegment::new(16000, 32000),
        ];
        let labels = vec![0, 1];

        let timeline =
            DiarizationTimeline::build(&segments, &labels, 16000, 32000).expect("should build");

        let intervals = timeline.intervals();
        assert_eq!(intervals.len(), 2);
        assert!((intervals[0].start - 0.0).abs() < f32::EPSILON);
        assert!((intervals[0].end - 0.5).abs() < f32::EPSILON);
        assert_eq!(intervals[0].speaker, 0);
        assert!((intervals[1].start - 1.0).abs() < f32::EPSILON);
        assert!((intervals[1].end - 2.0).abs() < f32::EPSILON);
        assert_eq!(intervals[1].speaker, 1);
    }

    #[test]
    fn test_build_empty_segments_single_speaker_fallback() {
        let timeline = DiarizationTimeline::build(&[], &[], 16000, 8000).expect("should build");

        let intervals = timeline.intervals();
        assert_eq!(intervals.len(), 1);
        assert!((intervals[0].start - 0.0).abs() < f32::EPSILON);
        assert!((intervals[0].end - 0.5).abs() < f32::EPSILON);
        assert_eq!(intervals[0].speaker, 0);
    }

    #[test]
    fn test_build_rejects_label_count_mismatch() {
        let segments = vec![SpeechSegment::new(0, 8000)];
        let result = DiarizationTimeline::build(&segments, &[0, 1], 16000, 8000);
        assert!(matches!(result, Err(VoxError::Diarization(_))));
    }

    #[test]
    fn test_build_sorts_intervals() {
        let segments = vec![
            SpeechSegment::new(16000, 24000),
            SpeechSegment::new(0, 8000),
        ];
        let labels = vec![1, 0];

        let timeline =
            DiarizationTimeline::build(&segments, &labels, 16000, 24000).expect("should build");

        let starts: Vec<f32> = timeline.intervals().iter().map(|i| i.start).collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_num_speakers() {
        let t = timeline(&[(0.0, 1.0, 0), (1.0, 2.0, 1), (2.0, 3.0, 0)]);
        assert_eq!(t.num_speakers(), 2);
    }

    // =========================================================================
    // Speaker Assignment Tests
    // =========================================================================

    #[test]
    fn test_assign_midpoint_containment() {
        let t = timeline(&[(0.0, 1.0, 0), (2.0, 3.0, 1)]);

        assert_eq!(t.assign(0.2, 0.8), 0); // midpoint 0.5
        assert_eq!(t.assign(2.0, 3.0), 1); // midpoint 2.5
    }

    #[test]
    fn test_assign_gap_defaults_to_zero() {
        let t = timeline(&[(0.0, 1.0, 1), (2.0, 3.0, 1)]);
        // Midpoint 1.5 falls in the silence gap
        assert_eq!(t.assign(1.2, 1.8), 0);
    }

    #[test]
    fn test_assign_out_of_range_defaults_to_zero() {
        let t = timeline(&[(0.0, 1.0, 1)]);
        assert_eq!(t.assign(5.0, 6.0), 0);
    }

    #[test]
    fn test_assign_shared_boundary_earlier_interval_wins() {
        let t = timeline(&[(0.0, 1.0, 0), (1.0, 2.0, 1)]);
        // Midpoint exactly 1.0 is inside both inclusive bounds
        assert_eq!(t.assign(0.5, 1.5), 0);
    }

    #[test]
    fn test_assign_is_deterministic() {
        let t = timeline(&[(0.0, 1.5, 0), (1.5, 4.0, 1)]);
        let first = t.assign(1.0, 2.0);
        for _ in 0..10 {
            assert_eq!(t.assign(1.0, 2.0), first);
        }
    }

    #[test]
    fn test_speaker_at_none_outside_all_intervals() {
        let t = timeline(&[(1.0, 2.0, 0)]);
        assert_eq!(t.speaker_at(0.5), None);
        assert_eq!(t.speaker_at(1.5), Some(0));
    }
}
