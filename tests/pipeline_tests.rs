//! Integration tests: full diarization-and-alignment pipeline
//!
//! Drives the pipeline end-to-end with injected test doubles for the voice
//! classifier and the embedding model, so no external models are needed.

use std::cell::RefCell;

use voxtitle::diarization::{
    DiarizationConfig, DiarizationTimeline, Diarizer, EmbeddingExtractor, SpeakerEmbedding,
    SpeechSegment,
};
use voxtitle::subtitle::{render, SubtitleFormat};
use voxtitle::vad::SpeechClassifier;
use voxtitle::{Transcript, TranscriptSegment, VoxResult};

/// Classifier double replaying a scripted flag sequence
struct ScriptedClassifier {
    flags: Vec<bool>,
    next: usize,
}

impl ScriptedClassifier {
    fn new(flags: Vec<bool>) -> Self {
        Self { flags, next: 0 }
    }
}

impl SpeechClassifier for ScriptedClassifier {
    fn classify(&mut self, _frame: &[i16]) -> VoxResult<bool> {
        let flag = self.flags.get(self.next).copied().unwrap_or(false);
        self.next += 1;
        Ok(flag)
    }
}

/// Embedder double replaying scripted vectors, one per segment in order
struct ScriptedEmbedder {
    vectors: RefCell<Vec<Vec<f32>>>,
}

impl ScriptedEmbedder {
    fn new(vectors: Vec<Vec<f32>>) -> Self {
        Self {
            vectors: RefCell::new(vectors),
        }
    }
}

impl EmbeddingExtractor for ScriptedEmbedder {
    fn embed(&self, _samples: &[f32], _sample_rate: u32) -> VoxResult<SpeakerEmbedding> {
        let mut vectors = self.vectors.borrow_mut();
        if vectors.is_empty() {
            return Ok(SpeakerEmbedding::new(vec![1.0, 0.0]));
        }
        Ok(SpeakerEmbedding::new(vectors.remove(0)))
    }
}

const SPF: usize = 480; // 30ms at 16kHz

fn transcript(segments: &[(f32, f32, &str)]) -> Transcript {
    Transcript {
        language: "en".to_string(),
        segments: segments
            .iter()
            .map(|&(start, end, text)| TranscriptSegment {
                start,
                end,
                text: text.to_string(),
            })
            .collect(),
    }
}

#[test]
fn two_speakers_get_distinct_tags() {
    // Two speech runs separated by silence; scripted embeddings put them in
    // different clusters.
    let flags = vec![
        true, true, true, false, false, true, true, true, //
    ];
    let mut diarizer = Diarizer::new(
        DiarizationConfig::default(),
        ScriptedClassifier::new(flags),
        ScriptedEmbedder::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
    )
    .expect("valid config");

    let samples = vec![0.1f32; SPF * 8];
    let timeline = diarizer.diarize(&samples).expect("should diarize");

    let intervals = timeline.intervals();
    assert_eq!(intervals.len(), 2);
    assert_eq!(intervals[0].speaker, 0);
    assert_eq!(intervals[1].speaker, 1);
    assert_eq!(timeline.num_speakers(), 2);

    // Transcript segments aligned to each run pick up the matching speaker
    let transcript = transcript(&[(0.0, 0.08, "first voice"), (0.16, 0.23, "second voice")]);
    let srt = render(&transcript, &timeline, SubtitleFormat::Srt);
    assert!(srt.contains("<S1> first voice"));
    assert!(srt.contains("<S2> second voice"));
}

#[test]
fn silent_waveform_labels_everything_speaker_zero() {
    // 0.5 seconds of silence: the timeline must be the single fallback
    // interval and every transcript segment must land on label 0.
    let mut diarizer = Diarizer::new(
        DiarizationConfig::default(),
        ScriptedClassifier::new(vec![false; 16]),
        ScriptedEmbedder::new(vec![]),
    )
    .expect("valid config");

    let samples = vec![0.0f32; 8000];
    let timeline = diarizer.diarize(&samples).expect("should diarize");

    let intervals = timeline.intervals();
    assert_eq!(intervals.len(), 1);
    assert!((intervals[0].start - 0.0).abs() < f32::EPSILON);
    assert!((intervals[0].end - 0.5).abs() < f32::EPSILON);
    assert_eq!(intervals[0].speaker, 0);

    let transcript = transcript(&[(0.0, 0.2, "a"), (0.3, 0.5, "b"), (0.9, 1.0, "past the end")]);
    for segment in &transcript.segments {
        assert_eq!(timeline.assign(segment.start, segment.end), 0);
    }
}

#[test]
fn srt_round_trip_exact_output() {
    // The canonical SRT fixture: two segments over a single diarization
    // interval (0.0, 2.0, 0).
    let segments = [SpeechSegment::new(0, 32000)];
    let timeline =
        DiarizationTimeline::build(&segments, &[0], 16000, 32000).expect("should build");

    let transcript = transcript(&[(0.0, 1.234, "hello"), (1.5, 2.0, "world")]);
    let srt = render(&transcript, &timeline, SubtitleFormat::Srt);

    let expected = "1\n\
00:00:00,000 --> 00:00:01,234\n\
<S1> hello\n\
\n\
2\n\
00:00:01,500 --> 00:00:02,000\n\
<S1> world\n";
    assert_eq!(srt, expected);
}

#[test]
fn ass_output_has_header_and_name_field_tags() {
    let segments = [SpeechSegment::new(0, 32000)];
    let timeline =
        DiarizationTimeline::build(&segments, &[0], 16000, 32000).expect("should build");

    let transcript = transcript(&[(0.0, 1.0, " padded text ")]);
    let ass = render(&transcript, &timeline, SubtitleFormat::Ass);

    assert!(ass.starts_with("[Script Info]\nScriptType: v4.00+\n"));
    assert!(ass.contains("[Events]\n"));
    // Text is trimmed and the tag sits in the Name field
    assert!(ass.ends_with("Dialogue: 0,0:00:00.00,0:00:01.00,Default,S1,0,0,0,,padded text"));
}

#[test]
fn formatting_is_idempotent_across_formats() {
    let segments = [
        SpeechSegment::new(0, 16000),
        SpeechSegment::new(24000, 48000),
    ];
    let timeline =
        DiarizationTimeline::build(&segments, &[0, 1], 16000, 48000).expect("should build");
    let transcript = transcript(&[(0.2, 0.9, "one"), (1.6, 2.9, "two")]);

    for format in [SubtitleFormat::Srt, SubtitleFormat::Ass] {
        let first = render(&transcript, &timeline, format);
        let second = render(&transcript, &timeline, format);
        assert_eq!(first, second);
    }
}

#[test]
fn trailing_audio_is_recovered_by_open_segment() {
    // 3 complete frames plus a 200-sample tail; speech runs through the end,
    // so the final interval must extend past the last classified frame.
    let total = SPF * 3 + 200;
    let mut diarizer = Diarizer::new(
        DiarizationConfig::default(),
        ScriptedClassifier::new(vec![false, true, true]),
        ScriptedEmbedder::new(vec![]),
    )
    .expect("valid config");

    let samples = vec![0.1f32; total];
    let timeline = diarizer.diarize(&samples).expect("should diarize");

    let last = timeline.intervals().last().expect("one interval");
    let expected_end = total as f32 / 16000.0;
    assert!((last.end - expected_end).abs() < f32::EPSILON);
}

#[test]
fn single_segment_bypasses_clustering() {
    // One speech run: the clusterer must not be exercised beyond its N=1
    // short-circuit, and the label must be 0.
    let mut diarizer = Diarizer::new(
        DiarizationConfig::default(),
        ScriptedClassifier::new(vec![true, true, true, false]),
        ScriptedEmbedder::new(vec![vec![0.42, 0.17]]),
    )
    .expect("valid config");

    let samples = vec![0.1f32; SPF * 4];
    let timeline = diarizer.diarize(&samples).expect("should diarize");

    assert_eq!(timeline.intervals().len(), 1);
    assert_eq!(timeline.intervals()[0].speaker, 0);
}

#[test]
fn labels_never_exceed_speaker_ceiling() {
    // Five speech runs with wildly different embeddings still collapse to at
    // most two labels under the default ceiling.
    let mut flags = Vec::new();
    for _ in 0..5 {
        flags.extend([true, false]);
    }
    let vectors = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![0.5, 0.5, 0.0],
        vec![0.0, 0.5, 0.5],
    ];

    let mut diarizer = Diarizer::new(
        DiarizationConfig::default(),
        ScriptedClassifier::new(flags),
        ScriptedEmbedder::new(vectors),
    )
    .expect("valid config");

    let samples = vec![0.1f32; SPF * 10];
    let timeline = diarizer.diarize(&samples).expect("should diarize");

    assert_eq!(timeline.intervals().len(), 5);
    assert!(timeline.intervals().iter().all(|i| i.speaker < 2));
}
