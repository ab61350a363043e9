//! Command implementations for the voxtitle CLI
//!
//! Each command is implemented as a pure function for testability. The main
//! `run` function dispatches to the appropriate command.

use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::audio;
use crate::diarization::{DiarizationConfig, DiarizationTimeline, Diarizer, FilterbankEmbedder};
use crate::subtitle::{render, SubtitleFormat};
use crate::transcode;
use crate::vad::WebRtcClassifier;
use crate::Transcript;

use super::args::{Args, Command, DiarizeArgs, GenerateArgs};

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Pipeline error
    #[error("Pipeline error: {0}")]
    Vox(#[from] crate::VoxError),

    /// Transcript JSON error
    #[error("Transcript error: {0}")]
    Transcript(#[from] serde_json::Error),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// Command execution result
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded
    pub success: bool,
    /// Output message
    pub message: String,
}

impl CommandResult {
    /// Create a success result
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(args: Args) -> CliResult<CommandResult> {
    match args.command.clone() {
        Command::Generate(generate) => run_generate(generate, &args),
        Command::Diarize(diarize) => run_diarize(diarize, &args),
    }
}

/// Diarize the input file: transcode, load, run the pipeline
fn diarize_input(
    input: &Path,
    max_speakers: usize,
    frame_ms: u32,
    verbose: bool,
) -> CliResult<DiarizationTimeline> {
    if !input.exists() {
        return Err(CliError::FileNotFound(input.display().to_string()));
    }

    let wav_path = transcode::to_mono_wav(input, audio::SAMPLE_RATE)?;
    let wav = audio::load_wav(&wav_path)?;

    if verbose {
        eprintln!(
            "[INFO] Audio: {:.2}s, {} samples at {}Hz",
            wav.duration_secs(),
            wav.samples.len(),
            wav.sample_rate
        );
    }

    let config = DiarizationConfig::default()
        .with_sample_rate(wav.sample_rate)
        .with_max_speakers(max_speakers)
        .with_frame_ms(frame_ms);

    let classifier = WebRtcClassifier::new(wav.sample_rate)?;
    let embedder = FilterbankEmbedder::new(wav.sample_rate);
    let mut diarizer = Diarizer::new(config, classifier, embedder)?;

    let timeline = diarizer.diarize(&wav.samples)?;
    info!(
        intervals = timeline.intervals().len(),
        speakers = timeline.num_speakers(),
        "diarization finished"
    );

    Ok(timeline)
}

/// Run the generate command
pub fn run_generate(args: GenerateArgs, global: &Args) -> CliResult<CommandResult> {
    if !args.transcript.exists() {
        return Err(CliError::FileNotFound(args.transcript.display().to_string()));
    }

    let transcript: Transcript = serde_json::from_str(&fs::read_to_string(&args.transcript)?)?;
    if global.verbose {
        eprintln!("[INFO] Transcript: {} segments", transcript.len());
    }

    let timeline = diarize_input(&args.input, args.max_speakers, args.frame_ms, global.verbose)?;

    let format = SubtitleFormat::from(args.format);
    let output_text = render(&transcript, &timeline, format);

    let output_path = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, format));
    fs::write(&output_path, &output_text)?;

    if !global.quiet {
        println!("Written to: {}", output_path.display());
    }

    Ok(CommandResult::success(output_path.display().to_string()))
}

/// Run the diarize command
pub fn run_diarize(args: DiarizeArgs, global: &Args) -> CliResult<CommandResult> {
    let timeline = diarize_input(&args.input, args.max_speakers, args.frame_ms, global.verbose)?;

    let mut stdout = io::stdout();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, timeline.intervals())?;
        writeln!(stdout).ok();
    } else if !global.quiet {
        for interval in timeline.intervals() {
            println!(
                "{:8.2}s - {:8.2}s  Speaker_{}",
                interval.start,
                interval.end,
                interval.speaker + 1
            );
        }
    }
    stdout.flush()?;

    Ok(CommandResult::success(format!(
        "{} intervals, {} speakers",
        timeline.intervals().len(),
        timeline.num_speakers()
    )))
}

/// Derive the output path from the input path and the chosen format
fn default_output_path(input: &Path, format: SubtitleFormat) -> PathBuf {
    input.with_extension(format.extension())
}
