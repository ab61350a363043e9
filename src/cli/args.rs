//! Command-line argument parsing for the voxtitle CLI
//!
//! Uses clap derive macros for type-safe argument parsing.
//! All argument structures are unit-testable.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::subtitle::SubtitleFormat;

/// voxtitle: speaker-tagged subtitle generation
///
/// Diarizes an audio/video file and aligns an externally-produced transcript
/// to the detected speakers, writing SRT or ASS subtitles.
#[derive(Parser, Debug, Clone)]
#[command(name = "voxtitle")]
#[command(version)]
#[command(about = "Speaker-tagged subtitle generation", long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output (show stage info)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate speaker-tagged subtitles from audio plus a transcript file
    Generate(GenerateArgs),

    /// Diarize an audio/video file and print the speaker timeline
    Diarize(DiarizeArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Input audio/video file (any container ffmpeg understands)
    pub input: PathBuf,

    /// Transcript segments JSON from the ASR collaborator
    #[arg(short, long)]
    pub transcript: PathBuf,

    /// Subtitle output format
    #[arg(short, long, default_value = "srt")]
    pub format: SubtitleFormatArg,

    /// Output file path (default: input path with the format's extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ceiling on the number of speakers to distinguish
    #[arg(long, default_value = "2")]
    pub max_speakers: usize,

    /// VAD frame duration in milliseconds (10, 20, or 30)
    #[arg(long, default_value = "30")]
    pub frame_ms: u32,
}

/// Arguments for the diarize command
#[derive(Parser, Debug, Clone)]
pub struct DiarizeArgs {
    /// Input audio/video file
    pub input: PathBuf,

    /// Print intervals as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Ceiling on the number of speakers to distinguish
    #[arg(long, default_value = "2")]
    pub max_speakers: usize,

    /// VAD frame duration in milliseconds (10, 20, or 30)
    #[arg(long, default_value = "30")]
    pub frame_ms: u32,
}

/// Subtitle format argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormatArg {
    /// SubRip subtitles
    Srt,
    /// Advanced SubStation Alpha subtitles
    Ass,
}

impl From<SubtitleFormatArg> for SubtitleFormat {
    fn from(arg: SubtitleFormatArg) -> Self {
        match arg {
            SubtitleFormatArg::Srt => Self::Srt,
            SubtitleFormatArg::Ass => Self::Ass,
        }
    }
}
