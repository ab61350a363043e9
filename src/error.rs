//! Error types for voxtitle

use thiserror::Error;

/// Result type alias for voxtitle operations
pub type VoxResult<T> = Result<T, VoxError>;

/// Errors that can occur while building speaker-tagged subtitles
#[derive(Debug, Error)]
pub enum VoxError {
    /// Invalid audio data or parameters
    #[error("audio error: {0}")]
    Audio(String),

    /// External transcoder (ffmpeg) failure
    #[error("transcode error: {0}")]
    Transcode(String),

    /// Voice activity classification error
    #[error("vad error: {0}")]
    Vad(String),

    /// Speaker embedding extraction error
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Speaker diarization error
    #[error("diarization error: {0}")]
    Diarization(String),

    /// Transcript input error
    #[error("transcript error: {0}")]
    Transcript(String),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
