//! External transcoding step
//!
//! Arbitrary container/codec input is handed to ffmpeg, which produces the
//! mono WAV the pipeline consumes. The core never parses media containers
//! itself.

use std::path::Path;
use std::process::Command;

use tempfile::TempPath;
use tracing::debug;

use crate::error::{VoxError, VoxResult};

/// Transcode any audio/video file to a mono WAV at the given sample rate.
///
/// Shells out to `ffmpeg -y -i <input> -ac 1 -ar <rate> <out.wav>` with
/// captured stdio. The returned [`TempPath`] deletes the WAV when dropped.
///
/// # Errors
///
/// Returns [`VoxError::Transcode`] when ffmpeg cannot be spawned or exits
/// non-zero; the error carries ffmpeg's stderr.
pub fn to_mono_wav(input: &Path, sample_rate: u32) -> VoxResult<TempPath> {
    let out_path = tempfile::Builder::new()
        .prefix("voxtitle-")
        .suffix(".wav")
        .tempfile()?
        .into_temp_path();

    debug!(input = %input.display(), output = %out_path.display(), sample_rate, "transcoding");

    let output = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(input)
        .arg("-ac")
        .arg("1")
        .arg("-ar")
        .arg(sample_rate.to_string())
        .arg(out_path.as_os_str())
        .output()
        .map_err(|e| VoxError::Transcode(format!("failed to run ffmpeg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VoxError::Transcode(format!(
            "ffmpeg exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(out_path)
}
