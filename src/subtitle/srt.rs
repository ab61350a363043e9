//! SRT serialization
//!
//! SubRip format: sequential 1-based index, `HH:MM:SS,mmm --> HH:MM:SS,mmm`
//! timestamps, one `<S{n}>`-tagged text line per entry, entries separated by
//! a blank line.
//!
//! ```text
//! 1
//! 00:00:00,000 --> 00:00:01,234
//! <S1> hello
//!
//! 2
//! 00:00:01,500 --> 00:00:02,000
//! <S1> world
//! ```

use std::fmt::Write;

use super::SubtitleEntry;

/// Format subtitle entries as SRT text.
///
/// The speaker tag is 1-based for display (`<S1>` for label 0). Output ends
/// with a single newline after the last entry.
#[must_use]
pub fn format_srt(entries: &[SubtitleEntry]) -> String {
    let mut output = String::new();

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        writeln!(output, "{}", entry.index).ok();
        writeln!(
            output,
            "{} --> {}",
            format_timestamp_srt(entry.start),
            format_timestamp_srt(entry.end)
        )
        .ok();
        writeln!(output, "<S{}> {}", entry.speaker + 1, entry.text).ok();
    }

    output
}

/// Format a timestamp for SRT (`HH:MM:SS,mmm`).
///
/// Rounds to the nearest millisecond; the comma decimal separator is part of
/// the format.
#[must_use]
pub fn format_timestamp_srt(seconds: f32) -> String {
    let total_ms = (f64::from(seconds) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{hours:02}:{mins:02}:{secs:02},{ms:03}")
}
