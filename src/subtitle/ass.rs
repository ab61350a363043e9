//! ASS serialization
//!
//! Advanced SubStation Alpha: a fixed script-info + default-style header
//! followed by one `Dialogue:` line per entry. The speaker tag goes in the
//! Name field rather than inline in the text, and timestamps use
//! centisecond precision with no leading zero on hours (`H:MM:SS.cc`).

use std::fmt::Write;

use super::SubtitleEntry;

/// Fixed ASS header: script info plus a single default style
pub const ASS_HEADER: &str = "[Script Info]\nScriptType: v4.00+\n\n\
[V4+ Styles]\n\
Format: Name,Fontname,Fontsize,PrimaryColour,SecondaryColour,OutlineColour,\
BackColour,Bold,Italic,Underline,StrikeOut,ScaleX,ScaleY,Spacing,Angle,\
BorderStyle,Outline,Shadow,Alignment,MarginL,MarginR,MarginV,Encoding\n\
Style: Default,Arial,40,&H00FFFFFF,&H0000FFFF,&H00000000,&H64000000,-1,0,\
0,0,100,100,0,0,1,2,0,2,10,10,10,1\n\n\
[Events]\n\
Format: Layer,Start,End,Style,Name,MarginL,MarginR,MarginV,Effect,Text";

/// Format subtitle entries as ASS text.
///
/// The speaker tag is 1-based for display (`S1` for label 0). Lines are
/// joined with `\n`; no trailing newline after the last Dialogue line.
#[must_use]
pub fn format_ass(entries: &[SubtitleEntry]) -> String {
    let mut output = String::from(ASS_HEADER);

    for entry in entries {
        output.push('\n');
        write!(
            output,
            "Dialogue: 0,{},{},Default,S{},0,0,0,,{}",
            format_timestamp_ass(entry.start),
            format_timestamp_ass(entry.end),
            entry.speaker + 1,
            entry.text
        )
        .ok();
    }

    output
}

/// Format a timestamp for ASS (`H:MM:SS.cc`).
///
/// Hours carry no leading zero; seconds are rendered with centisecond
/// precision, rounded.
#[must_use]
pub fn format_timestamp_ass(seconds: f32) -> String {
    let t = f64::from(seconds);
    let hours = (t / 3600.0).floor() as u64;
    let rem = t - hours as f64 * 3600.0;
    let mins = (rem / 60.0).floor() as u64;
    let secs = rem - mins as f64 * 60.0;

    format!("{hours}:{mins:02}:{secs:05.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: usize, start: f32, end: f32, speaker: usize, text: &str) -> SubtitleEntry {
        SubtitleEntry {
            index,
            start,
            end,
            speaker,
            text: text.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Timestamp tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_format_timestamp_ass_minute_boundary() {
        assert_eq!(format_timestamp_ass(65.5), "0:01:05.50");
    }

    #[test]
    fn test_format_timestamp_ass_hours_without_leading_zero() {
        assert_eq!(format_timestamp_ass(3661.2), "1:01:01.20");
    }

    #[test]
    fn test_format_timestamp_ass_zero() {
        assert_eq!(format_timestamp_ass(0.0), "0:00:00.00");
    }

    #[test]
    fn test_format_timestamp_ass_centiseconds() {
        assert_eq!(format_timestamp_ass(0.25), "0:00:00.25");
        assert_eq!(format_timestamp_ass(12.34), "0:00:12.34");
    }

    // -------------------------------------------------------------------------
    // Entry formatting tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_format_ass_header_block() {
        let ass = format_ass(&[]);
        assert!(ass.starts_with("[Script Info]\nScriptType: v4.00+\n"));
        assert!(ass.contains("[V4+ Styles]\n"));
        assert!(ass.contains("Style: Default,Arial,40,&H00FFFFFF,"));
        assert!(ass.ends_with(
            "Format: Layer,Start,End,Style,Name,MarginL,MarginR,MarginV,Effect,Text"
        ));
    }

    #[test]
    fn test_format_ass_dialogue_line() {
        let entries = [entry(1, 0.0, 1.5, 0, "hello there")];
        let ass = format_ass(&entries);
        assert!(ass.ends_with("Dialogue: 0,0:00:00.00,0:00:01.50,Default,S1,0,0,0,,hello there"));
    }

    #[test]
    fn test_format_ass_speaker_in_name_field() {
        let entries = [entry(1, 0.0, 1.0, 1, "line")];
        let ass = format_ass(&entries);
        // Speaker tag sits in the Name field, not in the text
        assert!(ass.contains(",Default,S2,0,0,0,,line"));
        assert!(!ass.contains("<S2>"));
    }

    #[test]
    fn test_format_ass_one_dialogue_line_per_entry() {
        let entries = [
            entry(1, 0.0, 1.0, 0, "one"),
            entry(2, 1.0, 2.0, 1, "two"),
        ];
        let ass = format_ass(&entries);
        assert_eq!(ass.matches("Dialogue: 0,").count(), 2);
    }

    #[test]
    fn test_format_ass_no_trailing_newline() {
        let entries = [entry(1, 0.0, 1.0, 0, "end")];
        assert!(!format_ass(&entries).ends_with('\n'));
    }
}
