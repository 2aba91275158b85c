//! Lyrics module for parsing and synchronizing lyrics
//!
//! This module provides:
//! - Parsers for line-timed and word-timed lyric text
//! - Merging of lyric, translation, word timing and romanization streams
//! - Active line lookup for a playback position

pub mod merge;
pub mod parser;
pub mod tracker;

pub use merge::{MergedLyricLine, MergedLyrics};
pub use tracker::active_index;

/// Raw lyric strings attached to a track
#[derive(Debug, Clone, Copy, Default)]
pub struct LyricPayload<'a> {
    pub lyric: Option<&'a str>,
    pub translation: Option<&'a str>,
    pub romanization: Option<&'a str>,
    pub word_timed: Option<&'a str>,
}

/// Parse every available encoding and merge them
pub fn format_lyrics(payload: LyricPayload<'_>) -> MergedLyrics {
    let plain = parser::parse_lrc(payload.lyric.unwrap_or_default());
    let translation = parser::parse_lrc(payload.translation.unwrap_or_default());
    let romanization = parser::parse_word_timed(payload.romanization.unwrap_or_default());
    let word_timed = parser::parse_word_timed(payload.word_timed.unwrap_or_default());

    merge::merge_lyrics(&plain, &translation, &romanization, &word_timed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lyrics_end_to_end() {
        let merged = format_lyrics(LyricPayload {
            lyric: Some("[00:00.00]Line1\n[00:05.00]Line2"),
            translation: Some("[00:00.00]Trans1\n[00:05.00]Trans2"),
            ..Default::default()
        });

        assert_eq!(merged.lines.len(), 2);
        assert_eq!(merged.lines[0].time, 0);
        assert_eq!(merged.lines[0].lyric, "Line1");
        assert_eq!(merged.lines[0].trans, "Trans1");
        assert_eq!(merged.lines[1].time, 5000);
        assert_eq!(merged.lines[1].trans, "Trans2");
        assert!(merged.has_translation);
        assert!(!merged.has_word_timing);

        let json = serde_json::to_value(&merged.lines).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"time": 0, "lyric": "Line1", "trans": "Trans1"},
                {"time": 5000, "lyric": "Line2", "trans": "Trans2"}
            ])
        );
    }

    #[test]
    fn test_format_lyrics_missing_payload() {
        let merged = format_lyrics(LyricPayload::default());
        assert!(merged.lines.is_empty());
        assert!(!merged.has_translation);
        assert!(!merged.has_word_timing);
        assert!(!merged.has_romanization);
    }

    #[test]
    fn test_format_lyrics_line_count_follows_plain() {
        let merged = format_lyrics(LyricPayload {
            lyric: Some("[00:00.00]a\n[00:01.00]b"),
            translation: Some("[00:00.00]x\n[00:01.00]y\n[00:02.00]z"),
            word_timed: Some("[0,10]a(0,10)\n[1000,10]b(1000,10)\n[2000,10]c(2000,10)"),
            romanization: None,
        });
        assert_eq!(merged.lines.len(), 2);
        assert_eq!(merged.lines[1].start_time, Some(1000));
    }
}
