//! Lyric merging
//!
//! Plain lines drive the result: one merged line per plain line. Translations
//! are matched by exact timestamp, while word timing and romanization are
//! attached by position in their own sequences.

use super::parser::{LyricWord, TimedLyricLine, WordTimedLine};
use serde::Serialize;
use std::collections::HashMap;

/// Translation texts that are translator credits rather than lyrics
const HIDDEN_TRANSLATION_MARKERS: [&str; 2] = ["//", "本翻译作品"];

/// A display-ready lyric line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedLyricLine {
    /// Plain lyric timestamp in milliseconds
    pub time: u64,
    pub lyric: String,
    /// Translation at the same timestamp, empty when there is none
    pub trans: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<LyricWord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roma: Option<String>,
}

impl MergedLyricLine {
    /// Translation to show under the lyric, if any
    pub fn visible_translation(&self) -> Option<&str> {
        if self.trans.is_empty()
            || HIDDEN_TRANSLATION_MARKERS
                .iter()
                .any(|marker| self.trans.contains(marker))
        {
            return None;
        }
        Some(&self.trans)
    }

    fn apply_word_timing(&mut self, line: &WordTimedLine) {
        self.id = Some(line.id.clone());
        self.start_time = Some(line.start_time);
        self.duration = Some(line.duration);
        self.end_time = Some(line.end_time);
        self.words = line.words.clone();
    }
}

/// Merged lyrics with presence flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedLyrics {
    pub lines: Vec<MergedLyricLine>,
    pub has_translation: bool,
    pub has_word_timing: bool,
    pub has_romanization: bool,
}

/// Merge the four parsed encodings into one sequence.
///
/// Word timing and romanization are aligned by index with the plain lines;
/// extra entries beyond the plain line count are ignored. Romanization is
/// only attached when word timing is present too.
pub fn merge_lyrics(
    plain: &[TimedLyricLine],
    translation: &[TimedLyricLine],
    romanization: &[WordTimedLine],
    word_timed: &[WordTimedLine],
) -> MergedLyrics {
    let translations: HashMap<u64, &str> = translation
        .iter()
        .map(|line| (line.time, line.text.as_str()))
        .collect();

    let romas: Vec<String> = romanization.iter().map(WordTimedLine::text).collect();

    let mut lines: Vec<MergedLyricLine> = plain
        .iter()
        .map(|line| MergedLyricLine {
            time: line.time,
            lyric: line.text.clone(),
            trans: translations
                .get(&line.time)
                .map(|t| t.to_string())
                .unwrap_or_default(),
            ..Default::default()
        })
        .collect();

    if !word_timed.is_empty() {
        for (merged, timed) in lines.iter_mut().zip(word_timed) {
            merged.apply_word_timing(timed);
        }
        for (merged, roma) in lines.iter_mut().zip(&romas) {
            merged.roma = Some(roma.clone());
        }
    }

    tracing::debug!(
        lines = lines.len(),
        translations = translation.len(),
        word_timed = word_timed.len(),
        romanization = romas.len(),
        "merged lyrics"
    );

    MergedLyrics {
        lines,
        has_translation: !translation.is_empty(),
        has_word_timing: !word_timed.is_empty(),
        has_romanization: !romas.is_empty(),
    }
}
