//! Lyric text parsers
//!
//! Two encodings are understood:
//!
//! Line-timed lyrics (plain and translation):
//! [mm:ss.xx]Lyrics line here
//!
//! Word-timed lyrics (karaoke and romanization):
//! [lineStart,lineDuration]word(start,duration)word(start,duration)
//!
//! Example:
//! [00:12.34]Hello world
//! [12340,1500]Hel(12340,500)lo(12840,1000)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static LRC_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([0-9]{2}):([0-9]{2})\.([0-9]{2})\](.*)").expect("compile LRC_LINE_REGEX")
});

static WORD_LINE_HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([0-9]+),([0-9]+)\]").expect("compile WORD_LINE_HEADER_REGEX"));

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(.+?)\(([0-9]+),([0-9]+)\)").expect("compile WORD_REGEX")
});

static TIME_ANNOTATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[0-9]+,[0-9]+\]").expect("compile TIME_ANNOTATION_REGEX"));

/// A single line of lyrics with timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimedLyricLine {
    /// Timestamp in milliseconds from start
    pub time: u64,
    /// The lyrics text, trimmed and never empty
    pub text: String,
}

/// One word (or character group) of a word-timed line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricWord {
    #[serde(rename = "char")]
    pub text: String,
    pub start_time: u64,
    pub duration: u64,
    pub end_time: u64,
}

/// A line of word-timed lyrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordTimedLine {
    /// `"{index}-{start_time}"`, unique within one parse
    pub id: String,
    pub start_time: u64,
    pub duration: u64,
    pub end_time: u64,
    pub words: Vec<LyricWord>,
}

impl WordTimedLine {
    /// All word texts joined in order
    pub fn text(&self) -> String {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }
}

/// Parse `[mm:ss.xx]text` lines.
///
/// Lines without a timestamp or with blank text are skipped. Only the first
/// timestamp of a line is read; anything after it is text.
pub fn parse_lrc(content: &str) -> Vec<TimedLyricLine> {
    content.split('\n').filter_map(parse_lrc_line).collect()
}

fn parse_lrc_line(line: &str) -> Option<TimedLyricLine> {
    let caps = LRC_LINE_REGEX.captures(line)?;
    let minutes: u64 = caps[1].parse().ok()?;
    let seconds: u64 = caps[2].parse().ok()?;
    let hundredths: u64 = caps[3].parse().ok()?;

    let text = caps[4].trim();
    if text.is_empty() {
        return None;
    }

    Some(TimedLyricLine {
        time: minutes * 60_000 + seconds * 1000 + hundredths * 10,
        text: text.to_string(),
    })
}

/// Parse word-timed lyric lines.
///
/// Blank lines are dropped before numbering, so a line's id reflects its
/// position among non-blank lines even when earlier lines had no header.
pub fn parse_word_timed(content: &str) -> Vec<WordTimedLine> {
    content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .filter_map(|(index, line)| parse_word_timed_line(index, line))
        .collect()
}

fn parse_word_timed_line(index: usize, line: &str) -> Option<WordTimedLine> {
    let header = WORD_LINE_HEADER_REGEX.captures(line)?;
    let start_time: u64 = header[1].parse().ok()?;
    let duration: u64 = header[2].parse().ok()?;
    let end_time = start_time.checked_add(duration)?;

    let words = WORD_REGEX
        .captures_iter(line)
        .filter_map(|caps| {
            let start_time: u64 = caps[2].parse().ok()?;
            let duration: u64 = caps[3].parse().ok()?;
            Some(LyricWord {
                text: TIME_ANNOTATION_REGEX.replace_all(&caps[1], "").into_owned(),
                start_time,
                duration,
                end_time: start_time.checked_add(duration)?,
            })
        })
        .collect();

    Some(WordTimedLine {
        id: format!("{index}-{start_time}"),
        start_time,
        duration,
        end_time,
        words,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lrc_time() {
        let parsed = parse_lrc("[01:02.50]Hello");
        assert_eq!(
            parsed,
            vec![TimedLyricLine {
                time: 62_500,
                text: "Hello".into()
            }]
        );
    }

    #[test]
    fn test_parse_lrc_skips_blank_and_untimed() {
        let lrc = r#"
[ti:Test Song]
[00:10.00]
[00:11.00]
[00:12.34] First line
not a lyric
[00:15.00]Second line
"#;
        let parsed = parse_lrc(lrc);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].time, 12_340);
        assert_eq!(parsed[0].text, "First line");
        assert_eq!(parsed[1].time, 15_000);
    }

    #[test]
    fn test_parse_lrc_requires_two_digit_fraction() {
        assert!(parse_lrc("[00:12.345]three digits").is_empty());
        assert!(parse_lrc("[0:12.34]one digit minute").is_empty());
    }

    #[test]
    fn test_parse_lrc_reads_first_timestamp_only() {
        let parsed = parse_lrc("[00:01.00][00:02.00]repeat");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].time, 1000);
        assert_eq!(parsed[0].text, "[00:02.00]repeat");
    }

    #[test]
    fn test_parse_lrc_crlf() {
        let parsed = parse_lrc("[00:00.00]Line1\r\n[00:05.00]Line2\r\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].text, "Line2");
    }

    #[test]
    fn test_parse_lrc_empty() {
        assert!(parse_lrc("").is_empty());
    }

    #[test]
    fn test_parse_word_timed() {
        let yrc = "[1000,1500]Hel(1000,500)lo(1500,1000)\n[3000,500]world(3000,500)";
        let parsed = parse_word_timed(yrc);
        assert_eq!(parsed.len(), 2);

        let first = &parsed[0];
        assert_eq!(first.id, "0-1000");
        assert_eq!(first.start_time, 1000);
        assert_eq!(first.end_time, 2500);
        assert_eq!(first.words.len(), 2);
        assert_eq!(first.words[0].text, "Hel");
        assert_eq!(first.words[0].end_time, 1500);
        assert_eq!(first.words[1].text, "lo");
        assert_eq!(first.text(), "Hello");

        assert_eq!(parsed[1].id, "1-3000");
    }

    #[test]
    fn test_parse_word_timed_ids_count_headerless_lines() {
        let yrc = "{\"t\":0,\"c\":[]}\n\n   \n[2000,100]a(2000,100)";
        let parsed = parse_word_timed(yrc);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "1-2000");
    }

    #[test]
    fn test_parse_word_timed_keeps_spaces_in_words() {
        let parsed = parse_word_timed("[0,900]I (0,300)am (300,300)here(600,300)");
        let words: Vec<&str> = parsed[0].words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(words, vec!["I ", "am ", "here"]);
    }

    #[test]
    fn test_parse_word_timed_empty() {
        assert!(parse_word_timed("").is_empty());
        assert!(parse_word_timed("\n\n").is_empty());
    }

    #[test]
    fn test_parse_word_timed_drops_overflowing_times() {
        let yrc = "[18446744073709551615,1]a(0,1)\n[0,10]b(18446744073709551615,5)c(5,5)";
        let parsed = parse_word_timed(yrc);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "1-0");
        assert_eq!(parsed[0].end_time, 10);
        assert_eq!(parsed[0].text(), "c");
    }
}
