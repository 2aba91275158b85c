//! Active lyric line lookup

use super::merge::MergedLyricLine;

/// Index of the line playing at `position_secs`.
///
/// Lines are scanned in order and the line before the first one keyed after
/// the position wins; when no line is keyed after it, the last line wins.
/// A line keyed exactly at the position is active. With `word_timing`, lines
/// are keyed by their word-timed start and lines without one never end the
/// scan.
pub fn active_index(
    lines: &[MergedLyricLine],
    position_secs: f64,
    word_timing: bool,
) -> Option<usize> {
    let position_ms = position_secs * 1000.0;

    let first_after = lines.iter().position(|line| {
        let key = if word_timing {
            line.start_time
        } else {
            Some(line.time)
        };
        key.is_some_and(|k| k as f64 > position_ms)
    });

    match first_after {
        Some(i) => i.checked_sub(1),
        None => lines.len().checked_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_at(times: &[u64]) -> Vec<MergedLyricLine> {
        times
            .iter()
            .map(|&time| MergedLyricLine {
                time,
                lyric: format!("at {time}"),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_active_index_boundaries() {
        let lines = lines_at(&[0, 1000, 2000]);
        assert_eq!(active_index(&lines, 0.0, false), Some(0));
        assert_eq!(active_index(&lines, 0.5, false), Some(0));
        assert_eq!(active_index(&lines, 1.0, false), Some(1));
        assert_eq!(active_index(&lines, 2.5, false), Some(2));
        assert_eq!(active_index(&lines, -0.001, false), None);
    }

    #[test]
    fn test_active_index_before_first_line() {
        let lines = lines_at(&[3000, 6000]);
        assert_eq!(active_index(&lines, 1.0, false), None);
        assert_eq!(active_index(&lines, 3.0, false), Some(0));
    }

    #[test]
    fn test_active_index_empty() {
        assert_eq!(active_index(&[], 10.0, false), None);
        assert_eq!(active_index(&[], 10.0, true), None);
    }

    #[test]
    fn test_active_index_uses_word_timing() {
        let mut lines = lines_at(&[0, 1000, 2000]);
        lines[0].start_time = Some(200);
        lines[1].start_time = Some(1500);
        lines[2].start_time = Some(2500);

        assert_eq!(active_index(&lines, 1.2, false), Some(1));
        assert_eq!(active_index(&lines, 1.2, true), Some(0));
        assert_eq!(active_index(&lines, 0.1, true), None);
    }

    #[test]
    fn test_active_index_lines_without_word_timing_are_skipped() {
        let mut lines = lines_at(&[0, 1000, 2000]);
        lines[0].start_time = Some(0);
        lines[1].start_time = Some(1000);

        // The third line has no start time and cannot end the scan.
        assert_eq!(active_index(&lines, 1.5, true), Some(2));
        assert_eq!(active_index(&lines, 0.5, true), Some(0));
    }
}
