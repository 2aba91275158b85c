use crate::app::state::PlayerState;

/// `mm:ss`, minutes wrapping every hour
pub fn format_clock(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", (total % 3600) / 60, total % 60)
}

/// One text line for the active lyric, with its translation when shown
pub fn render_active_line(state: &PlayerState) -> Option<String> {
    let line = state.active_lyric()?;
    let mut out = format!("[{}] {}", format_clock(line.time as f64 / 1000.0), line.lyric);

    if let Some(roma) = line.roma.as_deref().filter(|r| !r.trim().is_empty()) {
        out.push_str(&format!("  <{}>", roma.trim()));
    }
    if state.has_translation()
        && let Some(trans) = line.visible_translation()
    {
        out.push_str(&format!("  ({trans})"));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::{LyricPayload, format_lyrics};

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(65.9), "01:05");
        assert_eq!(format_clock(3661.0), "01:01");
        assert_eq!(format_clock(f64::NAN), "00:00");
    }

    #[test]
    fn test_render_active_line() {
        let mut state = PlayerState::default();
        assert_eq!(render_active_line(&state), None);

        state.apply_lyrics(format_lyrics(LyricPayload {
            lyric: Some("[00:00.00]Line1\n[01:05.00]Line2"),
            translation: Some("[00:00.00]//\n[01:05.00]Trans2"),
            ..Default::default()
        }));
        assert_eq!(render_active_line(&state).as_deref(), Some("[00:00] Line1"));

        state.set_play_position(70.0);
        assert_eq!(
            render_active_line(&state).as_deref(),
            Some("[01:05] Line2  (Trans2)")
        );
    }
}
