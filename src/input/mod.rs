use crate::app::actions::Action;
use crate::app::events::Event;
use std::io::BufRead;
use tokio::sync::mpsc;

/// Read transport commands from stdin, one per line.
///
/// Runs on a plain thread so a pending read never holds up runtime shutdown.
pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_command(&line) {
                Some(action) => {
                    if tx.blocking_send(Event::Input(action)).is_err() {
                        break;
                    }
                }
                None if !line.trim().is_empty() => {
                    eprintln!("commands: p(ause) n(ext) b(ack) m(ode) s <secs> r <id> c(lear) cp q(uit)");
                }
                None => {}
            }
        }
    });
}

pub fn parse_command(line: &str) -> Option<Action> {
    let mut parts = line.split_whitespace();
    let action = match parts.next()? {
        "q" | "quit" => Action::Quit,
        "p" | "pause" | "play" => Action::TogglePause,
        "n" | "next" => Action::Next,
        "b" | "prev" | "previous" => Action::Previous,
        "m" | "mode" => Action::TogglePlayMode,
        "c" | "clear" => Action::Clear,
        "cp" | "clear-playlist" => Action::ClearPlaylist,
        "r" | "rm" | "remove" => Action::Remove(parts.next()?.to_string()),
        "s" | "seek" => Action::Seek(parse_seek_target(parts.next()?)?),
        _ => return None,
    };
    Some(action)
}

/// Seconds, or `mm:ss`
fn parse_seek_target(s: &str) -> Option<f64> {
    let secs = match s.split_once(':') {
        Some((m, sec)) => m.parse::<u64>().ok()? as f64 * 60.0 + sec.parse::<f64>().ok()?,
        None => s.parse::<f64>().ok()?,
    };
    (secs.is_finite() && secs >= 0.0).then_some(secs)
}
