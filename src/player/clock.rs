//! Wall-clock playback engine
//!
//! Plays nothing audible: a background task advances a virtual position
//! while "playing" and reports it like a media element would. Useful for
//! following lyrics against an external player or for dry runs.

use super::{MediaSource, PlaybackEngine};
use crate::app::events::{Event, PlayerEvent};
use anyhow::Context;
use std::time::{Duration, Instant};
use tokio::{sync::mpsc, task::JoinHandle, time::MissedTickBehavior};

#[derive(Debug)]
enum ClockCommand {
    Load(MediaSource),
    Play,
    Pause,
    Seek(f64),
}

#[derive(Debug)]
pub struct ClockEngine {
    cmd_tx: mpsc::Sender<ClockCommand>,
    task: JoinHandle<()>,
}

impl ClockEngine {
    pub fn spawn(event_tx: mpsc::Sender<Event>, tick: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let task = tokio::spawn(run_clock(cmd_rx, event_tx, tick));
        Self { cmd_tx, task }
    }

    async fn command(&self, cmd: ClockCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .ok()
            .context("playback clock stopped")
    }
}

impl PlaybackEngine for ClockEngine {
    async fn load(&self, source: MediaSource) -> anyhow::Result<()> {
        self.command(ClockCommand::Load(source)).await
    }

    async fn play(&self) -> anyhow::Result<()> {
        self.command(ClockCommand::Play).await
    }

    async fn pause(&self) -> anyhow::Result<()> {
        self.command(ClockCommand::Pause).await
    }

    async fn seek(&self, seconds: f64) -> anyhow::Result<()> {
        self.command(ClockCommand::Seek(seconds)).await
    }
}

impl Drop for ClockEngine {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_clock(
    mut cmd_rx: mpsc::Receiver<ClockCommand>,
    event_tx: mpsc::Sender<Event>,
    tick: Duration,
) {
    let mut clock = Clock::default();
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let events = tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => clock.apply(cmd, Instant::now()),
                None => break,
            },
            _ = interval.tick() => clock.advance(Instant::now()),
        };

        for ev in events {
            if event_tx.send(Event::Player(ev)).await.is_err() {
                return;
            }
        }
    }
}

#[derive(Debug, Default)]
struct Clock {
    duration: Option<f64>,
    position: f64,
    playing: bool,
    last_tick: Option<Instant>,
}

impl Clock {
    fn apply(&mut self, cmd: ClockCommand, now: Instant) -> Vec<PlayerEvent> {
        match cmd {
            ClockCommand::Load(source) => {
                self.position = 0.0;
                self.playing = false;
                self.last_tick = None;
                match source.duration_secs.filter(|d| d.is_finite() && *d > 0.0) {
                    Some(d) => {
                        self.duration = Some(d);
                        vec![
                            PlayerEvent::Duration { seconds: d },
                            PlayerEvent::Position { seconds: 0.0 },
                        ]
                    }
                    None => {
                        self.duration = None;
                        vec![PlayerEvent::Error(format!(
                            "unknown duration for {}",
                            source.url
                        ))]
                    }
                }
            }
            ClockCommand::Play => {
                let Some(duration) = self.duration else {
                    return vec![PlayerEvent::Error("nothing loaded".into())];
                };
                if self.position >= duration {
                    self.position = 0.0;
                }
                self.playing = true;
                self.last_tick = Some(now);
                vec![PlayerEvent::Started]
            }
            ClockCommand::Pause => {
                if self.duration.is_none() {
                    return Vec::new();
                }
                self.advance(now);
                self.playing = false;
                self.last_tick = None;
                vec![PlayerEvent::Paused]
            }
            ClockCommand::Seek(seconds) => {
                let Some(duration) = self.duration else {
                    return Vec::new();
                };
                self.position = seconds.clamp(0.0, duration);
                if self.playing {
                    self.last_tick = Some(now);
                }
                vec![PlayerEvent::Position {
                    seconds: self.position,
                }]
            }
        }
    }

    fn advance(&mut self, now: Instant) -> Vec<PlayerEvent> {
        let (Some(duration), Some(last)) = (self.duration, self.last_tick) else {
            return Vec::new();
        };
        if !self.playing {
            return Vec::new();
        }

        self.position += now.saturating_duration_since(last).as_secs_f64();
        self.last_tick = Some(now);

        if self.position >= duration {
            self.position = duration;
            self.playing = false;
            self.last_tick = None;
            return vec![
                PlayerEvent::Position { seconds: duration },
                PlayerEvent::Ended,
            ];
        }
        vec![PlayerEvent::Position {
            seconds: self.position,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(duration: Option<f64>) -> MediaSource {
        MediaSource {
            url: "mem://track".into(),
            duration_secs: duration,
        }
    }

    #[test]
    fn test_clock_load_and_play() {
        let t0 = Instant::now();
        let mut clock = Clock::default();

        let events = clock.apply(ClockCommand::Load(source(Some(2.0))), t0);
        assert_eq!(
            events,
            vec![
                PlayerEvent::Duration { seconds: 2.0 },
                PlayerEvent::Position { seconds: 0.0 }
            ]
        );
        assert!(clock.advance(t0 + Duration::from_millis(500)).is_empty());

        assert_eq!(clock.apply(ClockCommand::Play, t0), vec![PlayerEvent::Started]);
        assert_eq!(
            clock.advance(t0 + Duration::from_millis(500)),
            vec![PlayerEvent::Position { seconds: 0.5 }]
        );
        assert_eq!(
            clock.advance(t0 + Duration::from_millis(2500)),
            vec![PlayerEvent::Position { seconds: 2.0 }, PlayerEvent::Ended]
        );
        assert!(clock.advance(t0 + Duration::from_millis(3000)).is_empty());
    }

    #[test]
    fn test_clock_pause_holds_position() {
        let t0 = Instant::now();
        let mut clock = Clock::default();
        clock.apply(ClockCommand::Load(source(Some(10.0))), t0);
        clock.apply(ClockCommand::Play, t0);

        let events = clock.apply(ClockCommand::Pause, t0 + Duration::from_secs(1));
        assert_eq!(events, vec![PlayerEvent::Paused]);
        assert!(clock.advance(t0 + Duration::from_secs(5)).is_empty());
        assert_eq!(clock.position, 1.0);
    }

    #[test]
    fn test_clock_seek_clamps() {
        let t0 = Instant::now();
        let mut clock = Clock::default();
        clock.apply(ClockCommand::Load(source(Some(10.0))), t0);

        assert_eq!(
            clock.apply(ClockCommand::Seek(42.0), t0),
            vec![PlayerEvent::Position { seconds: 10.0 }]
        );
        assert_eq!(
            clock.apply(ClockCommand::Seek(-3.0), t0),
            vec![PlayerEvent::Position { seconds: 0.0 }]
        );
    }

    #[test]
    fn test_clock_without_duration_errors() {
        let t0 = Instant::now();
        let mut clock = Clock::default();
        assert!(matches!(
            clock.apply(ClockCommand::Load(source(None)), t0).as_slice(),
            [PlayerEvent::Error(_)]
        ));
        assert!(matches!(
            clock.apply(ClockCommand::Play, t0).as_slice(),
            [PlayerEvent::Error(_)]
        ));
    }

    #[tokio::test]
    async fn test_clock_engine_reaches_end() {
        let (tx, mut rx) = mpsc::channel(64);
        let engine = ClockEngine::spawn(tx, Duration::from_millis(5));
        engine.load(source(Some(0.05))).await.unwrap();
        engine.play().await.unwrap();

        let ended = tokio::time::timeout(Duration::from_secs(2), async {
            while let Some(Event::Player(ev)) = rx.recv().await {
                if ev == PlayerEvent::Ended {
                    return true;
                }
            }
            false
        })
        .await
        .unwrap();
        assert!(ended);
    }
}
