use super::actions::Action;
use crate::api::models::Track;

#[derive(Debug, Clone)]
pub enum Event {
    Input(Action),
    Player(PlayerEvent),
    Network(NetworkEvent),
}

/// Media element notifications
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Started,
    Paused,
    Position { seconds: f64 },
    Duration { seconds: f64 },
    Ended,
    Error(String),
}

#[derive(Debug, Clone)]
pub enum NetworkEvent {
    /// Detail fetch finished. `request` identifies the selection it was made
    /// for.
    DetailLoaded { request: u64, track: Track },
    DetailFailed { request: u64, track_id: String, error: String },
}
