//! Playback engines
//!
//! The app drives an engine through [`PlaybackEngine`] and hears back from it
//! only through [`crate::app::events::PlayerEvent`]s on the app channel.

pub mod clock;

pub use clock::ClockEngine;

/// Something an engine can load
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSource {
    pub url: String,
    /// Known length in seconds
    pub duration_secs: Option<f64>,
}

#[allow(async_fn_in_trait)]
pub trait PlaybackEngine {
    /// Replace the current media. Playback stays stopped until [`play`](Self::play).
    async fn load(&self, source: MediaSource) -> anyhow::Result<()>;
    async fn play(&self) -> anyhow::Result<()>;
    async fn pause(&self) -> anyhow::Result<()>;
    async fn seek(&self, seconds: f64) -> anyhow::Result<()>;
}
