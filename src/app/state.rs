use crate::api::models::Track;
use crate::lyrics::{self, MergedLyricLine, MergedLyrics};
use crate::queue::Playlist;
use serde::{Deserialize, Serialize};

/// What plays after a track finishes on its own
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    #[default]
    Order,
    Single,
    Random,
}

impl PlayMode {
    pub fn next(self) -> Self {
        match self {
            PlayMode::Order => PlayMode::Single,
            PlayMode::Single => PlayMode::Random,
            PlayMode::Random => PlayMode::Order,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayMode::Order => "Play in order",
            PlayMode::Single => "Repeat one",
            PlayMode::Random => "Shuffle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Loading,
    Playing,
    Paused,
}

/// Player state shared by every surface of the app.
///
/// Owned by [`crate::app::App`]; fields change only through the methods
/// below.
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    playing_track: Option<Track>,
    playlist: Playlist,
    play_mode: PlayMode,

    // Playing track
    position_secs: f64,
    duration_secs: f64,
    playing_index: Option<usize>,
    is_playing: bool,
    is_loading: bool,

    // Lyrics
    lyrics: Vec<MergedLyricLine>,
    active_lyric_index: Option<usize>,
    has_translation: bool,
    has_word_timing: bool,
    has_romanization: bool,
    lyric_lookups: u64,
}

impl PlayerState {
    pub fn new(play_mode: PlayMode) -> Self {
        Self {
            play_mode,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.playing_track.is_none() {
            PlaybackPhase::Idle
        } else if self.is_loading {
            PlaybackPhase::Loading
        } else if self.is_playing {
            PlaybackPhase::Playing
        } else {
            PlaybackPhase::Paused
        }
    }

    pub fn playing_track(&self) -> Option<&Track> {
        self.playing_track.as_ref()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn playlist_mut(&mut self) -> &mut Playlist {
        &mut self.playlist
    }

    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    #[allow(dead_code)]
    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    #[allow(dead_code)]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn playing_index(&self) -> Option<usize> {
        self.playing_index
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[allow(dead_code)]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn lyrics(&self) -> &[MergedLyricLine] {
        &self.lyrics
    }

    pub fn active_lyric_index(&self) -> Option<usize> {
        self.active_lyric_index
    }

    pub fn active_lyric(&self) -> Option<&MergedLyricLine> {
        self.active_lyric_index.and_then(|i| self.lyrics.get(i))
    }

    pub fn has_translation(&self) -> bool {
        self.has_translation
    }

    #[allow(dead_code)]
    pub fn has_word_timing(&self) -> bool {
        self.has_word_timing
    }

    pub fn has_romanization(&self) -> bool {
        self.has_romanization
    }

    /// Number of active-line lookups run so far
    #[allow(dead_code)]
    pub fn lyric_lookups(&self) -> u64 {
        self.lyric_lookups
    }

    /// Set or clear the track being played. Lyrics are left untouched.
    pub fn set_playing_track(&mut self, track: Option<Track>) {
        self.playing_track = track;
    }

    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.play_mode = mode;
    }

    pub fn cycle_play_mode(&mut self) -> PlayMode {
        self.play_mode = self.play_mode.next();
        self.play_mode
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Media reported a failure: stop without leaving a spinner behind
    pub fn media_failed(&mut self) {
        self.is_playing = false;
        self.is_loading = false;
    }

    /// Non-finite or negative durations are stored as zero
    pub fn set_duration(&mut self, secs: f64) {
        self.duration_secs = if secs.is_finite() && secs > 0.0 { secs } else { 0.0 };
    }

    pub fn set_playing_index(&mut self, index: Option<usize>) {
        self.playing_index = index;
    }

    /// Replace every lyric field at once and resolve the line for the
    /// current position.
    pub fn apply_lyrics(&mut self, merged: MergedLyrics) {
        self.lyrics = merged.lines;
        self.has_translation = merged.has_translation;
        self.has_word_timing = merged.has_word_timing;
        self.has_romanization = merged.has_romanization;
        self.resolve_active_lyric();
    }

    /// Record a new playback position and update the active lyric line.
    ///
    /// Returns `false` without doing any work when the position equals the
    /// stored one.
    pub fn set_play_position(&mut self, secs: f64) -> bool {
        if secs == self.position_secs {
            return false;
        }
        self.position_secs = secs;
        self.resolve_active_lyric();
        true
    }

    /// Back to an empty playing-track state. Playlist, mode and the
    /// playing track itself are kept.
    pub fn reset_playing(&mut self) {
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.playing_index = None;
        self.is_playing = false;
        self.is_loading = false;
        self.lyrics.clear();
        self.active_lyric_index = None;
        self.has_translation = false;
        self.has_word_timing = false;
        self.has_romanization = false;
    }

    fn resolve_active_lyric(&mut self) {
        self.lyric_lookups += 1;
        self.active_lyric_index =
            lyrics::active_index(&self.lyrics, self.position_secs, self.has_word_timing);
    }
}
