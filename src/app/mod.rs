pub mod actions;
pub mod events;
pub mod state;

use crate::api::{MusicApiClient, Track};
use crate::config::Config;
use crate::lyrics;
use crate::player::{MediaSource, PlaybackEngine};
use crate::view;
use actions::Action;
use events::{Event, NetworkEvent, PlayerEvent};
use state::{PlayMode, PlaybackPhase, PlayerState};
use tokio::sync::mpsc;

pub struct App<E: PlaybackEngine> {
    cfg: Config,
    state: PlayerState,
    engine: E,
    api: Option<MusicApiClient>,
    tx: mpsc::Sender<Event>,

    /// Bumped on every selection; detail responses for older ones are dropped.
    detail_request: u64,
    tracks_finished: usize,
    max_tracks: Option<usize>,
    rendered_line: Option<usize>,
    rendered_phase: PlaybackPhase,
    should_quit: bool,
}

impl<E: PlaybackEngine> App<E> {
    pub fn new(
        cfg: Config,
        engine: E,
        api: Option<MusicApiClient>,
        tx: mpsc::Sender<Event>,
    ) -> Self {
        let state = PlayerState::new(cfg.player.play_mode);
        Self {
            cfg,
            state,
            engine,
            api,
            tx,
            detail_request: 0,
            tracks_finished: 0,
            max_tracks: None,
            rendered_line: None,
            rendered_phase: PlaybackPhase::Idle,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    /// Stop the loop once this many tracks have played to the end
    pub fn quit_after(&mut self, tracks: usize) {
        self.max_tracks = Some(tracks);
    }

    pub async fn run(&mut self, mut rx: mpsc::Receiver<Event>) -> anyhow::Result<()> {
        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(action) => self.handle_action(action).await,
                Event::Player(pe) => self.handle_player(pe).await,
                Event::Network(ne) => self.handle_network(ne).await,
            }

            if self.should_quit {
                break;
            }

            self.draw();
        }

        Ok(())
    }

    fn draw(&mut self) {
        let phase = self.state.phase();
        if phase != self.rendered_phase {
            self.rendered_phase = phase;
            let title = self.state.playing_track().map(Track::display_title);
            tracing::info!(?phase, track = ?title, "playback");
        }

        if let Some(line) = self.take_changed_line() {
            println!("{line}");
        }
    }

    /// Active line to print, if it changed since the last call
    fn take_changed_line(&mut self) -> Option<String> {
        let active = self.state.active_lyric_index();
        if active == self.rendered_line {
            return None;
        }
        self.rendered_line = active;
        view::render_active_line(&self.state)
    }

    /// Make `track` the playing track.
    ///
    /// Tracks that already carry their lyric payload start right away;
    /// others are fetched first when an API client is configured.
    pub async fn select_track(&mut self, track: Track) {
        self.state.reset_playing();
        self.detail_request += 1;
        self.rendered_line = None;
        self.state.set_playing_track(Some(track.clone()));
        tracing::info!(id = %track.id, title = %track.display_title(), "selected track");

        if track.extra.is_none()
            && let Some(api) = self.api.clone()
        {
            self.state.set_loading(true);
            self.spawn_detail_fetch(api, track.id.clone());
            return;
        }
        self.start_track(track).await;
    }

    /// Stop and forget the playing track
    pub async fn clear(&mut self) {
        if let Err(e) = self.engine.pause().await {
            tracing::warn!("pause failed: {e:#}");
        }
        self.detail_request += 1;
        self.state.reset_playing();
        self.state.set_playing_track(None);
    }

    /// Empty the playlist. The playing track keeps going.
    pub fn clear_playlist(&mut self) {
        if self.state.playlist().is_empty() {
            tracing::debug!("playlist already empty");
            return;
        }
        self.state.playlist_mut().clear();
        self.state.set_playing_index(None);
        tracing::info!("playlist cleared");
    }

    pub async fn play_or_pause(&mut self) {
        if self.state.playing_track().is_none() {
            tracing::warn!("no track to play");
            return;
        }

        if self.state.is_playing() {
            if let Err(e) = self.engine.pause().await {
                tracing::warn!("pause failed: {e:#}");
            }
            self.state.set_playing(false);
        } else {
            self.state.set_loading(true);
            if let Err(e) = self.engine.play().await {
                tracing::warn!("play failed: {e:#}");
                self.state.media_failed();
            }
        }
    }

    /// Jump to `seconds` and keep playing from there
    pub async fn seek(&mut self, seconds: f64) {
        self.state.set_play_position(seconds);
        if let Err(e) = self.engine.seek(seconds).await {
            tracing::warn!("seek failed: {e:#}");
        }
        if !self.state.is_playing() {
            if let Err(e) = self.engine.play().await {
                tracing::warn!("play failed: {e:#}");
                return;
            }
            self.state.set_playing(true);
        }
    }

    pub async fn next(&mut self) {
        let len = self.state.playlist().len();
        if len == 0 {
            tracing::warn!("playlist is empty");
            self.clear().await;
            return;
        }
        if len == 1 {
            self.replay().await;
            return;
        }

        let next = self.state.playlist().next_index(
            self.state.playing_index(),
            self.state.play_mode(),
            &mut rand::rng(),
        );
        if let Some(track) = next.and_then(|i| self.state.playlist().get(i)).cloned() {
            self.select_track(track).await;
        }
    }

    pub async fn previous(&mut self) {
        let prev = self
            .state
            .playlist()
            .previous_index(self.state.playing_index());
        match prev.and_then(|i| self.state.playlist().get(i)).cloned() {
            Some(track) => self.select_track(track).await,
            None => tracing::warn!("playlist is empty"),
        }
    }

    pub fn toggle_play_mode(&mut self) -> PlayMode {
        let mode = self.state.cycle_play_mode();
        tracing::info!("{}", mode.label());
        mode
    }

    async fn replay(&mut self) {
        if let Err(e) = self.engine.play().await {
            tracing::warn!("replay failed: {e:#}");
            self.state.media_failed();
        }
    }

    async fn start_track(&mut self, track: Track) {
        if let Some(extra) = &track.extra {
            self.state
                .apply_lyrics(lyrics::format_lyrics(extra.lyric_payload()));
        }

        let Some(url) = track.media_url(&self.cfg.api.static_url) else {
            tracing::warn!(id = %track.id, "track has no media file");
            self.state.set_playing_track(Some(track));
            self.state.media_failed();
            return;
        };

        let source = MediaSource {
            url,
            duration_secs: track.duration,
        };
        self.state.set_playing_track(Some(track));
        self.state.set_loading(true);

        let started = match self.engine.load(source).await {
            Ok(()) => self.engine.play().await,
            Err(e) => Err(e),
        };
        if let Err(e) = started {
            tracing::warn!("unable to play: {e:#}");
            self.state.media_failed();
        }
    }

    fn spawn_detail_fetch(&self, api: MusicApiClient, track_id: String) {
        let request = self.detail_request;
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let event = match api.music_detail(&track_id).await {
                Ok(Some(track)) => NetworkEvent::DetailLoaded { request, track },
                Ok(None) => NetworkEvent::DetailFailed {
                    request,
                    track_id,
                    error: "track not found".into(),
                },
                Err(e) => NetworkEvent::DetailFailed {
                    request,
                    track_id,
                    error: format!("{e:#}"),
                },
            };
            let _ = tx.send(Event::Network(event)).await;
        });
    }

    pub async fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::TogglePause => self.play_or_pause().await,
            Action::Next => self.next().await,
            Action::Previous => self.previous().await,
            Action::TogglePlayMode => {
                let mode = self.toggle_play_mode();
                println!("{}", mode.label());
            }
            Action::Seek(seconds) => self.seek(seconds).await,
            Action::Clear => self.clear().await,
            Action::ClearPlaylist => self.clear_playlist(),
            Action::Remove(id) => {
                if self.state.playlist_mut().remove(&[id.as_str()]) == 0 {
                    tracing::warn!(id = %id, "not in playlist");
                }
                let index = self
                    .state
                    .playing_track()
                    .and_then(|t| self.state.playlist().position(&t.id));
                self.state.set_playing_index(index);
            }
        }
    }

    pub async fn handle_player(&mut self, pe: PlayerEvent) {
        match pe {
            PlayerEvent::Started => {
                self.state.set_playing(true);
                self.state.set_loading(false);
                let index = self
                    .state
                    .playing_track()
                    .and_then(|t| self.state.playlist().position(&t.id));
                self.state.set_playing_index(index);
            }
            PlayerEvent::Paused => self.state.set_playing(false),
            PlayerEvent::Position { seconds } => {
                self.state.set_play_position(seconds);
            }
            PlayerEvent::Duration { seconds } => self.state.set_duration(seconds),
            PlayerEvent::Ended => {
                self.state.set_playing(false);
                self.state.set_play_position(0.0);
                self.tracks_finished += 1;

                if self.max_tracks.is_some_and(|max| self.tracks_finished >= max) {
                    self.should_quit = true;
                    return;
                }

                if self.state.play_mode() == PlayMode::Single {
                    self.replay().await;
                } else {
                    self.next().await;
                }
            }
            PlayerEvent::Error(e) => {
                tracing::warn!("player error: {e}");
                self.state.media_failed();
            }
        }
    }

    pub async fn handle_network(&mut self, ne: NetworkEvent) {
        match ne {
            NetworkEvent::DetailLoaded { request, track } => {
                if request != self.detail_request {
                    tracing::debug!(id = %track.id, "dropping stale track detail");
                    return;
                }
                self.start_track(track).await;
            }
            NetworkEvent::DetailFailed {
                request,
                track_id,
                error,
            } => {
                if request != self.detail_request {
                    return;
                }
                tracing::warn!(id = %track_id, "track detail failed: {error}");
                self.state.media_failed();
            }
        }
    }
}
