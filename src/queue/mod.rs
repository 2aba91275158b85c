use crate::api::models::Track;
use crate::app::state::PlayMode;
use rand::Rng;

/// Ordered, id-unique list of tracks queued for playback
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire playlist, keeping the first of any repeated ids
    #[allow(dead_code)]
    pub fn set(&mut self, tracks: Vec<Track>) {
        self.tracks.clear();
        self.append(tracks);
    }

    /// Add tracks to the end, skipping ids already present
    pub fn append(&mut self, tracks: Vec<Track>) {
        for track in tracks {
            if !self.contains(&track.id) {
                self.tracks.push(track);
            }
        }
    }

    /// Add tracks to the front, skipping ids already present.
    ///
    /// Each new track goes in front of the previous one, so the batch ends
    /// up reversed ahead of the existing tracks.
    pub fn prepend(&mut self, tracks: Vec<Track>) {
        for track in tracks {
            if !self.contains(&track.id) {
                self.tracks.insert(0, track);
            }
        }
    }

    /// Remove the first track matching each id, returning how many went
    pub fn remove(&mut self, ids: &[&str]) -> usize {
        let mut removed = 0;
        for id in ids {
            if let Some(index) = self.position(id) {
                self.tracks.remove(index);
                removed += 1;
            }
        }
        removed
    }

    /// Clear the entire playlist
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Get all tracks in the playlist
    #[allow(dead_code)]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index to play after `current`.
    ///
    /// Random mode may pick `current` again. Other modes step forward and
    /// wrap to the start; single mode only repeats on natural end of track,
    /// which the caller handles.
    pub fn next_index<R: Rng + ?Sized>(
        &self,
        current: Option<usize>,
        mode: PlayMode,
        rng: &mut R,
    ) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }

        if mode == PlayMode::Random {
            return Some(rng.random_range(0..self.tracks.len()));
        }

        match current {
            Some(i) if i + 1 < self.tracks.len() => Some(i + 1),
            _ => Some(0),
        }
    }

    /// Index to play before `current`, wrapping to the end
    pub fn previous_index(&self, current: Option<usize>) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }

        match current {
            Some(i) if i > 0 && i <= self.tracks.len() => Some(i - 1),
            _ => Some(self.tracks.len() - 1),
        }
    }
}
