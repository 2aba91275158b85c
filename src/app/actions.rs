/// Transport controls a user can trigger
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    TogglePause,
    Next,
    Previous,
    TogglePlayMode,
    Seek(f64),
    Clear,
    ClearPlaylist,
    Remove(String),
}
