pub mod client;
pub mod models;

pub use client::MusicApiClient;
pub use models::{MusicExtra, Track};
