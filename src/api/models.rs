use crate::lyrics::LyricPayload;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artists: Vec<String>,
    /// Single-artist field some responses carry instead of `artists`
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub file_key: Option<String>,
    /// Length in seconds, when the server knows it
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default, rename = "musicExtra")]
    pub extra: Option<MusicExtra>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicExtra {
    #[serde(default)]
    pub music_lyric: Option<String>,
    #[serde(default)]
    pub music_trans: Option<String>,
    #[serde(default)]
    pub music_yrc: Option<String>,
    #[serde(default)]
    pub music_roma: Option<String>,
    #[serde(default)]
    pub music_cover: Option<String>,
}

impl MusicExtra {
    pub fn lyric_payload(&self) -> LyricPayload<'_> {
        LyricPayload {
            lyric: self.music_lyric.as_deref(),
            translation: self.music_trans.as_deref(),
            romanization: self.music_roma.as_deref(),
            word_timed: self.music_yrc.as_deref(),
        }
    }
}

impl Track {
    /// `"title - artist/artist"` with placeholders for missing parts
    pub fn display_title(&self) -> String {
        let title = self
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Unknown title");
        let artists = if !self.artists.is_empty() {
            self.artists.join("/")
        } else {
            self.artist
                .clone()
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| "Unknown artist".to_string())
        };
        format!("{title} - {artists}")
    }

    /// Playable URL under the static file prefix
    pub fn media_url(&self, static_url: &str) -> Option<String> {
        let key = self.file_key.as_deref().filter(|k| !k.is_empty())?;
        Some(format!("{static_url}{key}"))
    }
}

/// Response envelope used by every endpoint
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    pub data: Option<T>,
    pub msg: Option<String>,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_accepts_numeric_and_text_ids() {
        let numeric: Track = serde_json::from_str(r#"{"id": 42, "title": "a"}"#).unwrap();
        assert_eq!(numeric.id, "42");

        let text: Track = serde_json::from_str(r#"{"id": "local-1"}"#).unwrap();
        assert_eq!(text.id, "local-1");
        assert!(text.extra.is_none());
    }

    #[test]
    fn test_track_detail_with_extra() {
        let raw = r#"{
            "code": 0,
            "data": {
                "id": 7,
                "title": "Song",
                "artists": ["A", "B"],
                "file_key": "music/7.mp3",
                "musicExtra": {
                    "music_lyric": "[00:00.00]hi",
                    "music_trans": null,
                    "music_cover": "cover/7.jpg"
                }
            }
        }"#;
        let resp: ApiResponse<Track> = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.code, 0);

        let track = resp.data.unwrap();
        assert_eq!(track.display_title(), "Song - A/B");
        assert_eq!(
            track.media_url("https://cdn.example/").as_deref(),
            Some("https://cdn.example/music/7.mp3")
        );

        let payload = track.extra.as_ref().unwrap().lyric_payload();
        assert_eq!(payload.lyric, Some("[00:00.00]hi"));
        assert_eq!(payload.translation, None);
    }

    #[test]
    fn test_display_title_fallbacks() {
        let track = Track {
            id: "1".into(),
            artist: Some("Solo".into()),
            ..Default::default()
        };
        assert_eq!(track.display_title(), "Unknown title - Solo");
        assert_eq!(track.media_url("x/"), None);
    }
}
