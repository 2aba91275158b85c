//! Music server API client
//!
//! Only the track detail endpoint is used by the player: it returns the
//! track together with its raw lyric strings.

use super::models::{ApiResponse, Track};
use crate::config::ApiConfig;
use anyhow::Context;

/// Music server API client
#[derive(Debug, Clone)]
pub struct MusicApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl MusicApiClient {
    const USER_AGENT: &'static str = concat!("lyricue/", env!("CARGO_PKG_VERSION"));

    pub fn new(cfg: &ApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build http client")?;

        let mut base_url = cfg.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self { client, base_url })
    }

    /// Fetch one track with its lyric payload.
    ///
    /// `Ok(None)` means the server answered but had no such track.
    pub async fn music_detail(&self, id: &str) -> anyhow::Result<Option<Track>> {
        let url = self.detail_url(id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("music detail error: {}", response.status());
        }

        let body: ApiResponse<Track> = response.json().await.context("decode music detail")?;
        if body.code != 0 {
            tracing::warn!(id, code = body.code, msg = ?body.msg, "music detail rejected");
            return Ok(None);
        }
        Ok(body.data)
    }

    fn detail_url(&self, id: &str) -> String {
        format!("{}app/music/{}/detail", self.base_url, urlencoding::encode(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_url() {
        let cfg = ApiConfig {
            base_url: "http://localhost:8080/api".into(),
            ..ApiConfig::default()
        };
        let client = MusicApiClient::new(&cfg).unwrap();
        assert_eq!(
            client.detail_url("12"),
            "http://localhost:8080/api/app/music/12/detail"
        );
        assert_eq!(
            client.detail_url("a b"),
            "http://localhost:8080/api/app/music/a%20b/detail"
        );
    }
}
