/*!
 * Subtitle search provider client.
 *
 * Queries the OpenSubtitles v3 addon endpoint for existing subtitles of a
 * media item. Results carry the provider's own language tags; callers
 * normalize them before comparing against a target language key.
 */

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::content_id::ContentKind;
use crate::errors::SearchError;

/// Default public OpenSubtitles v3 endpoint
const DEFAULT_ENDPOINT: &str = "https://opensubtitles-v3.strem.io";

/// One subtitle the search provider knows about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleCandidate {
    /// Provider-side id of the subtitle
    #[serde(default)]
    pub id: String,
    /// Direct download URL of the subtitle file
    pub url: String,
    /// Language tag as reported by the provider
    pub lang: String,
}

/// Wire shape of the search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    subtitles: Vec<SubtitleCandidate>,
}

/// Search seam the resolution pipeline depends on
#[async_trait]
pub trait SubtitleSearchProvider: Send + Sync {
    /// Search for subtitles of a media item.
    ///
    /// `language_key` is the target the caller is trying to satisfy; the
    /// provider may or may not honor it, so results can come back in any
    /// language.
    async fn search(
        &self,
        kind: ContentKind,
        imdb_id: &str,
        season: u32,
        episode: u32,
        language_key: &str,
    ) -> Result<Vec<SubtitleCandidate>, SearchError>;
}

/// Client for the OpenSubtitles v3 addon API
pub struct OpenSubtitlesClient {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
}

impl OpenSubtitlesClient {
    /// Create a client against the public endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a client against a specific endpoint (for testing or mirrors)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    fn request_url(&self, kind: ContentKind, imdb_id: &str, season: u32, episode: u32) -> String {
        let base = self.endpoint.trim_end_matches('/');
        match kind {
            ContentKind::Series => format!(
                "{}/subtitles/series/{}:{}:{}.json",
                base, imdb_id, season, episode
            ),
            _ => format!("{}/subtitles/movie/{}.json", base, imdb_id),
        }
    }
}

impl Default for OpenSubtitlesClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubtitleSearchProvider for OpenSubtitlesClient {
    async fn search(
        &self,
        kind: ContentKind,
        imdb_id: &str,
        season: u32,
        episode: u32,
        language_key: &str,
    ) -> Result<Vec<SubtitleCandidate>, SearchError> {
        let url = self.request_url(kind, imdb_id, season, episode);
        debug!("Searching subtitles: {} (target {})", url, language_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Subtitle search error ({}): {}", status, message);
            return Err(SearchError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        debug!(
            "Search returned {} candidate(s) for {}",
            parsed.subtitles.len(),
            imdb_id
        );

        Ok(parsed.subtitles)
    }
}
