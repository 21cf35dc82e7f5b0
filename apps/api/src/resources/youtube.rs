//! YouTube Data API v3 search.
//!
//! Video lookups are best-effort: a missing key, HTTP failure or odd payload yields
//! no videos rather than an error, so enrichment never fails the surrounding request.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
const VIDEOS_PER_SKILL: u32 = 4;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube API returned {0}")]
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeVideo {
    pub title: String,
    pub channel: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(
        default,
        rename = "publishedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<String>,
}

/// Videos found for one skill.
#[derive(Debug, Clone, Serialize)]
pub struct SkillVideos {
    pub skill: String,
    pub videos: Vec<YouTubeVideo>,
}

/// Video search backend. Carried in `AppState` as `Arc<dyn VideoSearch>`.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Returns up to `max_results` videos; never fails.
    async fn search(&self, query: &str, max_results: u32) -> Vec<YouTubeVideo>;

    /// False when searches can never return anything (no API key configured).
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Search query used for roadmap enrichment.
pub fn course_query(skill: &str) -> String {
    format!("Learn {skill} full course")
}

/// Search query used for the per-skill resource lists.
pub fn tutorial_query(skill: &str) -> String {
    format!("{skill} tutorial programming")
}

/// Searches tutorials for every skill concurrently. Output order follows `skills`.
pub async fn resources_for_skills(search: &dyn VideoSearch, skills: &[String]) -> Vec<SkillVideos> {
    let lookups = skills.iter().map(|skill| async move {
        SkillVideos {
            skill: skill.clone(),
            videos: search.search(&tutorial_query(skill), VIDEOS_PER_SKILL).await,
        }
    });
    join_all(lookups).await
}

// ────────────────────────────────────────────────────────────────────────────
// YouTube Data API backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

impl From<SearchResponse> for Vec<YouTubeVideo> {
    fn from(response: SearchResponse) -> Self {
        response
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(YouTubeVideo {
                    title: item.snippet.title,
                    channel: item.snippet.channel_title,
                    url: format!("{WATCH_URL_PREFIX}{video_id}"),
                    thumbnail: item
                        .snippet
                        .thumbnails
                        .and_then(|t| t.default)
                        .and_then(|t| t.url),
                    published_at: item.snippet.published_at,
                })
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self, YouTubeError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(15)).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn try_search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<YouTubeVideo>, YouTubeError> {
        let max_results = max_results.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(YouTubeError::Status(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.into())
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(&self, query: &str, max_results: u32) -> Vec<YouTubeVideo> {
        match self.try_search(query, max_results).await {
            Ok(videos) => {
                debug!("YouTube search '{query}' returned {} videos", videos.len());
                videos
            }
            Err(e) => {
                warn!("YouTube search '{query}' failed: {e}");
                vec![]
            }
        }
    }
}

/// Used when `YOUTUBE_API_KEY` is not configured.
pub struct DisabledVideoSearch;

#[async_trait]
impl VideoSearch for DisabledVideoSearch {
    async fn search(&self, _query: &str, _max_results: u32) -> Vec<YouTubeVideo> {
        vec![]
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Returns one canned video per query, titled after the query.
    pub struct EchoVideoSearch;

    #[async_trait]
    impl VideoSearch for EchoVideoSearch {
        async fn search(&self, query: &str, _max_results: u32) -> Vec<YouTubeVideo> {
            vec![YouTubeVideo {
                title: query.to_string(),
                channel: "Test Channel".to_string(),
                url: format!("{WATCH_URL_PREFIX}abc123"),
                thumbnail: None,
                published_at: None,
            }]
        }
    }
}
