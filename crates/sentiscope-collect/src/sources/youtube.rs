//! `YouTube` Data API v3 comment collector.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, Url};
use sentiscope_core::{ItemMetadata, RawItem};
use serde::Deserialize;

use super::{build_client, endpoint, parse_base_url, send_json, PlatformSource};
use crate::error::CollectError;
use crate::YOUTUBE;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
const MAX_VIDEOS: usize = 10;
const MAX_COMMENTS_PER_VIDEO: usize = 20;

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tags regex"));

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct CommentThreadsResponse {
    #[serde(default)]
    items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    id: String,
    snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    #[serde(default)]
    text_display: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    like_count: u64,
}

struct Video {
    id: String,
    title: String,
}

pub struct YoutubeSource {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeSource {
    /// # Errors
    ///
    /// Returns [`CollectError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, CollectError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Point the source at a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Http`] if the HTTP client cannot be built or
    /// [`CollectError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, CollectError> {
        Ok(Self {
            client: build_client(timeout_secs, None)?,
            api_key: api_key.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    async fn search_videos(&self, query: &str, max: usize) -> Result<Vec<Video>, CollectError> {
        let url = endpoint(&self.base_url, "search")?;
        let max_results = max.to_string();
        let request = self.client.get(url).query(&[
            ("part", "id,snippet"),
            ("q", query),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
            ("order", "relevance"),
            ("key", self.api_key.as_str()),
        ]);
        let response: SearchResponse = send_json(request, YOUTUBE, "video search").await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                item.id.video_id.map(|id| Video {
                    id,
                    title: item.snippet.title,
                })
            })
            .collect())
    }

    async fn video_comments(
        &self,
        video: &Video,
        max: usize,
    ) -> Result<Vec<RawItem>, CollectError> {
        let url = endpoint(&self.base_url, "commentThreads")?;
        let max_results = max.to_string();
        let request = self.client.get(url).query(&[
            ("part", "snippet"),
            ("videoId", video.id.as_str()),
            ("maxResults", max_results.as_str()),
            ("order", "relevance"),
            ("key", self.api_key.as_str()),
        ]);
        let response: CommentThreadsResponse =
            send_json(request, YOUTUBE, "comment threads").await?;

        Ok(response
            .items
            .into_iter()
            .map(|thread| to_item(thread, video))
            .collect())
    }
}

#[async_trait]
impl PlatformSource for YoutubeSource {
    fn platform(&self) -> &'static str {
        YOUTUBE
    }

    /// Search matching videos, then gather top-level comments from each
    /// until `limit` comments are collected.
    ///
    /// Videos whose comments cannot be read (usually disabled comments) are
    /// skipped with a warning.
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawItem>, CollectError> {
        let max_videos = (limit / 5).clamp(1, MAX_VIDEOS);
        let videos = self.search_videos(query, max_videos).await?;
        if videos.is_empty() {
            tracing::debug!(query, "no videos found");
            return Ok(Vec::new());
        }

        let per_video = (limit / videos.len()).clamp(1, MAX_COMMENTS_PER_VIDEO);
        let mut comments = Vec::new();

        for video in &videos {
            match self.video_comments(video, per_video).await {
                Ok(items) => comments.extend(items),
                Err(e) => {
                    tracing::warn!(
                        video_id = %video.id,
                        error = %e,
                        "could not fetch comments for video"
                    );
                    continue;
                }
            }
            if comments.len() >= limit {
                break;
            }
        }

        comments.truncate(limit);
        tracing::debug!(
            query,
            videos = videos.len(),
            count = comments.len(),
            "collected YouTube comments"
        );
        Ok(comments)
    }
}

fn to_item(thread: CommentThread, video: &Video) -> RawItem {
    let comment = thread.snippet.top_level_comment.snippet;
    RawItem::new(
        thread.id,
        comment.published_at,
        clean_text(&comment.text_display),
    )
    .with_metadata(ItemMetadata {
        like_count: Some(comment.like_count),
        video_id: Some(video.id.clone()),
        video_title: Some(video.title.clone()),
        video_url: Some(format!("https://www.youtube.com/watch?v={}", video.id)),
        ..ItemMetadata::default()
    })
}

/// Strip HTML tags and common entities from `textDisplay` markup.
fn clean_text(input: &str) -> String {
    let no_tags = TAGS.replace_all(input, " ");
    no_tags
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
