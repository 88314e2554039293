//! Reddit search collector (client-credentials OAuth).

use async_trait::async_trait;
use reqwest::{Client, Url};
use sentiscope_core::{ItemMetadata, RawItem};
use serde::Deserialize;

use super::{build_client, endpoint, parse_base_url, send_json, PlatformSource};
use crate::error::CollectError;
use crate::REDDIT;

const DEFAULT_AUTH_BASE_URL: &str = "https://www.reddit.com/";
const DEFAULT_API_BASE_URL: &str = "https://oauth.reddit.com/";
/// Reddit caps listing pages at 100 posts.
const PAGE_LIMIT: usize = 100;
const MAX_TEXT_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    id: String,
    title: Option<String>,
    selftext: Option<String>,
    created_utc: Option<f64>,
    subreddit: Option<String>,
    #[serde(default)]
    score: i64,
    permalink: Option<String>,
}

pub struct RedditSource {
    client: Client,
    client_id: String,
    client_secret: String,
    auth_base_url: Url,
    api_base_url: Url,
}

impl RedditSource {
    /// # Errors
    ///
    /// Returns [`CollectError::Http`] if the HTTP client cannot be built.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        user_agent: &str,
        timeout_secs: u64,
    ) -> Result<Self, CollectError> {
        Self::with_base_urls(
            client_id,
            client_secret,
            user_agent,
            timeout_secs,
            DEFAULT_AUTH_BASE_URL,
            DEFAULT_API_BASE_URL,
        )
    }

    /// Point the token exchange and the search API at custom base URLs
    /// (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Http`] if the HTTP client cannot be built or
    /// [`CollectError::InvalidBaseUrl`] if either base URL does not parse.
    pub fn with_base_urls(
        client_id: &str,
        client_secret: &str,
        user_agent: &str,
        timeout_secs: u64,
        auth_base_url: &str,
        api_base_url: &str,
    ) -> Result<Self, CollectError> {
        Ok(Self {
            client: build_client(timeout_secs, Some(user_agent))?,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            auth_base_url: parse_base_url(auth_base_url)?,
            api_base_url: parse_base_url(api_base_url)?,
        })
    }

    async fn fetch_token(&self) -> Result<String, CollectError> {
        let url = endpoint(&self.auth_base_url, "api/v1/access_token")?;
        let response = self
            .client
            .post(url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CollectError::Auth {
                platform: REDDIT,
                reason: format!("token exchange failed with status {}", response.status()),
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| CollectError::Auth {
            platform: REDDIT,
            reason: format!("token parse error: {e}"),
        })?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl PlatformSource for RedditSource {
    fn platform(&self) -> &'static str {
        REDDIT
    }

    /// Search all subreddits for posts from the last week, by relevance.
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawItem>, CollectError> {
        let token = self.fetch_token().await?;
        let url = endpoint(&self.api_base_url, "r/all/search")?;
        let page_limit = limit.min(PAGE_LIMIT).to_string();

        let request = self.client.get(url).bearer_auth(token).query(&[
            ("q", query),
            ("sort", "relevance"),
            ("t", "week"),
            ("limit", page_limit.as_str()),
            ("raw_json", "1"),
        ]);
        let listing: Listing = send_json(request, REDDIT, "search listing").await?;

        let items: Vec<RawItem> = listing
            .data
            .children
            .into_iter()
            .filter_map(|post| to_item(post.data))
            .take(limit)
            .collect();

        tracing::debug!(query, count = items.len(), "collected Reddit posts");
        Ok(items)
    }
}

/// Title plus body, truncated. Posts without a title are skipped.
fn to_item(post: PostData) -> Option<RawItem> {
    let title = post.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
    let text = match post.selftext.as_deref().map(str::trim) {
        Some(body) if !body.is_empty() => format!("{title} {body}"),
        _ => title.to_string(),
    };
    let text: String = text.chars().take(MAX_TEXT_CHARS).collect();
    let created_at = post.created_utc.map(|t| t.to_string()).unwrap_or_default();

    Some(
        RawItem::new(post.id, created_at, text).with_metadata(ItemMetadata {
            subreddit: post.subreddit,
            score: Some(post.score),
            url: post
                .permalink
                .map(|permalink| format!("https://reddit.com{permalink}")),
            ..ItemMetadata::default()
        }),
    )
}
