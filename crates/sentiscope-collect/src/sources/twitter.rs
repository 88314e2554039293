//! Twitter/X recent search (API v2, app-only bearer token).

use async_trait::async_trait;
use reqwest::{Client, Url};
use sentiscope_core::{ItemMetadata, RawItem};
use serde::Deserialize;

use super::{build_client, endpoint, parse_base_url, send_json, PlatformSource};
use crate::error::CollectError;
use crate::TWITTER;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/";
/// Bounds the recent-search endpoint accepts for `max_results`.
const MIN_RESULTS: usize = 10;
const MAX_RESULTS: usize = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    text: String,
    created_at: Option<String>,
    lang: Option<String>,
    public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Deserialize)]
struct PublicMetrics {
    #[serde(default)]
    retweet_count: u64,
    #[serde(default)]
    like_count: u64,
}

pub struct TwitterSource {
    client: Client,
    bearer_token: String,
    base_url: Url,
}

impl TwitterSource {
    /// # Errors
    ///
    /// Returns [`CollectError::Http`] if the HTTP client cannot be built.
    pub fn new(bearer_token: &str, timeout_secs: u64) -> Result<Self, CollectError> {
        Self::with_base_url(bearer_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Point the source at a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Http`] if the HTTP client cannot be built or
    /// [`CollectError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        bearer_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, CollectError> {
        Ok(Self {
            client: build_client(timeout_secs, None)?,
            bearer_token: bearer_token.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl PlatformSource for TwitterSource {
    fn platform(&self) -> &'static str {
        TWITTER
    }

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawItem>, CollectError> {
        let url = endpoint(&self.base_url, "2/tweets/search/recent")?;
        let max_results = limit.clamp(MIN_RESULTS, MAX_RESULTS).to_string();

        let request = self.client.get(url).bearer_auth(&self.bearer_token).query(&[
            ("query", query),
            ("max_results", max_results.as_str()),
            ("tweet.fields", "created_at,public_metrics,author_id,lang"),
        ]);
        let response: SearchResponse = send_json(request, TWITTER, "recent search").await?;

        let items: Vec<RawItem> = response
            .data
            .into_iter()
            .take(limit)
            .map(to_item)
            .collect();

        tracing::debug!(query, count = items.len(), "collected tweets");
        Ok(items)
    }
}

fn to_item(tweet: Tweet) -> RawItem {
    let metrics = tweet.public_metrics.as_ref();
    RawItem::new(tweet.id, tweet.created_at.unwrap_or_default(), tweet.text).with_metadata(
        ItemMetadata {
            lang: Some(tweet.lang.unwrap_or_else(|| "en".to_string())),
            retweet_count: Some(metrics.map_or(0, |m| m.retweet_count)),
            like_count: Some(metrics.map_or(0, |m| m.like_count)),
            ..ItemMetadata::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tweet_without_metrics_defaults_counts() {
        let tweet: Tweet = serde_json::from_value(serde_json::json!({
            "id": "1",
            "text": "hello"
        }))
        .expect("tweet");
        let item = to_item(tweet);
        assert_eq!(item.id, "1");
        assert!(item.created_at.is_empty());
        assert_eq!(item.metadata.lang.as_deref(), Some("en"));
        assert_eq!(item.metadata.like_count, Some(0));
        assert_eq!(item.metadata.retweet_count, Some(0));
    }

    #[test]
    fn empty_search_has_no_data_key() {
        let response: SearchResponse =
            serde_json::from_value(serde_json::json!({ "meta": { "result_count": 0 } }))
                .expect("response");
        assert!(response.data.is_empty());
    }
}
