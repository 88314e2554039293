//! Live platform sources.

mod reddit;
mod twitter;
mod youtube;

pub use reddit::RedditSource;
pub use twitter::TwitterSource;
pub use youtube::YoutubeSource;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use sentiscope_core::RawItem;
use serde::de::DeserializeOwned;

use crate::error::CollectError;

const USER_AGENT: &str = "sentiscope/0.1 (feedback-analysis)";

/// One live platform API.
#[async_trait]
pub trait PlatformSource: Send + Sync {
    /// Platform key used in reports.
    fn platform(&self) -> &'static str;

    /// Fetch up to `limit` recent items matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError`] on transport, status, auth or decode failure.
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawItem>, CollectError>;
}

fn build_client(timeout_secs: u64, user_agent: Option<&str>) -> Result<Client, CollectError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent.unwrap_or(USER_AGENT))
        .build()?)
}

/// Parse `base_url`, forcing exactly one trailing slash so `join` appends
/// path segments instead of replacing the last one.
fn parse_base_url(base_url: &str) -> Result<Url, CollectError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| CollectError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

fn endpoint(base_url: &Url, path: &str) -> Result<Url, CollectError> {
    base_url
        .join(path)
        .map_err(|e| CollectError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })
}

/// Send `request` and decode a JSON body, mapping non-2xx to
/// [`CollectError::UnexpectedStatus`].
async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    platform: &'static str,
    context: &str,
) -> Result<T, CollectError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CollectError::UnexpectedStatus {
            platform,
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| CollectError::Deserialize {
        context: format!("{platform} {context}"),
        source,
    })
}
