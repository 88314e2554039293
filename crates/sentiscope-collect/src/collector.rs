use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::future::join_all;
use sentiscope_core::{AppConfig, RawItem};

use crate::error::CollectError;
use crate::mock::mock_items;
use crate::sources::{PlatformSource, RedditSource, TwitterSource, YoutubeSource};
use crate::PLATFORMS;

/// Gathers raw items for a query from every platform.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Items keyed by platform name. Never fails: platforms that cannot be
    /// reached contribute mock data instead.
    async fn collect_all(&self, query: &str) -> BTreeMap<String, Vec<RawItem>>;
}

/// Live sources where configured, mock data everywhere else.
pub struct SourceCollector {
    live: BTreeMap<&'static str, Box<dyn PlatformSource>>,
    limit: usize,
}

impl SourceCollector {
    /// A collector that only ever returns mock data.
    #[must_use]
    pub fn mock_only(limit: usize) -> Self {
        Self {
            live: BTreeMap::new(),
            limit,
        }
    }

    /// Build live sources for every platform with credentials in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError`] if an HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, CollectError> {
        let mut collector = Self::mock_only(config.result_limit);
        let timeout = config.request_timeout_secs;

        if let Some(token) = &config.twitter_bearer_token {
            collector = collector.with_source(Box::new(TwitterSource::new(token, timeout)?));
        }
        if let (Some(id), Some(secret)) = (&config.reddit_client_id, &config.reddit_client_secret)
        {
            collector = collector.with_source(Box::new(RedditSource::new(
                id,
                secret,
                &config.reddit_user_agent,
                timeout,
            )?));
        }
        if let Some(key) = &config.youtube_api_key {
            collector = collector.with_source(Box::new(YoutubeSource::new(key, timeout)?));
        }

        tracing::info!(
            live = ?collector.live.keys().collect::<Vec<_>>(),
            limit = collector.limit,
            "collector ready"
        );
        Ok(collector)
    }

    /// Register (or replace) the live source for its platform.
    #[must_use]
    pub fn with_source(mut self, source: Box<dyn PlatformSource>) -> Self {
        self.live.insert(source.platform(), source);
        self
    }

    #[must_use]
    pub fn is_live(&self, platform: &str) -> bool {
        self.live.contains_key(platform)
    }

    /// Direct access to a live source, bypassing the mock fallback.
    #[must_use]
    pub fn live_source(&self, platform: &str) -> Option<&dyn PlatformSource> {
        self.live.get(platform).map(|source| &**source)
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    async fn collect_platform(&self, platform: &'static str, query: &str) -> Vec<RawItem> {
        let Some(source) = self.live.get(platform) else {
            return mock_items(platform, query);
        };

        match source.fetch(query, self.limit).await {
            Ok(items) if !items.is_empty() => {
                tracing::info!(platform, count = items.len(), "collected live items");
                items
            }
            Ok(_) => {
                tracing::info!(platform, query, "no live results, falling back to mock data");
                mock_items(platform, query)
            }
            Err(e) => {
                tracing::warn!(
                    platform,
                    error = %e,
                    "live collection failed, falling back to mock data"
                );
                mock_items(platform, query)
            }
        }
    }
}

#[async_trait]
impl Collector for SourceCollector {
    async fn collect_all(&self, query: &str) -> BTreeMap<String, Vec<RawItem>> {
        let results = join_all(PLATFORMS.iter().map(|&platform| async move {
            (platform, self.collect_platform(platform, query).await)
        }))
        .await;

        results
            .into_iter()
            .map(|(platform, items)| (platform.to_string(), items))
            .collect()
    }
}
