use std::net::SocketAddr;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Allowed CORS origins. `["*"]` allows any origin.
    pub allowed_origins: Vec<String>,
    pub twitter_bearer_token: Option<String>,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_user_agent: String,
    pub youtube_api_key: Option<String>,
    /// Upper bound on items collected per platform.
    pub result_limit: usize,
    pub request_timeout_secs: u64,
    /// Analyze requests each client may make per minute.
    pub rate_limit_per_minute: usize,
}

/// Which live platform APIs have credentials configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiStatus {
    pub twitter: bool,
    pub reddit: bool,
    pub youtube: bool,
}

impl ApiStatus {
    /// `true` when at least one live API is configured.
    #[must_use]
    pub fn any(self) -> bool {
        self.twitter || self.reddit || self.youtube
    }

    #[must_use]
    pub fn mode(self) -> &'static str {
        if self.any() {
            "live"
        } else {
            "mock"
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn api_status(&self) -> ApiStatus {
        ApiStatus {
            twitter: self.twitter_bearer_token.is_some(),
            reddit: self.reddit_client_id.is_some() && self.reddit_client_secret.is_some(),
            youtube: self.youtube_api_key.is_some(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("allowed_origins", &self.allowed_origins)
            .field("twitter_bearer_token", &redact(&self.twitter_bearer_token))
            .field("reddit_client_id", &redact(&self.reddit_client_id))
            .field("reddit_client_secret", &redact(&self.reddit_client_secret))
            .field("reddit_user_agent", &self.reddit_user_agent)
            .field("youtube_api_key", &redact(&self.youtube_api_key))
            .field("result_limit", &self.result_limit)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
