use std::env::VarError;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or credentials are incomplete.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or credentials are incomplete.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load configuration for mock-only runs.
///
/// Loads `.env` like [`load_app_config`] but treats every platform
/// credential as unset, so an incomplete credential pair is not an error.
///
/// # Errors
///
/// Returns `ConfigError` if a non-credential value is invalid.
pub fn load_offline_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(without_credentials(|key| std::env::var(key)))
}

const CREDENTIAL_VARS: [&str; 4] = [
    "TWITTER_BEARER_TOKEN",
    "REDDIT_CLIENT_ID",
    "REDDIT_CLIENT_SECRET",
    "YOUTUBE_API_KEY",
];

fn without_credentials<F>(lookup: F) -> impl Fn(&str) -> Result<String, VarError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    move |key| {
        if CREDENTIAL_VARS.contains(&key) {
            Err(VarError::NotPresent)
        } else {
            lookup(key)
        }
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a pure
/// `HashMap` lookup. Empty values are treated the same as unset ones.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        parse_var(var, &or_default(var, default))
    };
    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        parse_var(var, &or_default(var, default))
    };
    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        parse_var(var, &or_default(var, default))
    };

    let env = parse_environment(&or_default("SENTISCOPE_ENV", "development"));
    let bind_addr = parse_addr("SENTISCOPE_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("SENTISCOPE_LOG_LEVEL", "info");

    let allowed_origins: Vec<String> = or_default("ALLOWED_ORIGINS", "*")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let twitter_bearer_token = optional("TWITTER_BEARER_TOKEN");
    let reddit_client_id = optional("REDDIT_CLIENT_ID");
    let reddit_client_secret = optional("REDDIT_CLIENT_SECRET");
    match (&reddit_client_id, &reddit_client_secret) {
        (Some(_), None) => {
            return Err(ConfigError::MissingEnvVar(
                "REDDIT_CLIENT_SECRET".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(ConfigError::MissingEnvVar("REDDIT_CLIENT_ID".to_string()))
        }
        _ => {}
    }
    let reddit_user_agent = or_default("REDDIT_USER_AGENT", "FeedbackAnalysisBot/1.0");
    let youtube_api_key = optional("YOUTUBE_API_KEY");

    let result_limit = require_positive("RESULT_LIMIT", parse_usize("RESULT_LIMIT", "50")?)?;
    let request_timeout_secs = parse_u64("SENTISCOPE_REQUEST_TIMEOUT_SECS", "30")?;
    let rate_limit_per_minute = require_positive(
        "SENTISCOPE_RATE_LIMIT_PER_MINUTE",
        parse_usize("SENTISCOPE_RATE_LIMIT_PER_MINUTE", "60")?,
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        allowed_origins,
        twitter_bearer_token,
        reddit_client_id,
        reddit_client_secret,
        reddit_user_agent,
        youtube_api_key,
        result_limit,
        request_timeout_secs,
        rate_limit_per_minute,
    })
}

fn require_positive(var: &str, value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
