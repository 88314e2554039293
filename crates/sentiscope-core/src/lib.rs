//! Shared types and configuration for sentiscope.

mod app_config;
mod config;
mod items;

pub use app_config::{ApiStatus, AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, load_offline_config};
pub use items::{ItemMetadata, RawItem};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
