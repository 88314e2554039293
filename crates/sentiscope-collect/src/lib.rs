//! Item collection for sentiscope.
//!
//! Pulls recent posts and comments for a query from Twitter, Reddit and
//! `YouTube`. Each platform uses its live API when credentials are
//! configured and falls back to deterministic mock data otherwise, or when
//! the live call fails. Callers cannot tell the two apart.

pub mod collector;
pub mod error;
pub mod mock;
pub mod sources;

pub use collector::{Collector, SourceCollector};
pub use error::CollectError;
pub use sources::{PlatformSource, RedditSource, TwitterSource, YoutubeSource};

pub const TWITTER: &str = "twitter";
pub const REDDIT: &str = "reddit";
pub const YOUTUBE: &str = "youtube";

/// Every platform collected, in report order.
pub const PLATFORMS: [&str; 3] = [REDDIT, TWITTER, YOUTUBE];
