use serde::{Deserialize, Serialize};

/// One collected unit of text from a platform.
///
/// Produced by a collector and treated as immutable by the analysis
/// pipeline. Platform-specific data lives in [`ItemMetadata`] and is
/// flattened into the same JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub text: String,
    /// Source-local identifier. Must be non-empty.
    pub id: String,
    /// Source-native timestamp, kept opaque.
    pub created_at: String,
    #[serde(flatten)]
    pub metadata: ItemMetadata,
}

impl RawItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        created_at: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            id: id.into(),
            created_at: created_at.into(),
            metadata: ItemMetadata::default(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: ItemMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Closed set of optional per-platform fields carried through analysis unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retweet_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subreddit: Option<String>,
    /// Reddit post score (upvotes minus downvotes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}
