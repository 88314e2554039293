use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("malformed item #{index} from {platform}: {reason}")]
    MalformedItem {
        platform: String,
        index: usize,
        reason: String,
    },
}

/// A single text could not be scored. The item is dropped, the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("text contains no scoreable words")]
    NoTokens,

    #[error("sentiment engine returned no `{key}` score")]
    MissingScore { key: &'static str },
}
