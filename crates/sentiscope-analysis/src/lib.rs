//! Sentiment and topic analysis for collected platform items.
//!
//! Scores every item with a lexicon scorer, aggregates per platform,
//! combines the platforms into one cross-platform view and renders a
//! one-paragraph summary. Pure and synchronous: no I/O happens here.

pub mod aggregate;
pub mod combine;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod scorer;
pub mod summary;
pub mod types;

#[cfg(test)]
mod test_support;

pub use aggregate::aggregate;
pub use combine::combine;
pub use error::{AnalysisError, ScoreError};
pub use keywords::extract_keywords;
pub use pipeline::{run_analysis, Pipeline};
pub use scorer::{LexiconScorer, SentimentScorer};
pub use summary::summarize;
pub use types::{
    AnnotatedItem, CombinedAnalysis, PlatformAnalysis, Report, SentimentCounts, SentimentLabel,
    SentimentResult, SentimentScores,
};
