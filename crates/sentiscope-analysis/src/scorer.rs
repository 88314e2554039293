//! Sentiment scoring for short social text.

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::error::ScoreError;
use crate::types::SentimentResult;

/// Maps a text to compound polarity plus positive/neutral/negative mass.
pub trait SentimentScorer {
    /// Score one non-empty text.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError`] when the text cannot be scored. Callers drop
    /// the item and carry on.
    fn score(&self, text: &str) -> Result<SentimentResult, ScoreError>;
}

/// Default [`SentimentScorer`] backed by the VADER lexicon and rule set.
///
/// Emoji are translated to their lexicon descriptions before scoring, so
/// emoji-only and punctuation-only posts still get a result.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<SentimentResult, ScoreError> {
        // The analyzer only borrows the engine's static lexicons.
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        let get = |key: &'static str| {
            scores
                .get(key)
                .copied()
                .ok_or(ScoreError::MissingScore { key })
        };

        Ok(SentimentResult {
            compound: get("compound")?,
            positive: get("pos")?,
            neutral: get("neu")?,
            negative: get("neg")?,
        })
    }
}
