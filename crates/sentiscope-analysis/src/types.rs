use std::collections::BTreeMap;

use sentiscope_core::{ItemMetadata, RawItem};
use serde::{Deserialize, Serialize};

/// Compound score above this is positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score below this is negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Output of a [`SentimentScorer`](crate::SentimentScorer) for one text.
///
/// `positive + neutral + negative` is 1.0 up to floating-point rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentResult {
    /// Overall polarity in `[-1.0, 1.0]`.
    pub compound: f64,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Classify a compound score. Both thresholds fall in the neutral band.
    #[must_use]
    pub fn from_compound(compound: f64) -> Self {
        if compound > POSITIVE_THRESHOLD {
            Self::Positive
        } else if compound < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Negative => write!(f, "negative"),
        }
    }
}

/// A scored [`RawItem`]: every raw field, possibly truncated text, plus
/// its label and compound score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedItem {
    pub text: String,
    pub id: String,
    pub created_at: String,
    #[serde(flatten)]
    pub metadata: ItemMetadata,
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
}

impl AnnotatedItem {
    /// Annotate `item`, keeping at most `max_chars` characters of its text.
    #[must_use]
    pub fn new(item: &RawItem, result: &SentimentResult, max_chars: Option<usize>) -> Self {
        let text = match max_chars {
            Some(limit) => item.text.chars().take(limit).collect(),
            None => item.text.clone(),
        };
        Self {
            text,
            id: item.id.clone(),
            created_at: item.created_at.clone(),
            metadata: item.metadata.clone(),
            sentiment_label: SentimentLabel::from_compound(result.compound),
            sentiment_score: result.compound,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

impl std::ops::AddAssign for SentimentCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.positive += rhs.positive;
        self.neutral += rhs.neutral;
        self.negative += rhs.negative;
    }
}

/// Average positive/neutral/negative mass, rounded to three decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// Per-platform statistics. Only built for platforms that returned items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformAnalysis {
    /// Raw item count, including items with empty text that were never scored.
    pub total: usize,
    /// Counts over scored items only; may sum to less than `total`.
    pub sentiment_counts: SentimentCounts,
    pub sentiment_scores: SentimentScores,
    pub top_keywords: Vec<String>,
    pub sample_items: Vec<AnnotatedItem>,
    pub all_items: Vec<AnnotatedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedAnalysis {
    pub total_items: usize,
    pub sentiment_counts: SentimentCounts,
    /// Weighted mean of the platform means, weighted by platform `total`.
    pub sentiment_scores: SentimentScores,
    pub top_keywords: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub query: String,
    /// Keyed by platform name. Platforms without items are absent.
    pub platforms: BTreeMap<String, PlatformAnalysis>,
    pub combined: CombinedAnalysis,
}

/// Round to three decimal places.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
