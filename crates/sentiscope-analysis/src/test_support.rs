use std::collections::HashMap;

use sentiscope_core::RawItem;

use crate::error::ScoreError;
use crate::scorer::SentimentScorer;
use crate::types::SentimentResult;

/// Scorer returning preset compound values; unknown texts are unscoreable.
pub(crate) struct FixedScorer {
    compounds: HashMap<String, f64>,
}

impl FixedScorer {
    pub(crate) fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            compounds: entries
                .iter()
                .map(|&(text, compound)| (text.to_string(), compound))
                .collect(),
        }
    }
}

impl SentimentScorer for FixedScorer {
    fn score(&self, text: &str) -> Result<SentimentResult, ScoreError> {
        let compound = *self.compounds.get(text).ok_or(ScoreError::NoTokens)?;
        let (positive, neutral, negative) = if compound > 0.05 {
            (0.6, 0.4, 0.0)
        } else if compound < -0.05 {
            (0.0, 0.4, 0.6)
        } else {
            (0.0, 1.0, 0.0)
        };
        Ok(SentimentResult {
            compound,
            positive,
            neutral,
            negative,
        })
    }
}

pub(crate) fn item(id: &str, text: &str) -> RawItem {
    RawItem::new(id, "2024-01-01", text)
}
