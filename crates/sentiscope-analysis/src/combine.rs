//! Cross-platform combination.

use std::collections::BTreeMap;

use crate::keywords::rank_by_frequency;
use crate::types::{round3, CombinedAnalysis, PlatformAnalysis, SentimentCounts, SentimentScores};

/// Keywords kept in the combined view.
pub const COMBINED_KEYWORDS: usize = 15;

/// Merge per-platform analyses into one combined record.
///
/// `sentiment_scores` is the mean of the platform means weighted by each
/// platform's `total`. That is an approximation of the per-item mean: the
/// platform means are already rounded and cover scored items only, while the
/// weights count every item.
///
/// Keywords are ranked by how many platform top lists contain them, walking
/// platforms in key order. `summary` is left empty for the caller to fill.
#[must_use]
pub fn combine(platforms: &BTreeMap<String, PlatformAnalysis>) -> CombinedAnalysis {
    let total_items: usize = platforms.values().map(|p| p.total).sum();

    let mut sentiment_counts = SentimentCounts::default();
    for platform in platforms.values() {
        sentiment_counts += platform.sentiment_counts;
    }

    let sentiment_scores = if total_items == 0 {
        SentimentScores::default()
    } else {
        #[allow(clippy::cast_precision_loss)]
        let weighted = |field: fn(&SentimentScores) -> f64| -> f64 {
            let sum: f64 = platforms
                .values()
                .map(|p| field(&p.sentiment_scores) * p.total as f64)
                .sum();
            round3(sum / total_items as f64)
        };
        SentimentScores {
            positive: weighted(|s| s.positive),
            neutral: weighted(|s| s.neutral),
            negative: weighted(|s| s.negative),
        }
    };

    let top_keywords = rank_by_frequency(
        platforms
            .values()
            .flat_map(|p| p.top_keywords.iter().map(String::as_str)),
        COMBINED_KEYWORDS,
    );

    CombinedAnalysis {
        total_items,
        sentiment_counts,
        sentiment_scores,
        top_keywords,
        summary: String::new(),
    }
}
