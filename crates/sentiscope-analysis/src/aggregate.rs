//! Per-platform aggregation.

use sentiscope_core::RawItem;

use crate::error::AnalysisError;
use crate::keywords::extract_keywords;
use crate::scorer::SentimentScorer;
use crate::types::{
    round3, AnnotatedItem, PlatformAnalysis, SentimentCounts, SentimentLabel, SentimentResult,
    SentimentScores,
};

/// Number of annotated items kept in `sample_items`.
pub const SAMPLE_SIZE: usize = 5;
/// Characters of text kept per sample item.
pub const SAMPLE_TEXT_CHARS: usize = 200;
/// Keywords kept per platform.
pub const PLATFORM_KEYWORDS: usize = 10;

/// Score and summarize one platform's items.
///
/// Items with empty text are counted in `total` but never scored, so the
/// sentiment counts can sum to less than `total`. Items the scorer rejects
/// are logged and treated the same way.
///
/// # Errors
///
/// Returns [`AnalysisError::MalformedItem`] if any item has an empty `id`.
pub fn aggregate<S>(
    scorer: &S,
    platform: &str,
    items: &[RawItem],
) -> Result<PlatformAnalysis, AnalysisError>
where
    S: SentimentScorer + ?Sized,
{
    let mut scored: Vec<(&RawItem, SentimentResult)> = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        if item.id.trim().is_empty() {
            return Err(AnalysisError::MalformedItem {
                platform: platform.to_string(),
                index,
                reason: "missing id".to_string(),
            });
        }
        if item.text.is_empty() {
            continue;
        }
        match scorer.score(&item.text) {
            Ok(result) => scored.push((item, result)),
            Err(e) => {
                tracing::warn!(
                    platform,
                    item_id = %item.id,
                    error = %e,
                    "skipping unscoreable item"
                );
            }
        }
    }

    let mut sentiment_counts = SentimentCounts::default();
    for (_, result) in &scored {
        sentiment_counts.record(SentimentLabel::from_compound(result.compound));
    }

    let sentiment_scores = mean_masses(scored.iter().map(|(_, result)| result));

    let corpus = scored
        .iter()
        .map(|(item, _)| item.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let mut top_keywords = extract_keywords(&corpus);
    top_keywords.truncate(PLATFORM_KEYWORDS);

    let sample_items = scored
        .iter()
        .take(SAMPLE_SIZE)
        .map(|(item, result)| AnnotatedItem::new(item, result, Some(SAMPLE_TEXT_CHARS)))
        .collect();
    let all_items = scored
        .iter()
        .map(|(item, result)| AnnotatedItem::new(item, result, None))
        .collect();

    tracing::debug!(
        platform,
        total = items.len(),
        scored = scored.len(),
        positive = sentiment_counts.positive,
        neutral = sentiment_counts.neutral,
        negative = sentiment_counts.negative,
        "aggregated platform"
    );

    Ok(PlatformAnalysis {
        total: items.len(),
        sentiment_counts,
        sentiment_scores,
        top_keywords,
        sample_items,
        all_items,
    })
}

fn mean_masses<'a, I>(results: I) -> SentimentScores
where
    I: Iterator<Item = &'a SentimentResult>,
{
    let mut n = 0_usize;
    let mut sums = SentimentScores::default();
    for result in results {
        n += 1;
        sums.positive += result.positive;
        sums.neutral += result.neutral;
        sums.negative += result.negative;
    }

    if n == 0 {
        return SentimentScores::default();
    }

    #[allow(clippy::cast_precision_loss)]
    let denom = n as f64;
    SentimentScores {
        positive: round3(sums.positive / denom),
        neutral: round3(sums.neutral / denom),
        negative: round3(sums.negative / denom),
    }
}
