//! Plain-language summary of a combined analysis.

use crate::types::CombinedAnalysis;

/// Number of keywords named in the summary.
const SUMMARY_KEYWORDS: usize = 3;

/// Render a one-paragraph synopsis of `combined`.
#[must_use]
pub fn summarize(combined: &CombinedAnalysis, query: &str, platform_count: usize) -> String {
    let total = combined.total_items;
    if total == 0 {
        return format!("No data found for '{query}'.");
    }

    #[allow(clippy::cast_precision_loss)]
    let pct = |count: usize| count as f64 / total as f64 * 100.0;
    let pos_pct = pct(combined.sentiment_counts.positive);
    let neg_pct = pct(combined.sentiment_counts.negative);

    let mut summary =
        format!("Analysis of {total} items across {platform_count} platforms for '{query}': ");

    if pos_pct > 50.0 {
        summary.push_str(&format!(
            "Overall sentiment is positive ({pos_pct:.1}% positive). "
        ));
    } else if neg_pct > 50.0 {
        summary.push_str(&format!(
            "Overall sentiment is negative ({neg_pct:.1}% negative). "
        ));
    } else {
        summary.push_str(&format!(
            "Overall sentiment is mixed ({pos_pct:.1}% positive, {neg_pct:.1}% negative). "
        ));
    }

    if !combined.top_keywords.is_empty() {
        let topics = combined
            .top_keywords
            .iter()
            .take(SUMMARY_KEYWORDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        summary.push_str(&format!("Key topics discussed: {topics}."));
    }

    summary
}
