//! Frequency-based keyword extraction.

use std::collections::HashMap;

/// Maximum number of keywords returned by [`extract_keywords`].
pub const MAX_KEYWORDS: usize = 20;

/// Tokens with this many characters or fewer are never keywords.
const MIN_TOKEN_CHARS: usize = 3;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "should", "could", "may", "might", "must", "can", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they", "my", "your", "his", "her",
    "its", "our", "their", "me", "him", "us", "them", "what", "which", "who", "when", "where",
    "why", "how", "all", "each", "every", "both", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "just",
    "now",
];

/// Extract up to [`MAX_KEYWORDS`] frequent terms from `text`, most frequent first.
///
/// The text is lowercased and stripped of everything but alphanumerics and
/// whitespace. Short tokens and stop words are dropped. Ties keep the order
/// in which terms first appeared.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let tokens = normalized
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS && !STOP_WORDS.contains(token));

    rank_by_frequency(tokens, MAX_KEYWORDS)
}

/// Count `terms` and return the `limit` most frequent, ties by first occurrence.
pub(crate) fn rank_by_frequency<'a, I>(terms: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for term in terms {
        if let Some(&pos) = positions.get(term) {
            counts[pos].1 += 1;
        } else {
            positions.insert(term, counts.len());
            counts.push((term, 1));
        }
    }

    // Stable sort keeps first-occurrence order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(term, _)| term.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_nothing() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \n\t").is_empty());
    }

    #[test]
    fn three_letter_tokens_are_dropped() {
        assert_eq!(extract_keywords("The cat sat. The cat ran fast!"), vec!["fast"]);
    }

    #[test]
    fn stop_words_are_dropped() {
        assert!(extract_keywords("these those their which where every").is_empty());
    }

    #[test]
    fn punctuation_is_removed_not_split() {
        assert_eq!(extract_keywords("don't can't #winning"), vec!["dont", "cant", "winning"]);
    }

    #[test]
    fn orders_by_frequency_then_first_occurrence() {
        let keywords = extract_keywords("battery camera screen camera battery camera price");
        assert_eq!(keywords, vec!["camera", "battery", "screen", "price"]);
    }

    #[test]
    fn case_is_folded() {
        assert_eq!(extract_keywords("Widget WIDGET widget"), vec!["widget"]);
    }

    #[test]
    fn output_is_capped() {
        let text: Vec<String> = (0..30).map(|i| format!("term{i:02}")).collect();
        let keywords = extract_keywords(&text.join(" "));
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "term00");
    }

    #[test]
    fn rank_by_frequency_respects_limit() {
        let ranked = rank_by_frequency(["b", "a", "b", "c", "a", "b"], 2);
        assert_eq!(ranked, vec!["b", "a"]);
    }
}
