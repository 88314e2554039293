//! End-to-end checks of the public analysis API.

use std::collections::BTreeMap;

use sentiscope_analysis::{
    Pipeline, Report, ScoreError, SentimentLabel, SentimentResult, SentimentScorer,
};
use sentiscope_core::{ItemMetadata, RawItem};

/// Positive when the text mentions "good", negative for "bad", unscoreable for "???".
struct KeywordScorer;

impl SentimentScorer for KeywordScorer {
    fn score(&self, text: &str) -> Result<SentimentResult, ScoreError> {
        if text.contains("???") {
            return Err(ScoreError::NoTokens);
        }
        let (compound, positive, negative) = if text.contains("good") {
            (0.8, 0.5, 0.0)
        } else if text.contains("bad") {
            (-0.6, 0.0, 0.5)
        } else {
            (0.0, 0.0, 0.0)
        };
        Ok(SentimentResult {
            compound,
            positive,
            neutral: 1.0 - positive - negative,
            negative,
        })
    }
}

fn input() -> BTreeMap<String, Vec<RawItem>> {
    let mut input = BTreeMap::new();
    input.insert(
        "reddit".to_string(),
        vec![
            RawItem::new("rd_0", "1700000000", "good widget").with_metadata(ItemMetadata {
                subreddit: Some("gadgets".to_string()),
                score: Some(88),
                url: Some("https://reddit.com/r/gadgets/comments/abc".to_string()),
                ..ItemMetadata::default()
            }),
            RawItem::new("rd_1", "1700000001", "???"),
            RawItem::new("rd_2", "1700000002", ""),
        ],
    );
    input.insert(
        "twitter".to_string(),
        vec![
            RawItem::new("tw_0", "2024-01-01", "bad widget").with_metadata(ItemMetadata {
                lang: Some("en".to_string()),
                retweet_count: Some(2),
                like_count: Some(10),
                ..ItemMetadata::default()
            }),
            RawItem::new("tw_1", "2024-01-01", "widget arrived"),
        ],
    );
    input.insert("youtube".to_string(), Vec::new());
    input
}

#[test]
fn report_serializes_with_expected_shape() {
    let report = Pipeline::new(KeywordScorer)
        .run("widget", &input())
        .expect("run");
    let json = serde_json::to_value(&report).expect("serialize");

    assert_eq!(json["query"], "widget");
    assert!(json["platforms"].get("youtube").is_none());
    assert_eq!(json["platforms"]["reddit"]["total"], 3);
    assert_eq!(json["platforms"]["reddit"]["sentiment_counts"]["positive"], 1);
    assert_eq!(json["combined"]["total_items"], 5);

    let sample = &json["platforms"]["reddit"]["sample_items"][0];
    assert_eq!(sample["subreddit"], "gadgets");
    assert_eq!(sample["score"], 88);
    assert_eq!(sample["sentiment_label"], "positive");

    let back: Report = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, report);
}

#[test]
fn counts_cover_scored_items_only() {
    let report = Pipeline::new(KeywordScorer)
        .run("widget", &input())
        .expect("run");

    let reddit = &report.platforms["reddit"];
    assert_eq!(reddit.total, 3);
    assert_eq!(reddit.sentiment_counts.total(), 1);

    let twitter = &report.platforms["twitter"];
    assert_eq!(twitter.sentiment_counts.negative, 1);
    assert_eq!(twitter.sentiment_counts.neutral, 1);
    assert_eq!(twitter.all_items[1].sentiment_label, SentimentLabel::Neutral);

    assert_eq!(
        report.combined.total_items,
        report.platforms.values().map(|p| p.total).sum::<usize>()
    );
}

#[test]
fn every_field_but_text_round_trips_into_annotations() {
    let items = input();
    let report = Pipeline::new(KeywordScorer)
        .run("widget", &items)
        .expect("run");

    let tweet = &items["twitter"][0];
    for annotated in [
        &report.platforms["twitter"].sample_items[0],
        &report.platforms["twitter"].all_items[0],
    ] {
        assert_eq!(annotated.id, tweet.id);
        assert_eq!(annotated.created_at, tweet.created_at);
        assert_eq!(annotated.metadata, tweet.metadata);
        assert_eq!(annotated.text, tweet.text);
    }
}
