//! Deterministic mock items for platforms without live credentials.
//!
//! Template order and generated scores come from an RNG seeded with the
//! SHA-256 of `platform:query`, so the same query always yields the same
//! items.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sentiscope_core::{ItemMetadata, RawItem};
use sha2::{Digest, Sha256};

use crate::{REDDIT, TWITTER, YOUTUBE};

const MOCK_CREATED_AT: &str = "2024-01-01";
const MOCK_VIDEO_ID: &str = "dQw4w9WgXcQ";

const TWITTER_TEMPLATES: &[&str] = &[
    "Just got my {q}! Loving it so far 🎉",
    "{q} is amazing, highly recommend!",
    "Not impressed with {q}, battery life is poor",
    "{q} review: Great camera but expensive",
    "Anyone else having issues with {q}?",
    "{q} is the best purchase I've made this year",
    "Mixed feelings about {q}, some features are missing",
    "{q} - worth the hype? I think so!",
];

const REDDIT_TEMPLATES: &[&str] = &[
    "Just bought {q} - AMA",
    "{q} review after 1 month of use",
    "Is {q} worth it in 2024?",
    "{q} vs competitors - detailed comparison",
    "Having problems with {q}, need help",
    "{q} is overrated in my opinion",
    "Best settings for {q}?",
    "{q} - pros and cons",
];

const YOUTUBE_TEMPLATES: &[&str] = &[
    "Great review of {q}! Very helpful",
    "{q} looks amazing, might buy it",
    "Not sure about {q}, seems expensive",
    "{q} has great features but poor battery",
    "Best {q} review I've seen!",
    "{q} is definitely worth checking out",
    "Disappointed with {q}, expected more",
    "{q} - solid choice for the price",
];

/// Mock items for `platform`. Unknown platforms get no items.
#[must_use]
pub fn mock_items(platform: &str, query: &str) -> Vec<RawItem> {
    let (templates, prefix) = match platform {
        TWITTER => (TWITTER_TEMPLATES, "tw"),
        REDDIT => (REDDIT_TEMPLATES, "rd"),
        YOUTUBE => (YOUTUBE_TEMPLATES, "yt"),
        _ => return Vec::new(),
    };

    let mut rng = seeded_rng(platform, query);
    let mut texts: Vec<String> = templates.iter().map(|t| t.replace("{q}", query)).collect();
    texts.shuffle(&mut rng);

    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let metadata = match platform {
                REDDIT => ItemMetadata {
                    subreddit: Some("technology".to_string()),
                    score: Some(rng.random_range(10..=500)),
                    ..ItemMetadata::default()
                },
                YOUTUBE => ItemMetadata {
                    video_id: Some(MOCK_VIDEO_ID.to_string()),
                    video_url: Some(format!("https://www.youtube.com/watch?v={MOCK_VIDEO_ID}")),
                    ..ItemMetadata::default()
                },
                _ => ItemMetadata::default(),
            };
            RawItem::new(format!("{prefix}_{i}"), MOCK_CREATED_AT, text).with_metadata(metadata)
        })
        .collect()
}

fn seeded_rng(platform: &str, query: &str) -> StdRng {
    let digest = Sha256::digest(format!("{platform}:{query}").as_bytes());
    let mut seed = [0_u8; 32];
    seed.copy_from_slice(&digest);
    StdRng::from_seed(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_query_gives_same_items() {
        for platform in [TWITTER, REDDIT, YOUTUBE] {
            assert_eq!(mock_items(platform, "WidgetX"), mock_items(platform, "WidgetX"));
        }
    }

    #[test]
    fn every_template_is_used_once_with_query() {
        let items = mock_items(TWITTER, "Pixel 9");
        assert_eq!(items.len(), TWITTER_TEMPLATES.len());
        assert!(items.iter().all(|item| item.text.contains("Pixel 9")));
        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["tw_0", "tw_1", "tw_2", "tw_3", "tw_4", "tw_5", "tw_6", "tw_7"]);
    }

    #[test]
    fn reddit_items_carry_subreddit_and_score() {
        for item in mock_items(REDDIT, "WidgetX") {
            assert_eq!(item.metadata.subreddit.as_deref(), Some("technology"));
            let score = item.metadata.score.expect("score");
            assert!((10..=500).contains(&score));
            assert_eq!(item.created_at, MOCK_CREATED_AT);
        }
    }

    #[test]
    fn youtube_items_carry_video_fields() {
        let item = &mock_items(YOUTUBE, "WidgetX")[0];
        assert_eq!(item.metadata.video_id.as_deref(), Some(MOCK_VIDEO_ID));
        assert!(item
            .metadata
            .video_url
            .as_deref()
            .is_some_and(|url| url.ends_with(MOCK_VIDEO_ID)));
    }

    #[test]
    fn unknown_platform_is_empty() {
        assert!(mock_items("mastodon", "WidgetX").is_empty());
    }
}
