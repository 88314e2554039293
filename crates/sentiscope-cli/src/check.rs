//! `check-apis` command: verify configured credentials against the live APIs.

use sentiscope_collect::{SourceCollector, PLATFORMS, REDDIT, TWITTER, YOUTUBE};
use sentiscope_core::{AppConfig, RawItem};

const SAMPLE_CHARS: usize = 100;

/// Print which platforms are configured, then call each live source once.
///
/// Sources are called directly, so failures are reported instead of being
/// masked by mock data.
///
/// # Errors
///
/// Returns an error if a live client cannot be constructed.
pub(crate) async fn run_check_apis(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let status = config.api_status();

    println!("API configuration status:");
    for (platform, configured) in [
        (REDDIT, status.reddit),
        (TWITTER, status.twitter),
        (YOUTUBE, status.youtube),
    ] {
        let label = if configured {
            "configured"
        } else {
            "not configured"
        };
        println!("  {platform:<10}{label}");
    }

    if !status.any() {
        println!("\nno API credentials found; analysis will use mock data");
        return Ok(());
    }

    let collector = SourceCollector::from_config(config)?;
    println!("\ntesting with query '{query}'");

    for platform in PLATFORMS {
        let Some(source) = collector.live_source(platform) else {
            continue;
        };
        match source.fetch(query, collector.limit()).await {
            Ok(items) => println!("  {}", describe_fetch(platform, &items)),
            Err(e) => {
                tracing::debug!(platform, error = ?e, "live check failed");
                println!("  {platform}: error: {e}");
            }
        }
    }

    Ok(())
}

/// One-line outcome for a live fetch: the count plus a truncated sample.
pub(crate) fn describe_fetch(platform: &str, items: &[RawItem]) -> String {
    match items.first() {
        None => format!("{platform}: no items found (rate limited or no results)"),
        Some(first) => {
            let sample: String = first.text.chars().take(SAMPLE_CHARS).collect();
            format!("{platform}: found {} items; sample: {sample}", items.len())
        }
    }
}
