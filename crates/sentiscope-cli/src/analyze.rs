//! `analyze` command: collect, score and print the report.

use sentiscope_analysis::{run_analysis, Report};
use sentiscope_collect::{Collector, SourceCollector};
use sentiscope_core::AppConfig;

/// Collect items for `query` and print the report as JSON on stdout.
///
/// With `mock` set, live credentials are ignored and every platform uses
/// mock data.
///
/// # Errors
///
/// Returns an error if the query is blank, a live client cannot be built,
/// or the collected items are malformed.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    query: &str,
    mock: bool,
    compact: bool,
) -> anyhow::Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("query must not be empty");
    }

    let collector = if mock {
        SourceCollector::mock_only(config.result_limit)
    } else {
        SourceCollector::from_config(config)?
    };

    let items = collector.collect_all(query).await;
    let report = run_analysis(query, &items)?;
    tracing::info!(
        query,
        platforms = report.platforms.len(),
        total_items = report.combined.total_items,
        "report ready"
    );

    println!("{}", render_report(&report, compact)?);
    Ok(())
}

pub(crate) fn render_report(report: &Report, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(report)
    } else {
        serde_json::to_string_pretty(report)
    }
}
