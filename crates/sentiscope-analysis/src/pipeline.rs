//! Analysis pipeline orchestration.

use std::collections::BTreeMap;

use sentiscope_core::RawItem;

use crate::aggregate::aggregate;
use crate::combine::combine;
use crate::error::AnalysisError;
use crate::scorer::{LexiconScorer, SentimentScorer};
use crate::summary::summarize;
use crate::types::Report;

/// Runs the full analysis with a chosen [`SentimentScorer`].
#[derive(Debug, Clone, Default)]
pub struct Pipeline<S = LexiconScorer> {
    scorer: S,
}

impl<S: SentimentScorer> Pipeline<S> {
    #[must_use]
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Build the report for `query` from items grouped by platform.
    ///
    /// 1. Skip platforms with no items; they do not appear in the report.
    /// 2. Aggregate every remaining platform.
    /// 3. Combine the platforms and attach the summary.
    ///
    /// `query` is expected to be validated by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if any platform contains a malformed item.
    pub fn run(
        &self,
        query: &str,
        items_by_platform: &BTreeMap<String, Vec<RawItem>>,
    ) -> Result<Report, AnalysisError> {
        let mut platforms = BTreeMap::new();

        for (name, items) in items_by_platform {
            if items.is_empty() {
                tracing::debug!(platform = %name, "no items collected, omitting platform");
                continue;
            }
            let analysis = aggregate(&self.scorer, name, items)?;
            platforms.insert(name.clone(), analysis);
        }

        let mut combined = combine(&platforms);
        combined.summary = summarize(&combined, query, platforms.len());

        tracing::info!(
            query,
            platforms = platforms.len(),
            total_items = combined.total_items,
            "analysis complete"
        );

        Ok(Report {
            query: query.to_string(),
            platforms,
            combined,
        })
    }
}

/// Run the pipeline with the default [`LexiconScorer`].
///
/// # Errors
///
/// Returns [`AnalysisError`] if any platform contains a malformed item.
pub fn run_analysis(
    query: &str,
    items_by_platform: &BTreeMap<String, Vec<RawItem>>,
) -> Result<Report, AnalysisError> {
    Pipeline::<LexiconScorer>::default().run(query, items_by_platform)
}
