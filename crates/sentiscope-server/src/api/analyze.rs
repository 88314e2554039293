use axum::{
    extract::{Query, State},
    Extension, Json,
};
use sentiscope_analysis::Report;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeQuery {
    pub query: Option<String>,
}

/// Collect items for the query from every platform and return the report.
pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<AnalyzeQuery>,
) -> Result<Json<ApiResponse<Report>>, ApiError> {
    let query = params.query.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "query parameter is required",
        ));
    }

    let items = state.collector.collect_all(query).await;
    let report = state.pipeline.run(query, &items).map_err(|e| {
        tracing::error!(query, error = %e, "analysis failed");
        ApiError::new(req_id.0.clone(), "internal_error", e.to_string())
    })?;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}
