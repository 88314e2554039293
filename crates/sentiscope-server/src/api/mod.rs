mod analyze;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use sentiscope_analysis::Pipeline;
use sentiscope_collect::Collector;
use sentiscope_core::ApiStatus;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, RequestId};
use crate::throttle::{throttle_clients, ClientThrottle};

const HEALTH_MESSAGE: &str = "All systems operational";

#[derive(Clone)]
pub struct AppState {
    pub collector: Arc<dyn Collector>,
    pub pipeline: Pipeline,
    pub api_status: ApiStatus,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    mode: &'static str,
    apis: ApiStatus,
    message: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// CORS for the configured origins. A `*` entry allows any origin.
fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([HeaderName::from_static("x-request-id")])
}

fn analysis_router(throttle: ClientThrottle) -> Router<AppState> {
    Router::new()
        .route("/api/v1/analyze", get(analyze::analyze))
        .layer(axum::middleware::from_fn_with_state(
            throttle,
            throttle_clients,
        ))
}

pub fn build_app(state: AppState, allowed_origins: &[String], throttle: ClientThrottle) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(analysis_router(throttle))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors(allowed_origins))
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            mode: state.api_status.mode(),
            apis: state.api_status,
            message: HEALTH_MESSAGE,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::net::SocketAddr;

    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::extract::ConnectInfo;
    use axum::http::Request;
    use sentiscope_collect::SourceCollector;
    use sentiscope_core::RawItem;
    use tower::ServiceExt;

    const NO_APIS: ApiStatus = ApiStatus {
        twitter: false,
        reddit: false,
        youtube: false,
    };

    /// Returns the same items for every query.
    struct FixedCollector(BTreeMap<String, Vec<RawItem>>);

    #[async_trait]
    impl Collector for FixedCollector {
        async fn collect_all(&self, _query: &str) -> BTreeMap<String, Vec<RawItem>> {
            self.0.clone()
        }
    }

    fn state_with(collector: Arc<dyn Collector>, api_status: ApiStatus) -> AppState {
        AppState {
            collector,
            pipeline: Pipeline::default(),
            api_status,
        }
    }

    fn mock_app() -> Router {
        build_app(
            state_with(Arc::new(SourceCollector::mock_only(50)), NO_APIS),
            &["*".to_string()],
            ClientThrottle::per_minute(100),
        )
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_unknown_code_maps_to_internal_error() {
        let response = ApiError::new("req-1", "internal_error", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_reports_mock_mode_without_credentials() {
        let response = mock_app()
            .oneshot(get_request("/api/v1/health"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["mode"], "mock");
        assert_eq!(json["data"]["apis"]["reddit"], false);
        assert_eq!(json["data"]["message"], HEALTH_MESSAGE);
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn health_reports_live_mode_with_any_api() {
        let status = ApiStatus {
            youtube: true,
            ..NO_APIS
        };
        let app = build_app(
            state_with(Arc::new(SourceCollector::mock_only(50)), status),
            &["*".to_string()],
            ClientThrottle::per_minute(100),
        );
        let response = app
            .oneshot(get_request("/api/v1/health"))
            .await
            .expect("response");
        let json = json_body(response).await;
        assert_eq!(json["data"]["mode"], "live");
        assert_eq!(json["data"]["apis"]["youtube"], true);
    }

    #[tokio::test]
    async fn analyze_returns_report_for_every_platform() {
        let request = Request::builder()
            .uri("/api/v1/analyze?query=WidgetX")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .expect("request");
        let response = mock_app().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["meta"]["request_id"], "req-42");
        let report = &json["data"];
        assert_eq!(report["query"], "WidgetX");
        for platform in ["reddit", "twitter", "youtube"] {
            assert_eq!(report["platforms"][platform]["total"], 8);
        }
        assert_eq!(report["combined"]["total_items"], 24);
        assert!(report["combined"]["summary"]
            .as_str()
            .is_some_and(|s| s.contains("WidgetX")));
    }

    #[tokio::test]
    async fn analyze_trims_the_query() {
        let response = mock_app()
            .oneshot(get_request("/api/v1/analyze?query=%20%20WidgetX%20"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["query"], "WidgetX");
    }

    #[tokio::test]
    async fn analyze_rejects_missing_or_blank_query() {
        let uris = [
            "/api/v1/analyze",
            "/api/v1/analyze?query=",
            "/api/v1/analyze?query=%20%20",
        ];
        for uri in uris {
            let response = mock_app().oneshot(get_request(uri)).await.expect("response");
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let json = json_body(response).await;
            assert_eq!(json["error"]["code"], "validation_error");
        }
    }

    #[tokio::test]
    async fn analyze_without_items_returns_no_data_summary() {
        let app = build_app(
            state_with(Arc::new(FixedCollector(BTreeMap::new())), NO_APIS),
            &["*".to_string()],
            ClientThrottle::per_minute(100),
        );
        let response = app
            .oneshot(get_request("/api/v1/analyze?query=WidgetX"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["data"]["combined"]["total_items"], 0);
        assert!(json["data"]["platforms"]
            .as_object()
            .is_some_and(serde_json::Map::is_empty));
    }

    #[tokio::test]
    async fn analyze_malformed_items_is_internal_error() {
        let items = BTreeMap::from([(
            "twitter".to_string(),
            vec![RawItem::new("", "2024-01-01", "great product")],
        )]);
        let app = build_app(
            state_with(Arc::new(FixedCollector(items)), NO_APIS),
            &["*".to_string()],
            ClientThrottle::per_minute(100),
        );
        let response = app
            .oneshot(get_request("/api/v1/analyze?query=WidgetX"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"]["code"], "internal_error");
    }

    #[tokio::test]
    async fn analyze_is_throttled_per_client_but_health_is_not() {
        let app = build_app(
            state_with(Arc::new(SourceCollector::mock_only(50)), NO_APIS),
            &["*".to_string()],
            ClientThrottle::per_minute(1),
        );

        let analyze_from = |last: u8| {
            let mut request = get_request("/api/v1/analyze?query=WidgetX");
            request.extensions_mut().insert(ConnectInfo(SocketAddr::from((
                [192, 168, 1, last],
                5050,
            ))));
            request
        };

        let first = app.clone().oneshot(analyze_from(1)).await.expect("response");
        assert_eq!(first.status(), StatusCode::OK);

        let second = app.clone().oneshot(analyze_from(1)).await.expect("response");
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().contains_key(header::RETRY_AFTER));
        assert_eq!(json_body(second).await["error"]["code"], "rate_limited");

        let other_client = app.clone().oneshot(analyze_from(2)).await.expect("response");
        assert_eq!(other_client.status(), StatusCode::OK);

        let health = app
            .oneshot(get_request("/api/v1/health"))
            .await
            .expect("response");
        assert_eq!(health.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cors_allows_only_listed_origins() {
        let app = build_app(
            state_with(Arc::new(SourceCollector::mock_only(50)), NO_APIS),
            &["https://dashboard.example.com".to_string()],
            ClientThrottle::per_minute(100),
        );

        let request = Request::builder()
            .uri("/api/v1/health")
            .header("origin", "https://dashboard.example.com")
            .body(Body::empty())
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .expect("allow origin"),
            "https://dashboard.example.com"
        );

        let request = Request::builder()
            .uri("/api/v1/health")
            .header("origin", "https://elsewhere.example.com")
            .body(Body::empty())
            .expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }
}
