// HTTP request handlers

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use super::middleware::{panic_response, rate_limit_middleware};
use super::MindcheckServer;
use crate::analysis::AnalysisResult;
use crate::errors::{ApiResponse, AppError};
use crate::questionnaire::validate;

/// Create the main application router
pub fn create_router(server: Arc<MindcheckServer>) -> Router {
    let config = server.config().clone();
    let limiter = Arc::clone(server.rate_limiter());

    // Rate limiting applies to /api routes only
    let api = Router::new()
        .route("/api/analyze", post(handle_analyze))
        .route_layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(api)
        .fallback(not_found)
        .with_state(server)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(cors_layer(&config.cors_origins))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

/// Handle GET /health
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handle POST /api/analyze - validate, analyze, return the report
async fn handle_analyze(
    State(server): State<Arc<MindcheckServer>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalysisResult>>, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("analyze", request_id = %request_id);

    async move {
        let Json(payload) = payload.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::MalformedBody(rejection.body_text())
            }
        })?;

        let input = validate(&payload)?;
        tracing::info!(
            language = %input.language,
            has_open_response = input.has_open_response(),
            "Submission validated"
        );

        let outcome = server.analyzer().analyze_detailed(&input).await;
        tracing::info!(
            source = ?outcome.source,
            force_urgent = outcome.force_urgent,
            risk_level = %outcome.result.risk_level,
            "Analysis complete"
        );

        Ok(Json(ApiResponse::ok(outcome.result)))
    }
    .instrument(span)
    .await
}

/// Fallback for unknown routes
async fn not_found() -> AppError {
    AppError::NotFound
}
