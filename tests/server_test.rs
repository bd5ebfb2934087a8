// Integration tests for the HTTP server

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use mindcheck::analysis::{fallback, Analyzer, SafetyOverride};
use mindcheck::config::ServerConfig;
use mindcheck::providers::{GenerationRequest, LlmProvider, ProviderError};
use mindcheck::questionnaire::Language;
use mindcheck::server::{create_router, MindcheckServer};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Provider that always answers with a calm, well-formed report
struct CalmProvider;

#[async_trait]
impl LlmProvider for CalmProvider {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, ProviderError> {
        let mut report = fallback(Language::En, false);
        report.summary = "Model report".to_string();
        Ok(serde_json::to_string(&report).unwrap())
    }

    fn name(&self) -> &str {
        "calm"
    }

    fn model(&self) -> &str {
        "calm-model"
    }
}

fn app_with(config: ServerConfig) -> Router {
    let analyzer = Analyzer::new(Arc::new(CalmProvider), SafetyOverride::default());
    create_router(Arc::new(MindcheckServer::new(analyzer, config)))
}

fn app() -> Router {
    app_with(ServerConfig::default())
}

fn valid_body() -> Value {
    json!({
        "mood": "good",
        "sleep": "good",
        "energy": "normal",
        "concentration": "good",
        "socialInteraction": "enjoy",
        "appetite": "normal",
        "hopelessness": "neutral",
        "anxiety": "occasional",
        "physicalSymptoms": "none",
        "dailyActivities": "normal",
        "openResponse": "",
        "language": "en"
    })
}

fn analyze_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_analyze_returns_report() {
    let response = app()
        .oneshot(analyze_request(valid_body().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["summary"], "Model report");
    assert_eq!(body["data"]["riskLevel"], "moderate");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_analyze_forces_urgent_for_very_dark() {
    let mut payload = valid_body();
    payload["hopelessness"] = json!("very-dark");

    let response = app()
        .oneshot(analyze_request(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["riskLevel"], "urgent");
    assert_eq!(body["data"]["urgentHelp"], true);
    assert_eq!(body["data"]["crisisResources"]["show"], true);
}

#[tokio::test]
async fn test_invalid_submission_lists_fields() {
    let mut payload = valid_body();
    payload["mood"] = json!("ecstatic");
    payload.as_object_mut().unwrap().remove("sleep");

    let response = app()
        .oneshot(analyze_request(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid input data"));

    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["field"].as_str())
        .collect();
    assert!(fields.contains(&"mood"));
    assert!(fields.contains(&"sleep"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let response = app()
        .oneshot(analyze_request("{\"mood\": "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut payload = valid_body();
    payload["openResponse"] = json!("a".repeat(20 * 1024));

    let response = app()
        .oneshot(analyze_request(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = app()
        .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body, json!({"success": false, "error": "Endpoint not found"}));
}

#[tokio::test]
async fn test_rate_limit_applies_to_api_routes() {
    let app = app_with(ServerConfig {
        rate_limit_max_requests: 2,
        ..ServerConfig::default()
    });

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(analyze_request(valid_body().to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(analyze_request(valid_body().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));
    let body = json_body(response).await;
    assert_eq!(body["error"], "Too many requests. Please try again later.");

    // Health is outside the limited routes
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allows_configured_origin_only() {
    let request = |origin: &str| {
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    };

    let response = app().oneshot(request("http://localhost:5173")).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );

    let response = app().oneshot(request("http://evil.example")).await.unwrap();
    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
