// Integration tests for the Gemini client against a mock HTTP server

use mindcheck::analysis::{AnalysisError, AnalysisSource, Analyzer, RiskLevel, SafetyOverride};
use mindcheck::providers::{GeminiProvider, GenerationRequest, LlmProvider, ProviderError};
use mindcheck::questionnaire::validate;
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn provider(server: &mockito::ServerGuard) -> GeminiProvider {
    GeminiProvider::new("test-key".to_string())
        .unwrap()
        .with_base_url(server.url())
}

fn gemini_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

fn report_json() -> String {
    json!({
        "riskLevel": "moderate",
        "urgentHelp": false,
        "summary": "Some signs of fatigue.",
        "mainConcerns": [{"area": "Sleep", "description": "Irregular sleep", "severity": "mild"}],
        "positiveAspects": ["Sought help"],
        "suggestedTopics": ["Sleep hygiene"],
        "psychoEducation": {
            "title": "Sleep",
            "content": "Regular sleep helps mood.",
            "suggestedReading": ["Why We Sleep"]
        },
        "recommendations": [{"priority": "short-term", "action": "Keep a sleep diary"}],
        "crisisResources": {"show": false, "message": ""}
    })
    .to_string()
}

#[tokio::test]
async fn test_generate_sends_key_and_generation_config() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": "system text"}, {"text": "user text"}]
            }],
            "generationConfig": {"maxOutputTokens": 2000}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body("hello"))
        .create_async()
        .await;

    let text = provider(&server)
        .generate(&GenerationRequest::new("system text", "user text"))
        .await
        .unwrap();

    assert_eq!(text, "hello");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal")
        .create_async()
        .await;

    let err = provider(&server)
        .generate(&GenerationRequest::new("s", "u"))
        .await
        .unwrap_err();

    match err {
        ProviderError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_candidates_is_empty_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let err = provider(&server)
        .generate(&GenerationRequest::new("s", "u"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::EmptyResponse { .. }));
}

#[tokio::test]
async fn test_missing_key_never_calls_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let provider = GeminiProvider::new(String::new())
        .unwrap()
        .with_base_url(server.url());
    let err = provider
        .generate(&GenerationRequest::new("s", "u"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NotConfigured { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let provider = GeminiProvider::new("test-key".to_string())
        .unwrap()
        .with_base_url("http://127.0.0.1:1");

    let err = provider
        .generate(&GenerationRequest::new("s", "u"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport { .. }));
}

fn submission(hopelessness: &str) -> mindcheck::questionnaire::QuestionnaireInput {
    validate(&json!({
        "mood": "bad",
        "sleep": "irregular",
        "energy": "low",
        "concentration": "moderate",
        "socialInteraction": "reduced",
        "appetite": "normal",
        "hopelessness": hopelessness,
        "anxiety": "frequent",
        "physicalSymptoms": "minimal",
        "dailyActivities": "slight-difficulty",
        "language": "en"
    }))
    .unwrap()
}

#[tokio::test]
async fn test_analyzer_accepts_fenced_gemini_output() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(&format!("```json\n{}\n```", report_json())))
        .create_async()
        .await;

    let analyzer = Analyzer::new(Arc::new(provider(&server)), SafetyOverride::default());
    let outcome = analyzer.analyze_detailed(&submission("some-worry")).await;

    assert_eq!(outcome.source, AnalysisSource::Model);
    assert_eq!(outcome.result.risk_level, RiskLevel::Moderate);
    assert_eq!(outcome.result.summary, "Some signs of fatigue.");
    assert_eq!(
        outcome.result.psycho_education.suggested_reading[0].title,
        "Why We Sleep"
    );
}

#[tokio::test]
async fn test_analyzer_reports_invalid_shape() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(r#"{"riskLevel": "low"}"#))
        .create_async()
        .await;

    let analyzer = Analyzer::new(Arc::new(provider(&server)), SafetyOverride::default());
    let err = analyzer
        .request_candidate(&submission("neutral"))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InvalidShape(_)));
    assert_eq!(err.kind(), "invalid_shape");
}

#[tokio::test]
async fn test_server_error_with_very_dark_still_urgent() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let analyzer = Analyzer::new(Arc::new(provider(&server)), SafetyOverride::default());
    let outcome = analyzer.analyze_detailed(&submission("very-dark")).await;

    assert_eq!(outcome.source, AnalysisSource::Fallback);
    assert_eq!(outcome.result.risk_level, RiskLevel::Urgent);
    assert!(outcome.result.crisis_resources.show);
    assert!(outcome.result.crisis_resources.message.contains("988"));
}
