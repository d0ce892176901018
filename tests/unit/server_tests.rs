/*!
 * Tests for the HTTP routes, driven through the router with a mock engine
 */

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use base64::Engine as _;
use serde_json::Value;
use tower::ServiceExt;

use speakd::app_config::Config;
use speakd::server::router;
use speakd::tts_engine::mock::MockTtsEngine;

use crate::common;

/// Build a JSON POST request against /tts
fn tts_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/tts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body back into JSON
async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Test that blank text is rejected before the engine is ever invoked
#[tokio::test]
async fn test_tts_route_withBlankText_shouldReturn400() {
    let engine = Arc::new(MockTtsEngine::working());
    let app = router(common::test_state(engine.clone()));

    let response = app
        .oneshot(tts_request(r#"{"text": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("text"));
    assert_eq!(engine.calls(), 0);
}

/// Test that a missing text field is rejected
#[tokio::test]
async fn test_tts_route_withMissingText_shouldReturn400() {
    let app = router(common::test_state(Arc::new(MockTtsEngine::working())));

    let response = app.oneshot(tts_request(r#"{}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Test that over-length text is rejected
#[tokio::test]
async fn test_tts_route_withOverlongText_shouldReturn400() {
    let config = Config {
        max_text_length: 10,
        ..Config::default()
    };
    let app = router(common::test_state_with_config(
        Arc::new(MockTtsEngine::working()),
        config,
    ));

    let response = app
        .oneshot(tts_request(
            r#"{"text": "this text is longer than ten characters"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("10"));
}

/// Test the successful synthesis response shape without subtitles
#[tokio::test]
async fn test_tts_route_withoutSubtitles_shouldReturnAudioOnly() {
    let app = router(common::test_state(Arc::new(MockTtsEngine::working())));

    let response = app
        .oneshot(tts_request(r#"{"text": "Hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    assert_eq!(body["contentType"], "audio/mpeg");
    assert!(body.get("subtitles").is_none());

    let audio = base64::engine::general_purpose::STANDARD
        .decode(body["audio"].as_str().unwrap())
        .unwrap();
    assert!(audio.starts_with(b"MOCKMPEG"));
}

/// Test the successful synthesis response with parsed subtitles
#[tokio::test]
async fn test_tts_route_withSubtitles_shouldEmbedParsedCues() {
    let app = router(common::test_state(Arc::new(MockTtsEngine::working())));

    let response = app
        .oneshot(tts_request(r#"{"text": "Hello", "withSubtitles": true}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    let subtitles = body["subtitles"].as_array().unwrap();
    assert_eq!(subtitles.len(), 1);
    assert_eq!(subtitles[0]["start"], 0.0);
    assert_eq!(subtitles[0]["end"], 2.5);
    assert_eq!(subtitles[0]["text"], "Hello world");
}

/// Test that an engine failure maps to 502 with the uniform error shape
#[tokio::test]
async fn test_tts_route_withFailingEngine_shouldReturn502() {
    let app = router(common::test_state(Arc::new(MockTtsEngine::failing())));

    let response = app
        .oneshot(tts_request(r#"{"text": "Hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("engine"));
}

/// Test that an unreachable engine binary also maps to 502
#[tokio::test]
async fn test_tts_route_withUnreachableEngine_shouldReturn502() {
    let app = router(common::test_state(Arc::new(MockTtsEngine::unreachable())));

    let response = app
        .oneshot(tts_request(r#"{"text": "Hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

/// Test that an unparseable caption track fails the whole request
#[tokio::test]
async fn test_tts_route_withMalformedCaptions_shouldReturn500() {
    let app = router(common::test_state(Arc::new(
        MockTtsEngine::malformed_captions(),
    )));

    let response = app
        .oneshot(tts_request(r#"{"text": "Hello", "withSubtitles": true}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Malformed timestamp"));
}

/// Test the voice catalog route
#[tokio::test]
async fn test_voices_route_withWorkingEngine_shouldListCatalog() {
    let app = router(common::test_state(Arc::new(MockTtsEngine::working())));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/voices")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    let voices = body["voices"].as_array().unwrap();
    assert_eq!(voices.len(), 2);
    assert_eq!(voices[0]["name"], "ko-KR-SunHiNeural");
    assert_eq!(voices[1]["gender"], "Male");
}

/// Test the liveness probe
#[tokio::test]
async fn test_health_route_withAnyEngine_shouldReturnOk() {
    let app = router(common::test_state(Arc::new(MockTtsEngine::failing())));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
}
