//! Full stack: router, grader and the real HTTP provider client against a fake provider.

use axum::http::StatusCode;
use essay_grader::{
    config::LlmConfig,
    grading::Grader,
    llm::OpenAiClient,
    server::{handlers::AppState, router},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

mod common;

use common::test_utils::*;

async fn app_against(server: &MockServer) -> axum::Router {
    let config = create_test_config();
    let client = OpenAiClient::new(LlmConfig {
        base_url: server.uri(),
        ..config.llm.clone()
    });
    let grader = Grader::new(Arc::new(client), config.grading.clone());
    router(
        AppState {
            grader: Arc::new(grader),
        },
        &config.server,
    )
}

#[tokio::test]
async fn test_holiday_example_through_http_provider() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cmpl-7",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": HOLIDAY_COMPLETION},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        app_against(&server).await,
        grade_request(&json!({
            "question": "Describe your best holiday.",
            "images": [PAGE_ONE]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, holiday_result());
}

#[tokio::test]
async fn test_provider_error_text_reaches_the_caller() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limit exceeded for account"))
        .mount(&server)
        .await;

    let (status, body) = send(
        app_against(&server).await,
        grade_request(&json!({"question": "My hometown", "images": [PAGE_ONE]})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "error": "Failed to communicate with AI provider",
            "details": "rate limit exceeded for account"
        })
    );
}

#[tokio::test]
async fn test_validation_failure_never_reaches_provider() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = send(
        app_against(&server).await,
        grade_request(&json!({"question": "My hometown", "images": []})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No images provided"}));
}
