use super::mocks::MockLlmClient;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use essay_grader::{
    config::{Config, GradingConfig, LlmConfig, LogsConfig, ServerConfig},
    grading::Grader,
    llm::LlmClient,
    server::{handlers::AppState, router},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

/// Base64 of a few PNG header bytes; enough to stand in for a scanned page.
pub const PAGE_ONE: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAAB";
pub const PAGE_TWO: &str = "data:image/png;base64,R0lGODlhAQABAIAAAAAAAP";

pub const HOLIDAY_COMPLETION: &str = "```json\n{\"score\":7,\"errors\":[{\"page\":1,\"line\":3,\"text\":\"I go there every year.\",\"issue\":\"tense error\",\"fix\":\"I went there every year.\"}]}\n```";

pub fn holiday_result() -> Value {
    json!({
        "score": 7,
        "errors": [{
            "page": 1,
            "line": 3,
            "text": "I go there every year.",
            "issue": "tense error",
            "fix": "I went there every year."
        }]
    })
}

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            body_limit_mb: 100,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        llm: LlmConfig {
            api_key: "test-api-key".to_string(),
            ..LlmConfig::default()
        },
        grading: GradingConfig::default(),
    }
}

pub fn create_test_app(mock: Arc<MockLlmClient>) -> Router {
    create_test_app_with(mock, &create_test_config())
}

pub fn create_test_app_with(mock: Arc<MockLlmClient>, config: &Config) -> Router {
    create_test_app_for(mock, config)
}

pub fn create_test_app_for(llm_client: Arc<dyn LlmClient>, config: &Config) -> Router {
    let grader = Grader::new(llm_client, config.grading.clone());
    router(
        AppState {
            grader: Arc::new(grader),
        },
        &config.server,
    )
}

pub fn grade_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/grade")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
