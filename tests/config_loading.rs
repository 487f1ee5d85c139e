use essay_grader::config::{self, RubricStrictness};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_load_reads_yaml_file_and_env() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    tokio::fs::write(
        &config_path,
        r#"
server:
  port: 9001
  body_limit_mb: 64
llm:
  api_key: file-key
  timeout_secs: 30
grading:
  rubric: lenient
  include_feedback: true
"#,
    )
    .await
    .unwrap();

    // Only this test touches the process environment.
    unsafe {
        std::env::set_var("CONFIG_PATH", &config_path);
        std::env::set_var("FIREWORKS_API_KEY", "env-key");
        std::env::remove_var("PORT");
        std::env::remove_var("LLM_BASE_URL");
    }

    let config = config::load().await.unwrap();

    assert_eq!(config.server.port, 9001);
    assert_eq!(config.server.body_limit_mb, 64);
    assert_eq!(config.llm.api_key, "env-key");
    assert_eq!(config.llm.timeout_secs, 30);
    assert_eq!(config.grading.rubric, RubricStrictness::Lenient);
    assert!(config.grading.include_feedback);
}
