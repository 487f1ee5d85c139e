mod normalizer;
mod prompt;
mod types;
mod validator;

pub use normalizer::{normalize, strip_code_fences};
pub use prompt::{IMAGE_PLACEHOLDER, build_content, render_prompt, to_data_uri};
pub use types::*;
pub use validator::validate;

use crate::{Result, config::GradingConfig, llm::LlmClient};
use std::sync::Arc;
use tracing::{info, instrument};

/// Runs one grading request: validate, build the prompt, call the provider and
/// normalize its answer. Holds no per-request state, so one instance serves all
/// concurrent requests.
pub struct Grader {
    llm_client: Arc<dyn LlmClient>,
    config: GradingConfig,
}

impl Grader {
    pub fn new(llm_client: Arc<dyn LlmClient>, config: GradingConfig) -> Self {
        Self { llm_client, config }
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    #[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
    pub async fn grade(&self, candidate: CandidateRequest) -> Result<GradeResult> {
        let request = validate(candidate)?;
        let page_count = request.images.len();

        let content = build_content(&request, &self.config);
        let completion = self.llm_client.complete(content).await?;

        let result = normalize(&completion, &self.config)?;

        info!(
            "Graded {} page(s): score {}, {} annotated error(s)",
            page_count,
            result.score,
            result.errors.len()
        );

        Ok(result)
    }
}
