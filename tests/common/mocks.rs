use async_trait::async_trait;
use essay_grader::{
    Error, Result,
    error::ProviderError,
    llm::{LlmClient, MultimodalContent},
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted provider: hands out queued replies in order and records every request.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    pub replies: Arc<Mutex<VecDeque<Result<String>>>>,
    pub requests: Arc<Mutex<Vec<MultimodalContent>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completion(self, completion: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(completion.into()));
        self
    }

    pub fn with_error(self, error: impl Into<Error>) -> Self {
        self.replies.lock().unwrap().push_back(Err(error.into()));
        self
    }

    pub fn rejecting(status: u16, body: &str) -> Self {
        Self::new().with_error(ProviderError::Rejected {
            status,
            body: body.to_string(),
        })
    }

    pub fn get_requests(&self) -> Vec<MultimodalContent> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, content: MultimodalContent) -> Result<String> {
        self.requests.lock().unwrap().push(content);

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::llm("No more mock responses available")))
    }
}

/// Provider whose adapter blows up mid-request.
#[derive(Debug)]
pub struct PanickingLlmClient {
    pub message: &'static str,
}

#[async_trait]
impl LlmClient for PanickingLlmClient {
    async fn complete(&self, _content: MultimodalContent) -> Result<String> {
        panic!("{}", self.message);
    }
}
