use crate::error::{Error, NormalizationError, ProviderError};
use serde::Serialize;

pub const SERVICE_BANNER: &str = "English Grader Backend is running";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Error body of every failed request. `details` carries provider diagnostics and
/// `raw` the completion text that could not be decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ErrorResponse {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            raw: None,
        }
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation(e) => Self::message(e.to_string()),
            Error::Provider(e) => match e {
                ProviderError::Rejected { body, .. } => {
                    Self::message("Failed to communicate with AI provider").with_details(body)
                }
                ProviderError::Unreachable(reason) => {
                    Self::message("Failed to communicate with AI provider").with_details(reason)
                }
                ProviderError::Timeout { .. } => {
                    Self::message("AI provider timed out").with_details(e.to_string())
                }
                ProviderError::MalformedEnvelope { body } => {
                    Self::message("Unexpected response from AI provider").with_details(body)
                }
            },
            Error::Normalization(e) => match e {
                NormalizationError::InvalidJson { raw } => {
                    Self::message("Invalid JSON response from AI").with_raw(raw)
                }
                NormalizationError::SchemaMismatch { reason, raw } => {
                    Self::message("AI response does not match the grading schema")
                        .with_details(reason)
                        .with_raw(raw)
                }
            },
            other => Self::message(other.to_string()),
        }
    }
}
