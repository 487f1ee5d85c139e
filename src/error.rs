use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),
}

/// Structural problems with an incoming grading request. Always the caller's fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No question provided")]
    MissingQuestion,

    #[error("No images provided")]
    MissingImages,
}

/// Failures talking to the inference provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("AI provider unreachable: {0}")]
    Unreachable(String),

    #[error("AI provider rejected the request with status {status}")]
    Rejected { status: u16, body: String },

    #[error("AI provider returned an unexpected response envelope")]
    MalformedEnvelope { body: String },

    #[error("AI provider did not answer within {seconds}s")]
    Timeout { seconds: u64 },
}

/// The completion could not be turned into a grading result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationError {
    #[error("Invalid JSON response from AI")]
    InvalidJson { raw: String },

    #[error("AI response does not match the grading schema: {reason}")]
    SchemaMismatch { reason: String, raw: String },
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// HTTP status the grading endpoint answers with for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
