use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Request body as delivered by the HTTP layer, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

/// A request that passed validation: non-empty question, at least one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRequest {
    pub question: String,
    /// Base64 payloads or data URIs, in reading order.
    pub images: Vec<String>,
}

/// Canonical grading result.
///
/// `score` keeps the number exactly as the model wrote it and unknown fields are
/// kept in `extra`, so serializing a decoded result reproduces the model's document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    pub score: Number,
    pub errors: Vec<ErrorAnnotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorAnnotation {
    pub page: u32,
    /// Approximate line number on the page.
    pub line: u32,
    pub text: String,
    pub issue: String,
    pub fix: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GradeResult {
    pub fn score_value(&self) -> Option<f64> {
        self.score.as_f64()
    }
}
