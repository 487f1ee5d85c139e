use super::types::{CandidateRequest, GradeRequest};
use crate::error::ValidationError;
use tracing::info;

const QUESTION_PREVIEW_CHARS: usize = 50;

/// Checks the structural preconditions of a grading request.
pub fn validate(candidate: CandidateRequest) -> Result<GradeRequest, ValidationError> {
    let question = match candidate.question {
        Some(question) if !question.is_empty() => question,
        _ => return Err(ValidationError::MissingQuestion),
    };

    let images = match candidate.images {
        Some(images) if !images.is_empty() => images,
        _ => return Err(ValidationError::MissingImages),
    };

    info!(
        "Received submission for question: {}... with {} images",
        question_preview(&question),
        images.len()
    );

    Ok(GradeRequest { question, images })
}

fn question_preview(question: &str) -> &str {
    match question.char_indices().nth(QUESTION_PREVIEW_CHARS) {
        Some((idx, _)) => &question[..idx],
        None => question,
    }
}
