use super::types::GradeResult;
use crate::config::GradingConfig;
use crate::error::NormalizationError;
use serde_json::Value;
use tracing::error;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Removes markdown code fences from a completion that starts with a ```json fence.
///
/// Every fence marker is removed, not only the outer pair: models also scatter them
/// inside the body.
pub fn strip_code_fences(raw: &str) -> String {
    if raw.starts_with(JSON_FENCE) {
        raw.replace(JSON_FENCE, "").replace(FENCE, "")
    } else {
        raw.to_string()
    }
}

/// Decodes a completion into a [`GradeResult`], rejecting anything that is not valid
/// JSON or does not match the grading schema.
pub fn normalize(raw: &str, config: &GradingConfig) -> Result<GradeResult, NormalizationError> {
    let cleaned = strip_code_fences(raw);

    let value: Value = match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to parse AI response ({}): {}", e, cleaned);
            return Err(NormalizationError::InvalidJson { raw: cleaned });
        }
    };

    check_schema(value, config).map_err(|reason| {
        error!("AI response does not match grading schema: {}", reason);
        NormalizationError::SchemaMismatch {
            reason,
            raw: cleaned,
        }
    })
}

fn check_schema(value: Value, config: &GradingConfig) -> Result<GradeResult, String> {
    let Some(object) = value.as_object() else {
        return Err("expected a JSON object".to_string());
    };

    // `null` would decode to an absent field and vanish from the response.
    if object.get("feedback").is_some_and(Value::is_null) {
        return Err("feedback must be a string".to_string());
    }

    let result: GradeResult = serde_json::from_value(value).map_err(|e| e.to_string())?;

    match result.score_value() {
        Some(score) if (0.0..=10.0).contains(&score) => {}
        _ => return Err(format!("score {} is outside [0, 10]", result.score)),
    }

    for (idx, annotation) in result.errors.iter().enumerate() {
        if annotation.page == 0 {
            return Err(format!("errors[{}].page must be a positive integer", idx));
        }
        if annotation.line == 0 {
            return Err(format!("errors[{}].line must be a positive integer", idx));
        }
    }

    if config.include_feedback && result.feedback.is_none() {
        return Err("missing feedback".to_string());
    }

    Ok(result)
}
