use super::types::{ErrorResponse, HealthResponse, SERVICE_BANNER};
use crate::grading::{CandidateRequest, GradeResult, Grader};
use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header},
    response::Json,
};
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Clone)]
pub struct AppState {
    pub grader: Arc<Grader>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: SERVICE_BANNER,
    })
}

pub async fn grade(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GradeResult>, (StatusCode, Json<ErrorResponse>)> {
    let body = body.map_err(|rejection| {
        warn!("Rejected grading request body: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorResponse::message(rejection.body_text())),
        )
    })?;

    let candidate = decode_candidate(&headers, &body).map_err(|(status, reason)| {
        warn!("Rejected grading request body: {}", reason);
        (status, Json(ErrorResponse::message(reason)))
    })?;

    match state.grader.grade(candidate).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                error!("Grading failed: {}", e);
            }
            Err((status, Json(ErrorResponse::from(&e))))
        }
    }
}

/// Turns the raw body into a candidate request.
///
/// Empty bodies and bodies without a JSON content type decode to an empty
/// request so the validator reports what is missing.
fn decode_candidate(
    headers: &HeaderMap,
    body: &[u8],
) -> Result<CandidateRequest, (StatusCode, String)> {
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CandidateRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        let status = if e.is_data() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::BAD_REQUEST
        };
        (
            status,
            format!("Failed to parse the request body as JSON: {}", e),
        )
    })
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}
