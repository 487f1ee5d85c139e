pub mod handlers;
mod types;

pub use types::{ErrorResponse, HealthResponse, SERVICE_BANNER};

use crate::{
    Result,
    config::{Config, ServerConfig},
    grading::Grader,
    llm::OpenAiClient,
};
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use handlers::AppState;
use std::{any::Any, net::SocketAddr, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

pub async fn run(config: Config) -> Result<()> {
    let llm_client = Arc::new(OpenAiClient::new(config.llm.clone()));
    let grader = Grader::new(llm_client, config.grading.clone());

    let app_state = AppState {
        grader: Arc::new(grader),
    };

    let app = router(app_state, &config.server);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting server on {} (body limit {} MB, model {})",
        addr, config.server.body_limit_mb, config.llm.model
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes plus the transport concerns: body limit, CORS, tracing and panic capture.
pub fn router(app_state: AppState, server: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(handlers::health))
        .route("/grade", post(handlers::grade))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(server.body_limit_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown fault".to_string()
    };

    error!("Request handler panicked: {}", details);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::message(details)),
    )
        .into_response()
}
