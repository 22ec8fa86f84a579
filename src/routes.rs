//! API Routes

use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Response,
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{error, info, warn, Level, Span};

use crate::handlers::*;
use crate::state::AppState;

/// One line per request, levelled by status class. Method and path come
/// from the enclosing request span.
fn log_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    let status = response.status();
    let latency_ms = latency.as_millis() as u64;
    if status.is_server_error() {
        error!(status = status.as_u16(), latency_ms, "request failed");
    } else if status.is_client_error() {
        warn!(status = status.as_u16(), latency_ms, "request rejected");
    } else {
        info!(status = status.as_u16(), latency_ms, "request completed");
    }
}

/// Create the API router with all routes
pub fn create_router(app_state: AppState) -> Router {
    let max_body_size = app_state.max_body_size;

    Router::new()
        .route("/health", get(health))
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(log_response),
        )
        .with_state(app_state)
}
