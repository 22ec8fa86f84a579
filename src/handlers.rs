//! HTTP request handlers
//!
//! Handlers extract data from the request, call into the services and turn
//! the result into a response. Error-to-status mapping lives in
//! [`crate::errors`].

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::{ApiError, ApiResult};
use crate::models::{HealthResponse, PointsResponse, Receipt, ReceiptResponse};
use crate::services::receipt_service;
use crate::state::AppState;

/// Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Score a receipt and return the id its points are stored under
///
/// The body is taken as `Result` so malformed JSON is reported with our own
/// error codes instead of axum's plain-text rejection.
pub async fn process_receipt(
    State(state): State<AppState>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> ApiResult<Json<ReceiptResponse>> {
    let Json(receipt) = payload.map_err(|rejection| json_error(rejection, state.max_body_size))?;

    let signal = state.calculation_signal();
    let id = receipt_service::process_receipt(&state, &signal, receipt).await?;

    Ok(Json(ReceiptResponse { id }))
}

/// Points for a previously processed receipt
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    let points = receipt_service::get_points(&state, &id).await?;
    Ok(Json(PointsResponse { points }))
}

fn json_error(rejection: JsonRejection, limit: usize) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::RequestTooLarge { limit };
    }
    match rejection {
        JsonRejection::JsonDataError(err) => ApiError::InvalidReceiptData(err.body_text()),
        other => ApiError::InvalidJson(other.body_text()),
    }
}
