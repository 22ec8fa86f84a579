//! Error types
//!
//! Every layer has its own `thiserror` enum. They all funnel into
//! [`ApiError`], which owns the mapping to HTTP status codes and the stable
//! `RPxxxx` codes clients see.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::cancel::CancelCause;

/// Stable error codes exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // General errors (0000-0099)
    #[serde(rename = "RP0002")]
    InvalidJson,
    #[serde(rename = "RP0003")]
    Cancelled,
    #[serde(rename = "RP0004")]
    RequestTooLarge,

    // Validation errors (0100-0199)
    #[serde(rename = "RP0101")]
    InvalidReceiptData,
    #[serde(rename = "RP0102")]
    InvalidRetailer,
    #[serde(rename = "RP0103")]
    InvalidPurchaseDate,
    #[serde(rename = "RP0104")]
    InvalidPurchaseTime,
    #[serde(rename = "RP0105")]
    InvalidTotal,
    #[serde(rename = "RP0106")]
    MissingItems,
    #[serde(rename = "RP0108")]
    InvalidItemDescription,
    #[serde(rename = "RP0109")]
    InvalidItemPrice,

    // Storage errors (0200-0299)
    #[serde(rename = "RP0201")]
    ReceiptNotFound,
    #[serde(rename = "RP0202")]
    StorageFailure,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "RP0002",
            ErrorCode::Cancelled => "RP0003",
            ErrorCode::RequestTooLarge => "RP0004",
            ErrorCode::InvalidReceiptData => "RP0101",
            ErrorCode::InvalidRetailer => "RP0102",
            ErrorCode::InvalidPurchaseDate => "RP0103",
            ErrorCode::InvalidPurchaseTime => "RP0104",
            ErrorCode::InvalidTotal => "RP0105",
            ErrorCode::MissingItems => "RP0106",
            ErrorCode::InvalidItemDescription => "RP0108",
            ErrorCode::InvalidItemPrice => "RP0109",
            ErrorCode::ReceiptNotFound => "RP0201",
            ErrorCode::StorageFailure => "RP0202",
        }
    }

    /// Standard client-facing message for the code
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "Invalid JSON in request body",
            ErrorCode::Cancelled => "Request cancelled or timed out",
            ErrorCode::RequestTooLarge => "Request body too large",
            ErrorCode::InvalidReceiptData => "Invalid or missing receipt data",
            ErrorCode::InvalidRetailer => "Invalid or missing retailer name",
            ErrorCode::InvalidPurchaseDate => "Invalid purchase date format",
            ErrorCode::InvalidPurchaseTime => "Invalid purchase time format",
            ErrorCode::InvalidTotal => "Invalid total amount",
            ErrorCode::MissingItems => "Receipt must contain at least one item",
            ErrorCode::InvalidItemDescription => "Invalid item description",
            ErrorCode::InvalidItemPrice => "Invalid item price",
            ErrorCode::ReceiptNotFound => "Receipt not found",
            ErrorCode::StorageFailure => "Failed to store receipt data",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidJson
            | ErrorCode::InvalidReceiptData
            | ErrorCode::InvalidRetailer
            | ErrorCode::InvalidPurchaseDate
            | ErrorCode::InvalidPurchaseTime
            | ErrorCode::InvalidTotal
            | ErrorCode::MissingItems
            | ErrorCode::InvalidItemDescription
            | ErrorCode::InvalidItemPrice => StatusCode::BAD_REQUEST,
            ErrorCode::ReceiptNotFound => StatusCode::NOT_FOUND,
            ErrorCode::RequestTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::Cancelled => StatusCode::REQUEST_TIMEOUT,
            ErrorCode::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receipt failed structural validation
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("retailer is required")]
    Retailer,

    #[error("invalid purchase date {0:?}, expected YYYY-MM-DD")]
    PurchaseDate(String),

    #[error("invalid purchase time {0:?}, expected HH:MM")]
    PurchaseTime(String),

    #[error("at least one item is required")]
    MissingItems,

    #[error("short description is required")]
    ItemDescription,

    #[error("price must be a non-negative amount up to 999999999.99 with at most two decimals")]
    ItemPrice,

    #[error("item {position}: {source}")]
    Item {
        position: usize,
        source: Box<ValidationError>,
    },

    #[error("total must be a non-negative amount up to 999999999.99 with at most two decimals")]
    Total,
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::Retailer => ErrorCode::InvalidRetailer,
            ValidationError::PurchaseDate(_) => ErrorCode::InvalidPurchaseDate,
            ValidationError::PurchaseTime(_) => ErrorCode::InvalidPurchaseTime,
            ValidationError::MissingItems => ErrorCode::MissingItems,
            ValidationError::ItemDescription => ErrorCode::InvalidItemDescription,
            ValidationError::ItemPrice => ErrorCode::InvalidItemPrice,
            ValidationError::Item { source, .. } => source.code(),
            ValidationError::Total => ErrorCode::InvalidTotal,
        }
    }
}

/// The only way a scoring pass can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("computation cancelled: {cause}")]
    Cancelled {
        #[source]
        cause: CancelCause,
    },
}

impl From<CancelCause> for CalculationError {
    fn from(cause: CancelCause) -> Self {
        CalculationError::Cancelled { cause }
    }
}

/// Score store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("receipt {0} not found")]
    NotFound(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Top-level error returned by handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("invalid receipt data: {0}")]
    InvalidReceiptData(String),

    #[error("request body exceeds {limit} bytes")]
    RequestTooLarge { limit: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Calculation(#[from] CalculationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::InvalidJson(_) => ErrorCode::InvalidJson,
            ApiError::InvalidReceiptData(_) => ErrorCode::InvalidReceiptData,
            ApiError::RequestTooLarge { .. } => ErrorCode::RequestTooLarge,
            ApiError::Validation(e) => e.code(),
            ApiError::Calculation(CalculationError::Cancelled { .. }) => ErrorCode::Cancelled,
            ApiError::Store(StoreError::NotFound(_)) => ErrorCode::ReceiptNotFound,
            ApiError::Store(StoreError::Backend(_)) => ErrorCode::StorageFailure,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = code.status();

        if status.is_server_error() {
            tracing::error!(error_code = %code, error_detail = %self, "application error occurred");
        } else {
            tracing::warn!(error_code = %code, error_detail = %self, "request rejected");
        }

        let body = ErrorResponse {
            code,
            message: code.message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;
