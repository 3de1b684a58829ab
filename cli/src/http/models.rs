//! HTTP API数据模型

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use listkeeper_core::api::{ItemList, RegistryError, StoreError};
use serde::Serialize;

// ============= Move =============

/// Where an item goes relative to another item of the same list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveTarget {
    After(String),
    Before(String),
}

// ============= Health =============

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: f64,
    pub requests_handled: u64,
    pub errors_total: u64,
    pub lists: usize,
    pub timestamp: String,
}

/// Full list body, items included.
pub fn list_response(list: &ItemList) -> Response {
    Json(list).into_response()
}

// ============= Error Handling =============

#[derive(Debug)]
pub enum HttpServerError {
    InvalidRequest(String),
    NotFound(String),
    CapacityExceeded(String),
    TextTooLong(String),
    DuplicateId(String),
    Internal(String),
}

impl From<StoreError> for HttpServerError {
    fn from(e: StoreError) -> Self {
        let msg = e.to_string();
        match e {
            StoreError::NotFound(_) => Self::NotFound(msg),
            StoreError::CapacityExceeded { .. } => Self::CapacityExceeded(msg),
            StoreError::TextTooLong { .. } => Self::TextTooLong(msg),
            StoreError::DuplicateId(_) => Self::DuplicateId(msg),
            StoreError::EmptyId => Self::InvalidRequest(msg),
            StoreError::IdGeneration(_) => Self::Internal(msg),
        }
    }
}

impl From<RegistryError> for HttpServerError {
    fn from(e: RegistryError) -> Self {
        let msg = e.to_string();
        match e {
            RegistryError::NotFound(_) => Self::NotFound(msg),
            RegistryError::TooManyLists { .. } => Self::CapacityExceeded(msg),
            RegistryError::IdGeneration(_) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Self::InvalidRequest(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_REQUEST", msg)
            }
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            Self::CapacityExceeded(msg) => (StatusCode::CONFLICT, "CAPACITY_EXCEEDED", msg),
            Self::TextTooLong(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "TEXT_TOO_LONG", msg),
            Self::DuplicateId(msg) => (StatusCode::CONFLICT, "DUPLICATE_ID", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = serde_json::json!({
            "success": false,
            "error": message,
            "error_code": error_code,
        });

        (status, Json(body)).into_response()
    }
}
