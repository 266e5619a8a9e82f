//! Error handling module for the Ireizo API.
//!
//! Every failure maps to an HTTP status and a single-key JSON body naming the
//! condition and the offending record ID or upstream status. Details stay in
//! the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::ddr::DdrError;

/// Response body keys.
pub mod keys {
    pub const NOT_FOUND: &str = "irei record not found";
    pub const NO_PERSON: &str = "irei record has no person";
    pub const NO_DDR_OBJECTS: &str = "irei record has no ddr objects";
    pub const UPSTREAM_STATUS: &str = "Internal query HTTP status";
    pub const UPSTREAM_TIMEOUT: &str = "Internal query timed out";
    pub const UPSTREAM_UNREACHABLE: &str = "Internal query failed";
    pub const UPSTREAM_INVALID: &str = "Internal query returned invalid data";
    pub const DOCSTORE_UNAVAILABLE: &str = "docstore unavailable";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// No record with this ID in the index
    NotFound(String),
    /// DDR API answered with a non-2xx status
    UpstreamStatus(StatusCode),
    /// DDR API could not be queried for this record
    Upstream { irei_id: String, error: DdrError },
    /// Docstore could not be read
    Docstore { irei_id: String, reason: String },
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamStatus(status) => *status,
            AppError::Upstream { error, .. } => match error {
                DdrError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                DdrError::Unreachable(_) | DdrError::InvalidBody(_) => StatusCode::BAD_GATEWAY,
            },
            AppError::Docstore { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get the response body key for this error.
    pub fn error_key(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => keys::NOT_FOUND,
            AppError::UpstreamStatus(_) => keys::UPSTREAM_STATUS,
            AppError::Upstream { error, .. } => match error {
                DdrError::Timeout(_) => keys::UPSTREAM_TIMEOUT,
                DdrError::Unreachable(_) => keys::UPSTREAM_UNREACHABLE,
                DdrError::InvalidBody(_) => keys::UPSTREAM_INVALID,
            },
            AppError::Docstore { .. } => keys::DOCSTORE_UNAVAILABLE,
        }
    }

    /// Get the value reported under the error key.
    pub fn error_value(&self) -> Value {
        match self {
            AppError::NotFound(id) => json!(id),
            AppError::UpstreamStatus(status) => json!(status.as_u16()),
            AppError::Upstream { irei_id, .. } => json!(irei_id),
            AppError::Docstore { irei_id, .. } => json!(irei_id),
        }
    }

    /// Response body for this error.
    pub fn body(&self) -> Value {
        single_key_body(self.error_key(), self.error_value())
    }
}

/// A JSON object holding one condition key.
pub fn single_key_body(key: &str, value: impl Into<Value>) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(key.to_string(), value.into());
    Value::Object(body)
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(id) => write!(f, "{}: {}", keys::NOT_FOUND, id),
            AppError::UpstreamStatus(status) => write!(f, "{}: {}", keys::UPSTREAM_STATUS, status),
            AppError::Upstream { irei_id, error } => write!(f, "{} ({})", error, irei_id),
            AppError::Docstore { irei_id, reason } => {
                write!(f, "{}: {} ({})", keys::DOCSTORE_UNAVAILABLE, reason, irei_id)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}
