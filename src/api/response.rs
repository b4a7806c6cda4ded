//! API response helpers
//!
//! Every 4xx/5xx answer shares one body shape:
//! `{timestamp, status, error, message, path}`

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::service;

/// Hold data for a failed API interaction
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status to answer with
    status: StatusCode,

    /// Human readable description of the failure
    message: String,

    /// Path of the request that failed
    path: String,
}

impl ApiError {
    fn new<M>(status: StatusCode, message: M, path: &str) -> Self
    where
        M: ToString,
    {
        Self {
            status,
            message: message.to_string(),
            path: path.to_string(),
        }
    }

    pub fn bad_request<M>(message: M, path: &str) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::BAD_REQUEST, message, path)
    }

    pub fn unauthorized<M>(message: M, path: &str) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::UNAUTHORIZED, message, path)
    }

    pub fn not_found<M>(message: M, path: &str) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::NOT_FOUND, message, path)
    }

    pub fn conflict<M>(message: M, path: &str) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::CONFLICT, message, path)
    }

    pub fn internal_server_error<M>(message: M, path: &str) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, path)
    }

    /// Translate a service error for the boundary
    ///
    /// Collisions never get here, the service retries those itself; what is
    /// left maps one-to-one onto a status
    pub fn from_service(err: service::Error, path: &str) -> Self {
        match err {
            service::Error::InvalidTarget(_) => Self::bad_request(err, path),
            service::Error::NotFound => Self::not_found(err, path),
            service::Error::CodeSpaceExhausted(_) | service::Error::Storage(_) => {
                Self::internal_server_error(err, path)
            }
        }
    }
}

/// The wire shape of every error
#[derive(Serialize)]
struct ErrorBody {
    timestamp: DateTime<Utc>,
    status: u16,
    error: &'static str,
    message: String,
    path: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            timestamp: Utc::now(),
            status: self.status.as_u16(),
            error: self.status.canonical_reason().unwrap_or("Unknown"),
            message: self.message,
            path: self.path,
        };

        (self.status, Json(body)).into_response()
    }
}
