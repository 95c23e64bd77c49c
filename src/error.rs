//! Service error type with HTTP status code mapping.
//!
//! [`HubError`] is the single error type flowing out of the domain,
//! storage and service layers. Each variant maps to an HTTP status code
//! and a JSON body of the form:
//!
//! ```json
//! { "error": "latitude is required", "code": 1001 }
//! ```
//!
//! Server-side failures never leak their detail to the client: the body
//! carries a generic message and the detail is logged instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Numeric error code.
    pub code: u32,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category  | HTTP Status                 |
/// |-----------|-----------|-----------------------------|
/// | 1000–1999 | Validation| 400 Bad Request             |
/// | 2000–2999 | Not Found | 404 Not Found               |
/// | 3000–3999 | Server    | 500 / 503                   |
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Missing, malformed or out-of-range request parameter.
    #[error("{0}")]
    InvalidArgument(String),

    /// No public event with the given id.
    #[error("event not found: {0}")]
    EventNotFound(uuid::Uuid),

    /// The backing store could not be read (connection, timeout, ...).
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Any other server-side failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HubError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidArgument(_) => 1001,
            Self::EventNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::UpstreamUnavailable(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client.
    fn public_message(&self) -> String {
        match self {
            Self::InvalidArgument(_) | Self::EventNotFound(_) => self.to_string(),
            Self::UpstreamUnavailable(_) | Self::Internal(_) => "internal error".to_string(),
        }
    }
}

impl From<sqlx::Error> for HubError {
    fn from(err: sqlx::Error) -> Self {
        Self::UpstreamUnavailable(err.to_string())
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = ErrorResponse {
            error: self.public_message(),
            code: self.error_code(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
