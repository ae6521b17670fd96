//! HTTP error mapping.
//!
//! Every failure leaves the service as `{"detail": "..."}` with the status
//! code of its class. Internal failures carry only a generic message; the
//! cause is logged where it happens.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode};
use itemdeck_core::ErrorBody;

/// Detail returned with every 429.
pub const RATE_LIMIT_DETAIL: &str = "Rate limit exceeded. Try again later.";

/// Detail returned when an id fails the format check.
pub const INVALID_ID_DETAIL: &str = "Invalid item_id format.";

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed path parameter.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request body could not be decoded.
    #[error("rejected body ({status}): {detail}")]
    Rejected {
        /// Status chosen by the body extractor
        status: StatusCode,
        /// Extractor message
        detail: String,
    },

    /// No matching record.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Client exhausted its budget for this route.
    #[error("rate limited, retry in {retry_after_secs}s")]
    RateLimited {
        /// Seconds until the oldest request leaves the window
        retry_after_secs: u64,
    },

    /// Unexpected failure; the detail is a fixed per-route message.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message.
    pub fn detail(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Rejected { detail, .. } => detail.clone(),
            ApiError::NotFound(msg) => (*msg).to_string(),
            ApiError::RateLimited { .. } => RATE_LIMIT_DETAIL.to_string(),
            ApiError::Internal(msg) => (*msg).to_string(),
        }
    }

    /// The 400 returned for an id that is not 24 hex characters.
    pub fn invalid_id() -> Self {
        ApiError::BadRequest(INVALID_ID_DETAIL.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, Json(ErrorBody::new(self.detail()))).into_response();

        if let ApiError::RateLimited { retry_after_secs } = self
            && let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string())
        {
            response.headers_mut().insert(http::header::RETRY_AFTER, value);
        }

        response
    }
}
