//! Error types for Cursor API calls
//!
//! Every failure of the request adapter is classified as exactly one of
//! four kinds so callers can tell "the API rejected the request" apart
//! from "the API responded but broke its contract" and from plain
//! network trouble. Tool handlers surface the kind tag verbatim.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when calling the Cursor API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The response body was not valid JSON, regardless of HTTP status
    #[error("invalid JSON response from API: {body}")]
    Decode {
        /// Raw response text
        body: String,
    },

    /// Non-2xx status with a recognizable API error body
    #[error("Cursor API error: {status} - {message}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Error message reported by the API
        message: String,
        /// Machine-readable error code, when the API provides one
        code: Option<String>,
    },

    /// Non-2xx status without a recognizable error body
    #[error("Cursor API error: {status} {status_text} - {body}")]
    Transport {
        status: u16,
        status_text: String,
        /// Raw response text, unmodified
        body: String,
    },

    /// 2xx response whose body did not match the expected shape
    #[error("API response validation failed: {detail}")]
    Validation {
        /// Deserializer diagnostic (field path and expectation)
        detail: String,
    },

    /// The request could not be sent or the body could not be read
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Stable classification tag for this error
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Decode { .. } => "decode-error",
            ApiError::Upstream { .. } => "upstream-error",
            ApiError::Transport { .. } | ApiError::Network(_) => "transport-error",
            ApiError::Validation { .. } => "validation-error",
        }
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body shape the API uses for non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub message: String,
    pub code: Option<String>,
}
