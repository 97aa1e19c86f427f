//! Error types for Miro API operations.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::models::ApiErrorBody;

/// Errors that can occur during Miro API operations.
#[derive(Debug, Error)]
pub enum MiroError {
    /// Configuration is missing or incomplete.
    #[error("Miro configuration required: {0}")]
    ConfigMissing(String),

    /// HTTP transport error, passed through as reported by reqwest.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The call context was cancelled before the call completed.
    #[error("request cancelled")]
    Cancelled,

    /// The call context deadline passed before the call completed.
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// A rate-limit response header was present but not a valid integer.
    #[error("invalid {header} header value {value:?}")]
    RateLimitHeader { header: &'static str, value: String },

    /// The response status was not one the operation expects.
    #[error("status code not expected, got:{status}, message:{}", .body.message)]
    UnexpectedStatus { status: u16, body: ApiErrorBody },

    /// A response body could not be decoded into the expected entity.
    #[error("Failed to decode response: {0}")]
    DecodeError(#[from] DecodeError),

    /// A request body could not be serialized.
    #[error("Failed to serialize request: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl MiroError {
    /// The HTTP status of an [`MiroError::UnexpectedStatus`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the call was stopped by its call context.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}

/// Result type alias for Miro operations.
pub type Result<T> = core::result::Result<T, MiroError>;
