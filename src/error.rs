//! Error types for the Temu seller client library.

use thiserror::Error;

use crate::auth::SignatureError;
use crate::types::validation::ValidationErrors;

/// The main error type for all seller client operations.
#[derive(Error, Debug)]
pub enum SellerError {
    /// Request parameters failed the required-field check; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The platform answered with `success: false` or an HTTP error status.
    #[error("Temu API error: {0}")]
    Api(ApiError),

    /// Rate limit exceeded and retries were exhausted
    #[error("Rate limit exceeded, retry after {retry_after_secs:?}s")]
    RateLimitExceeded {
        /// Value of the `Retry-After` header, if the platform sent one
        retry_after_secs: Option<u64>,
    },

    /// The `Anti-Content` header could not be computed.
    #[error("Anti-Content signature failed: {0}")]
    Signature(#[from] SignatureError),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// An error reported inside a response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The platform error code (`errorCode` / `error_code`).
    pub code: i64,
    /// The platform error message, trimmed of surrounding whitespace.
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: i64, message: impl AsRef<str>) -> Self {
        Self {
            code,
            message: message.as_ref().trim().to_string(),
        }
    }

    /// Check if this is the platform's transient "system exception".
    pub fn is_system_exception(&self) -> bool {
        self.code == error_codes::SYSTEM_EXCEPTION_CODE
            && self
                .message
                .eq_ignore_ascii_case(error_codes::SYSTEM_EXCEPTION_MSG)
    }
}

/// Known platform error codes.
pub mod error_codes {
    /// Error code paired with [`SYSTEM_EXCEPTION_MSG`] for transient failures.
    pub const SYSTEM_EXCEPTION_CODE: i64 = 4_000_000;
    /// Error message marking a transient failure (compared ignoring ASCII case).
    pub const SYSTEM_EXCEPTION_MSG: &str = "SYSTEM_EXCEPTION";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_trims_message() {
        let error = ApiError::new(40001, "  invalid login name \n");
        assert_eq!(error.message, "invalid login name");
        assert_eq!(error.to_string(), "invalid login name (code 40001)");
    }

    #[test]
    fn test_system_exception_ignores_case() {
        assert!(ApiError::new(4_000_000, "system_exception").is_system_exception());
        assert!(!ApiError::new(4_000_001, "SYSTEM_EXCEPTION").is_system_exception());
        assert!(!ApiError::new(4_000_000, "PARAM_ERROR").is_system_exception());
    }

    #[test]
    fn test_api_variant_display_contains_message() {
        let err = SellerError::Api(ApiError::new(1, "account locked"));
        assert!(err.to_string().contains("account locked"));
    }
}
