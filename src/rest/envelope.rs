//! Response envelopes.
//!
//! The two upstream sub-systems wrap results in different JSON shapes. Each
//! endpoint is bound to exactly one of them; both expose the same
//! [`Outcome`] view so error mapping is shared.

use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::error::ApiError;
use crate::types::serde_helpers::null_as_default;

/// Success flag plus error details common to every envelope.
pub trait Outcome {
    /// The `success` flag.
    fn is_success(&self) -> bool;

    /// The platform error code, `0` when absent.
    fn error_code(&self) -> i64;

    /// The platform error message, empty when absent.
    fn error_message(&self) -> &str;

    /// The error details as an [`ApiError`] with the message trimmed.
    fn api_error(&self) -> ApiError {
        ApiError::new(self.error_code(), self.error_message())
    }
}

/// An envelope that carries an operation-specific payload.
pub trait Envelope: Outcome + DeserializeOwned {
    /// The `result` payload type.
    type Payload;

    /// Take the payload, if the response carried one.
    fn into_payload(self) -> Option<Self::Payload>;
}

/// Marketplace/login envelope:
/// `{"success", "errorCode", "errorMsg", "result"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceEnvelope<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Error code when `success` is false.
    #[serde(rename = "errorCode", default, deserialize_with = "null_as_default::deserialize")]
    pub error_code: i64,
    /// Error message when `success` is false.
    #[serde(rename = "errorMsg", default, deserialize_with = "null_as_default::deserialize")]
    pub error_msg: String,
    /// Operation payload.
    pub result: Option<T>,
}

impl<T> Outcome for MarketplaceEnvelope<T> {
    fn is_success(&self) -> bool {
        self.success
    }

    fn error_code(&self) -> i64 {
        self.error_code
    }

    fn error_message(&self) -> &str {
        &self.error_msg
    }
}

impl<T: DeserializeOwned> Envelope for MarketplaceEnvelope<T> {
    type Payload = T;

    fn into_payload(self) -> Option<T> {
        self.result
    }
}

/// Seller console envelope:
/// `{"success", "error_code", "error_msg", "result"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SellerCentralEnvelope<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Error code when `success` is false.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_code: i64,
    /// Error message when `success` is false.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_msg: String,
    /// Operation payload.
    pub result: Option<T>,
}

impl<T> Outcome for SellerCentralEnvelope<T> {
    fn is_success(&self) -> bool {
        self.success
    }

    fn error_code(&self) -> i64 {
        self.error_code
    }

    fn error_message(&self) -> &str {
        &self.error_msg
    }
}

impl<T: DeserializeOwned> Envelope for SellerCentralEnvelope<T> {
    type Payload = T;

    fn into_payload(self) -> Option<T> {
        self.result
    }
}

/// Payload for endpoints whose `result` is ignored. Any JSON value decodes.
pub type Ignored = IgnoredAny;
