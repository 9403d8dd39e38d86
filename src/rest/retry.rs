//! Classification of transient platform failures.
//!
//! A response is retried when the platform rate limits it (HTTP 429) or when
//! the body is the platform's generic "system exception" envelope. Anything
//! else, including bodies that are not JSON, is final.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::error_codes::{SYSTEM_EXCEPTION_CODE, SYSTEM_EXCEPTION_MSG};
use crate::types::serde_helpers::null_as_default;

/// Why a response was judged transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    /// HTTP 429.
    RateLimited,
    /// `success: false` with the system-exception code and message.
    SystemException,
}

#[derive(Deserialize)]
struct Probe {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    success: bool,
    #[serde(rename = "errorCode", default, deserialize_with = "null_as_default::deserialize")]
    error_code: i64,
    #[serde(rename = "errorMsg", default, deserialize_with = "null_as_default::deserialize")]
    error_msg: String,
}

/// Decide whether a response should be retried.
pub fn classify(status: StatusCode, body: &[u8]) -> Option<RetryReason> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Some(RetryReason::RateLimited);
    }

    let probe: Probe = serde_json::from_slice(body).ok()?;
    let transient = !probe.success
        && probe.error_code == SYSTEM_EXCEPTION_CODE
        && probe.error_msg.eq_ignore_ascii_case(SYSTEM_EXCEPTION_MSG);

    transient.then_some(RetryReason::SystemException)
}
