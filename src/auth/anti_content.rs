//! The `Anti-Content` signature seam.

use std::error::Error as StdError;

use thiserror::Error;

/// Name of the header carrying the anti-bot signature.
pub const ANTI_CONTENT_HEADER: &str = "Anti-Content";

/// Default environment variable read by [`EnvAntiContent`].
const DEFAULT_ENV_VAR: &str = "TEMU_ANTI_CONTENT";

/// Failure to compute an `Anti-Content` value.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct SignatureError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl SignatureError {
    /// Create an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error with a message.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Computes the `Anti-Content` header value for an outgoing request.
///
/// The client calls this once per attempt, including every retry, with the
/// serialized JSON body (`None` for requests without one). Values are never
/// cached between attempts.
///
/// Any `Fn(Option<&[u8]>) -> Result<String, SignatureError>` closure is a
/// provider:
///
/// ```rust
/// use std::sync::Arc;
/// use temu_seller_client::auth::{AntiContentProvider, SignatureError};
///
/// let provider: Arc<dyn AntiContentProvider> =
///     Arc::new(|_body: Option<&[u8]>| Ok::<_, SignatureError>("0aq...".to_string()));
/// assert_eq!(provider.anti_content(None).unwrap(), "0aq...");
/// ```
pub trait AntiContentProvider: Send + Sync {
    /// Compute the header value for a request body.
    fn anti_content(&self, body: Option<&[u8]>) -> Result<String, SignatureError>;
}

impl<F> AntiContentProvider for F
where
    F: Fn(Option<&[u8]>) -> Result<String, SignatureError> + Send + Sync,
{
    fn anti_content(&self, body: Option<&[u8]>) -> Result<String, SignatureError> {
        self(body)
    }
}

/// Provider returning the same value for every request.
///
/// Useful against mock servers and for short-lived sessions where a token
/// was captured from a browser.
#[derive(Debug, Clone)]
pub struct StaticAntiContent {
    value: String,
}

impl StaticAntiContent {
    /// Create a provider that always returns `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl AntiContentProvider for StaticAntiContent {
    fn anti_content(&self, _body: Option<&[u8]>) -> Result<String, SignatureError> {
        Ok(self.value.clone())
    }
}

/// Provider that reads the value from an environment variable on each call.
///
/// By default, reads `TEMU_ANTI_CONTENT`.
#[derive(Debug, Clone)]
pub struct EnvAntiContent {
    var: String,
}

impl EnvAntiContent {
    /// Read from `TEMU_ANTI_CONTENT`.
    pub fn from_env() -> Self {
        Self::from_env_var(DEFAULT_ENV_VAR)
    }

    /// Read from a custom environment variable.
    pub fn from_env_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl AntiContentProvider for EnvAntiContent {
    fn anti_content(&self, _body: Option<&[u8]>) -> Result<String, SignatureError> {
        match std::env::var(&self.var) {
            Ok(value) if !value.is_empty() => Ok(value),
            Ok(_) => Err(SignatureError::new(format!(
                "environment variable {} is empty",
                self.var
            ))),
            Err(e) => Err(SignatureError::with_source(
                format!("environment variable {} not readable", self.var),
                e,
            )),
        }
    }
}
