//! Required-field checks for request parameters.
//!
//! Endpoint methods validate their parameters before anything is sent.

use std::fmt;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All failed checks for one parameter structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// The individual field errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether a given field failed.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Parameter structures that can be checked before sending.
pub trait Validate {
    /// Return every failed field check, or `Ok(())`.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Accumulates field checks.
#[derive(Debug, Default)]
pub(crate) struct Checks(Vec<FieldError>);

impl Checks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fail `field` when `value` is empty or only whitespace.
    pub(crate) fn required(self, field: &'static str, value: &str) -> Self {
        self.ensure(field, !value.trim().is_empty(), "is required")
    }

    pub(crate) fn ensure(mut self, field: &'static str, ok: bool, message: &str) -> Self {
        if !ok {
            self.0.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
        self
    }

    pub(crate) fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.0))
        }
    }
}
