//! Common types used across the seller client library.

pub mod pagination;
pub mod serde_helpers;
pub mod validation;

pub use pagination::{PageSummary, page_summary};
pub use validation::{FieldError, Validate, ValidationErrors};
