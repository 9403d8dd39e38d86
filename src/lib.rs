//! # Temu Seller Client
//!
//! An async Rust client library for the Temu seller platform's private REST APIs.
//!
//! ## Features
//!
//! - Login flow: public key, password login, SMS code, one-time console code
//! - Seller console session, profile and mall listing
//! - Paged order queries, also as a lazy [`Stream`](futures_util::Stream)
//! - Per-attempt `Anti-Content` signing through a pluggable provider
//! - Automatic retries on rate limiting and transient "system exception" replies
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use temu_seller_client::auth::EnvAntiContent;
//! use temu_seller_client::rest::SellerClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SellerClient::builder()
//!         .anti_content(Arc::new(EnvAntiContent::from_env()))
//!         .build()?;
//!     let malls = client.get_mall_info().await?;
//!     println!("Malls: {:?}", malls);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use config::{ClientConfig, RetryConfig};
pub use error::{ApiError, SellerError};
pub use rest::{SellerApi, SellerClient};

/// Result type alias using SellerError
pub type Result<T> = std::result::Result<T, SellerError>;
