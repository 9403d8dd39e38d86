//! Seller platform REST API client.
//!
//! Two upstream sub-systems sit behind one [`SellerClient`]:
//!
//! - the marketplace/login API ([`endpoints::marketplace`])
//! - the seller console API ([`endpoints::seller_central`])
//!
//! Each has its own base URL and response envelope. Every endpoint method is
//! bound to one of them.
//!
//! # Trait-based API
//!
//! The [`SellerApi`] trait abstracts all REST operations, enabling mock
//! implementations for testing.

pub mod auth;
mod client;
pub mod endpoints;
pub mod envelope;
pub mod orders;
pub mod retry;
mod traits;

pub use client::{RawResponse, SellerClient, SellerClientBuilder};
pub use traits::SellerApi;
