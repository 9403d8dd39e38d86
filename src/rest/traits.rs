//! Trait definition for the seller platform REST client.
//!
//! The `SellerApi` trait abstracts every endpoint so callers can depend on the
//! trait and swap in a mock in their own tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use temu_seller_client::rest::SellerApi;
//!
//! async fn mall_names<C: SellerApi>(client: &C) -> Result<Vec<String>, temu_seller_client::SellerError> {
//!     let malls = client.get_mall_info().await?;
//!     Ok(malls.into_iter().map(|m| m.mall_name).collect())
//! }
//! ```

use std::future::Future;

use crate::error::SellerError;
use crate::rest::SellerClient;
use crate::rest::auth::{
    LoginByCodeRequest, LoginRequest, LoginResult, LoginVerifyCodeRequest, MallInfo,
    ObtainCodeRequest, PublicKey, UserInfo,
};
use crate::rest::client::RawResponse;
use crate::rest::orders::{OrderListRequest, OrderPage};

/// Trait defining all seller platform REST operations.
///
/// All methods are async and return `Result<T, SellerError>`.
pub trait SellerApi: Send + Sync {
    /// Get the login public key.
    fn get_public_key(&self) -> impl Future<Output = Result<PublicKey, SellerError>> + Send;

    /// Log in with name and encrypted password.
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<LoginResult, SellerError>> + Send;

    /// Send an SMS login verification code.
    fn get_login_verify_code(
        &self,
        request: &LoginVerifyCodeRequest,
    ) -> impl Future<Output = Result<(), SellerError>> + Send;

    /// Obtain a one-time seller console code.
    fn obtain_code(
        &self,
        request: &ObtainCodeRequest,
    ) -> impl Future<Output = Result<String, SellerError>> + Send;

    /// Open a seller console session with a one-time code.
    fn login_by_code(
        &self,
        request: &LoginByCodeRequest,
    ) -> impl Future<Output = Result<(), SellerError>> + Send;

    /// Fetch a landing page without following a 302.
    fn login_seller_central(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<RawResponse, SellerError>> + Send;

    /// Get the seller console profile.
    fn get_user_info(&self) -> impl Future<Output = Result<UserInfo, SellerError>> + Send;

    /// List the malls of the account's first company.
    fn get_mall_info(&self) -> impl Future<Output = Result<Vec<MallInfo>, SellerError>> + Send;

    /// List one page of recent orders.
    fn list_orders(
        &self,
        request: &OrderListRequest,
    ) -> impl Future<Output = Result<OrderPage, SellerError>> + Send;
}

impl SellerApi for SellerClient {
    async fn get_public_key(&self) -> Result<PublicKey, SellerError> {
        SellerClient::get_public_key(self).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResult, SellerError> {
        SellerClient::login(self, request).await
    }

    async fn get_login_verify_code(
        &self,
        request: &LoginVerifyCodeRequest,
    ) -> Result<(), SellerError> {
        SellerClient::get_login_verify_code(self, request).await
    }

    async fn obtain_code(&self, request: &ObtainCodeRequest) -> Result<String, SellerError> {
        SellerClient::obtain_code(self, request).await
    }

    async fn login_by_code(&self, request: &LoginByCodeRequest) -> Result<(), SellerError> {
        SellerClient::login_by_code(self, request).await
    }

    async fn login_seller_central(&self, url: &str) -> Result<RawResponse, SellerError> {
        SellerClient::login_seller_central(self, url).await
    }

    async fn get_user_info(&self) -> Result<UserInfo, SellerError> {
        SellerClient::get_user_info(self).await
    }

    async fn get_mall_info(&self) -> Result<Vec<MallInfo>, SellerError> {
        SellerClient::get_mall_info(self).await
    }

    async fn list_orders(&self, request: &OrderListRequest) -> Result<OrderPage, SellerError> {
        SellerClient::list_orders(self, request).await
    }
}
