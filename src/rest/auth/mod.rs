//! Login and account endpoints.
//!
//! The login flow runs against the marketplace sub-system (`get_public_key`,
//! `login`, `obtain_code`), then hands the one-time code to the seller console
//! (`login_by_code`).

mod types;

pub use types::*;

use tracing::debug;

use crate::error::SellerError;
use crate::rest::SellerClient;
use crate::rest::client::{RawResponse, required};
use crate::rest::endpoints::{marketplace, seller_central};
use crate::rest::envelope::Ignored;
use crate::types::validation::{Checks, Validate};

impl SellerClient {
    /// Get the public key used to encrypt the login password.
    pub async fn get_public_key(&self) -> Result<PublicKey, SellerError> {
        required(
            self.marketplace_post_empty(marketplace::LOGIN_PUBLIC_KEY)
                .await?,
        )
    }

    /// Log in with a login name and encrypted password.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use temu_seller_client::auth::EnvAntiContent;
    /// use temu_seller_client::rest::SellerClient;
    /// use temu_seller_client::rest::auth::LoginRequest;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = SellerClient::builder()
    ///         .anti_content(Arc::new(EnvAntiContent::from_env()))
    ///         .build()?;
    ///
    ///     let key = client.get_public_key().await?;
    ///     let request = LoginRequest::new("13800000000", "<rsa-encrypted>").key_version(key.version);
    ///     let login = client.login(&request).await?;
    ///     println!("Account: {}", login.account_id);
    ///     Ok(())
    /// }
    /// ```
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResult, SellerError> {
        request.validate()?;
        let result: LoginResult =
            required(self.marketplace_post(marketplace::LOGIN, request).await?)?;
        debug!(account_id = result.account_id, "Logged in");
        Ok(result)
    }

    /// Send an SMS login verification code.
    pub async fn get_login_verify_code(
        &self,
        request: &LoginVerifyCodeRequest,
    ) -> Result<(), SellerError> {
        request.validate()?;
        self.marketplace_post::<Ignored, _>(marketplace::LOGIN_VERIFY_CODE, request)
            .await?;
        Ok(())
    }

    /// Obtain a one-time code for the seller console.
    pub async fn obtain_code(&self, request: &ObtainCodeRequest) -> Result<String, SellerError> {
        request.validate()?;
        let result: ObtainCodeResult =
            required(self.marketplace_post(marketplace::OBTAIN_CODE, request).await?)?;
        Ok(result.code)
    }

    /// Open a seller console session with a one-time code.
    pub async fn login_by_code(&self, request: &LoginByCodeRequest) -> Result<(), SellerError> {
        request.validate()?;
        self.seller_central_post::<Ignored, _>(seller_central::LOGIN_BY_CODE, request)
            .await?;
        Ok(())
    }

    /// Fetch a seller console landing page without following a 302.
    ///
    /// `url` may be absolute or a path on the marketplace host. The response
    /// comes back undecoded so the caller can read the redirect target.
    pub async fn login_seller_central(&self, url: &str) -> Result<RawResponse, SellerError> {
        Checks::new().required("url", url).finish()?;
        self.get_raw(url).await
    }

    /// Get the seller console profile.
    pub async fn get_user_info(&self) -> Result<UserInfo, SellerError> {
        required(
            self.seller_central_post(seller_central::USER_INFO, &serde_json::json!({}))
                .await?,
        )
    }

    /// List the malls of the account's first company.
    ///
    /// Returns an empty list when the account has no company.
    pub async fn get_mall_info(&self) -> Result<Vec<MallInfo>, SellerError> {
        let result: AccountMalls = required(
            self.marketplace_post(marketplace::USER_INFO, &serde_json::json!({}))
                .await?,
        )?;
        Ok(result
            .company_list
            .into_iter()
            .next()
            .map(|company| company.mal_info_list)
            .unwrap_or_default())
    }
}
