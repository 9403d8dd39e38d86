//! Example: Logging in and opening a seller console session.
//!
//! Expects `TEMU_ANTI_CONTENT`, `TEMU_LOGIN_NAME`, `TEMU_ENCRYPTED_PASSWORD`
//! and `TEMU_CONSOLE_URL` in the environment (or a `.env` file). The password
//! must already be encrypted with the key returned by `get_public_key`.
//!
//! Run with: cargo run --example login_flow

use std::sync::Arc;

use temu_seller_client::auth::EnvAntiContent;
use temu_seller_client::rest::SellerClient;
use temu_seller_client::rest::auth::{LoginByCodeRequest, LoginRequest, ObtainCodeRequest};
use temu_seller_client::{ClientConfig, SellerError};

fn required_var(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::env::var(name).map_err(|_| format!("{name} is not set").into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt::init();

    let client = SellerClient::from_config(
        ClientConfig::from_env()?,
        Arc::new(EnvAntiContent::from_env()),
    )?;

    let key = client.get_public_key().await?;
    println!("Login key version: {}", key.version);

    let request = LoginRequest::new(
        required_var("TEMU_LOGIN_NAME")?,
        required_var("TEMU_ENCRYPTED_PASSWORD")?,
    )
    .key_version(key.version);

    let login = match client.login(&request).await {
        Ok(login) => login,
        Err(SellerError::Api(api)) => {
            eprintln!("Login rejected: {api}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(mobile) = &login.mask_mobile {
        println!("SMS verification pending for {mobile}");
        return Ok(());
    }
    println!("Logged in as account {}", login.account_id);

    let malls = client.get_mall_info().await?;
    let Some(mall) = malls.first() else {
        println!("Account has no malls");
        return Ok(());
    };
    println!("Using mall {} ({})", mall.mall_name, mall.mall_id);

    let code = client
        .obtain_code(&ObtainCodeRequest::new(required_var("TEMU_CONSOLE_URL")?))
        .await?;
    client
        .login_by_code(&LoginByCodeRequest::new(code, mall.mall_id).confirm(true))
        .await?;

    let user = client.get_user_info().await?;
    println!("Console user {} sees {} malls", user.user_id, user.mall_list.len());

    Ok(())
}
