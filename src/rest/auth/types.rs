//! Types for the login and account endpoints.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::types::serde_helpers::{empty_string_as_none, expose_secret, null_as_default};
use crate::types::validation::{Checks, Validate, ValidationErrors};

/// Key version sent when the caller does not pick one.
pub const DEFAULT_KEY_VERSION: &str = "1";

/// RSA public key used to encrypt the login password.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKey {
    /// PEM-less base64 public key.
    pub public_key: String,
    /// Key version to send back as `keyVersion`.
    pub version: String,
}

/// Request for [`SellerClient::login`](crate::rest::SellerClient::login).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account login name, usually a phone number.
    pub login_name: String,
    /// Password encrypted with the key from `get_public_key`.
    #[serde(serialize_with = "expose_secret::serialize")]
    pub encrypt_password: SecretString,
    /// Version of the key used to encrypt the password.
    pub key_version: String,
    /// SMS code, when the platform asked for one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_code: Option<String>,
}

impl LoginRequest {
    /// Create a login request with the default key version.
    pub fn new(login_name: impl Into<String>, encrypt_password: impl Into<String>) -> Self {
        Self {
            login_name: login_name.into(),
            encrypt_password: SecretString::from(encrypt_password.into()),
            key_version: DEFAULT_KEY_VERSION.to_string(),
            verify_code: None,
        }
    }

    /// Set the key version.
    pub fn key_version(mut self, version: impl Into<String>) -> Self {
        self.key_version = version.into();
        self
    }

    /// Attach an SMS verification code.
    pub fn verify_code(mut self, code: impl Into<String>) -> Self {
        self.verify_code = Some(code.into());
        self
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        use secrecy::ExposeSecret;

        Checks::new()
            .required("loginName", &self.login_name)
            .required("encryptPassword", self.encrypt_password.expose_secret())
            .finish()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResult {
    /// Account identifier.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub account_id: i64,
    /// Masked phone number, present when a second factor is pending.
    #[serde(deserialize_with = "empty_string_as_none::deserialize")]
    pub mask_mobile: Option<String>,
    /// Token for the second-factor step.
    #[serde(deserialize_with = "empty_string_as_none::deserialize")]
    pub verify_auth_token: Option<String>,
}

/// Request for an SMS login verification code.
#[derive(Debug, Clone, Serialize)]
pub struct LoginVerifyCodeRequest {
    /// Phone number to send the code to.
    pub mobile: String,
}

impl LoginVerifyCodeRequest {
    /// Create a request for `mobile`.
    pub fn new(mobile: impl Into<String>) -> Self {
        Self {
            mobile: mobile.into(),
        }
    }
}

impl Validate for LoginVerifyCodeRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new().required("mobile", &self.mobile).finish()
    }
}

/// Request for a one-time seller console code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObtainCodeRequest {
    /// Seller console URL the code will be redeemed at.
    pub redirect_url: String,
}

impl ObtainCodeRequest {
    /// Create a request for `redirect_url`.
    pub fn new(redirect_url: impl Into<String>) -> Self {
        Self {
            redirect_url: redirect_url.into(),
        }
    }
}

impl Validate for ObtainCodeRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .required("redirectUrl", &self.redirect_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ObtainCodeResult {
    pub(crate) code: String,
}

/// Request to open a seller console session with a one-time code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginByCodeRequest {
    /// Code from `obtain_code`.
    pub code: String,
    /// Confirm switching when another session is active.
    pub confirm: bool,
    /// Mall to log into.
    pub target_mall_id: i64,
}

impl LoginByCodeRequest {
    /// Create a request for `code` and `target_mall_id`.
    pub fn new(code: impl Into<String>, target_mall_id: i64) -> Self {
        Self {
            code: code.into(),
            confirm: false,
            target_mall_id,
        }
    }

    /// Set the confirm flag.
    pub fn confirm(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }
}

impl Validate for LoginByCodeRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new().required("code", &self.code).finish()
    }
}

/// Seller console profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    /// User identifier.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub user_id: i64,
    /// Account identifier.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub account_id: i64,
    /// Masked phone number.
    #[serde(deserialize_with = "empty_string_as_none::deserialize")]
    pub mask_mobile: Option<String>,
    /// Account type code.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub account_type: i32,
    /// Malls the user can act for.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub mall_list: Vec<MallSummary>,
}

/// A mall as listed in the seller console profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MallSummary {
    /// Mall identifier.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub mall_id: i64,
    /// Display name.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub mall_name: String,
    /// Logo URL.
    #[serde(deserialize_with = "empty_string_as_none::deserialize")]
    pub logo: Option<String>,
    /// Whether the mall runs on the semi-managed model.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub is_semi_managed_mall: bool,
}

/// A mall as listed by the marketplace account info.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MallInfo {
    /// Mall identifier.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub mall_id: i64,
    /// Display name.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub mall_name: String,
    /// Mall status code.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub mall_status: i32,
    /// Whether the mall runs on the semi-managed model.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub is_semi_managed_mall: bool,
    /// Logo URL.
    #[serde(deserialize_with = "empty_string_as_none::deserialize")]
    pub logo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct AccountMalls {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub(crate) company_list: Vec<Company>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Company {
    #[serde(rename = "malInfoList", deserialize_with = "null_as_default::deserialize")]
    pub(crate) mal_info_list: Vec<MallInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_format() {
        let request = LoginRequest::new("13800000000", "cipher");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "loginName": "13800000000",
                "encryptPassword": "cipher",
                "keyVersion": "1"
            })
        );

        let json = serde_json::to_value(request.verify_code("123456")).unwrap();
        assert_eq!(json["verifyCode"], "123456");
    }

    #[test]
    fn test_login_request_debug_hides_password() {
        let request = LoginRequest::new("13800000000", "cipher-secret");
        assert!(!format!("{request:?}").contains("cipher-secret"));
    }

    #[test]
    fn test_login_validation() {
        let err = LoginRequest::new("", "").validate().unwrap_err();
        assert!(err.has_field("loginName"));
        assert!(err.has_field("encryptPassword"));

        assert!(LoginRequest::new("name", "pw").validate().is_ok());
    }

    #[test]
    fn test_other_validations() {
        assert!(ObtainCodeRequest::new("").validate().is_err());
        assert!(LoginByCodeRequest::new(" ", 1).validate().is_err());
        assert!(LoginVerifyCodeRequest::new("").validate().is_err());
        assert!(LoginVerifyCodeRequest::new("138").validate().is_ok());
    }

    #[test]
    fn test_login_by_code_wire_format() {
        let json = serde_json::to_value(LoginByCodeRequest::new("c0de", 634418).confirm(true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "c0de", "confirm": true, "targetMallId": 634418})
        );
    }

    #[test]
    fn test_user_info_tolerates_nulls_and_extras() {
        let info: UserInfo = serde_json::from_str(
            r#"{"userId":1,"maskMobile":"","mallList":null,"roleNameList":["admin"]}"#,
        )
        .unwrap();
        assert_eq!(info.user_id, 1);
        assert!(info.mask_mobile.is_none());
        assert!(info.mall_list.is_empty());
    }

    #[test]
    fn test_null_scalars_fall_back_to_defaults() {
        let info: UserInfo = serde_json::from_str(
            r#"{"userId":null,"accountId":9,"accountType":null,"mallList":[{"mallId":1,"mallName":null,"isSemiManagedMall":null}]}"#,
        )
        .unwrap();
        assert_eq!(info.user_id, 0);
        assert_eq!(info.account_id, 9);
        assert_eq!(info.account_type, 0);
        assert_eq!(info.mall_list[0].mall_name, "");
        assert!(!info.mall_list[0].is_semi_managed_mall);

        let mall: MallInfo =
            serde_json::from_str(r#"{"mallId":3,"mallStatus":null,"mallName":"Shop"}"#).unwrap();
        assert_eq!(mall.mall_status, 0);
        assert_eq!(mall.mall_name, "Shop");
    }
}
