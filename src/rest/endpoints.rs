//! Seller platform REST endpoint constants.

/// Base URL of the marketplace/login sub-system.
pub const DEFAULT_BASE_URL: &str = "https://seller.kuajingmaihuo.com";

/// Base URL of the seller console sub-system.
pub const DEFAULT_SELLER_CENTRAL_BASE_URL: &str = "https://agentseller.temu.com";

/// Marketplace endpoints (`success`/`errorCode`/`errorMsg` envelope).
pub mod marketplace {
    /// Get the RSA public key used to encrypt the login password.
    pub const LOGIN_PUBLIC_KEY: &str = "/bg/quiet/api/mms/key/login";
    /// Log in with name and encrypted password.
    pub const LOGIN: &str = "/bg/quiet/api/mms/login";
    /// Send an SMS verification code for login.
    pub const LOGIN_VERIFY_CODE: &str = "/bg/quiet/api/mms/loginVerifyCode";
    /// Obtain a one-time code for the seller console.
    pub const OBTAIN_CODE: &str = "/bg/quiet/api/auth/obtainCode";
    /// Get the account's companies and malls.
    pub const USER_INFO: &str = "/bg/quiet/api/mms/userInfo";
    /// List recent orders.
    pub const RECENT_ORDER_LIST: &str = "/kirogi/bg/mms/recentOrderList";
}

/// Seller console endpoints (`success`/`error_code`/`error_msg` envelope).
pub mod seller_central {
    /// Exchange a one-time code for a seller console session.
    pub const LOGIN_BY_CODE: &str = "/api/seller/auth/loginByCode";
    /// Get the logged-in seller's profile.
    pub const USER_INFO: &str = "/api/seller/auth/userInfo";
}
