use crate::utils::error::{RelayError, Result};

pub const ACCOUNT_SID_VAR: &str = "TWILIO_ACCOUNT_SID";
pub const AUTH_TOKEN_VAR: &str = "TWILIO_AUTH_TOKEN";

/// 訊息供應商的帳號與 token
///
/// 缺少的值保留為 `None`，發送時才回報錯誤，不會中斷啟動。
#[derive(Clone, Default)]
pub struct MessagingCredentials {
    account_sid: Option<String>,
    auth_token: Option<String>,
}

impl std::fmt::Debug for MessagingCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagingCredentials")
            .field("account_sid", &self.account_sid.as_ref().map(|_| "[REDACTED]"))
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl MessagingCredentials {
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self::from_parts(Some(account_sid.into()), Some(auth_token.into()))
    }

    /// 空白值視為未設定
    pub fn from_parts(account_sid: Option<String>, auth_token: Option<String>) -> Self {
        Self {
            account_sid: account_sid.filter(|v| !v.trim().is_empty()),
            auth_token: auth_token.filter(|v| !v.trim().is_empty()),
        }
    }

    /// 從環境變數讀取，需要 .env 時請先呼叫 `dotenvy::dotenv()`
    pub fn from_env() -> Self {
        Self::from_parts(
            std::env::var(ACCOUNT_SID_VAR).ok(),
            std::env::var(AUTH_TOKEN_VAR).ok(),
        )
    }

    pub fn is_complete(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some()
    }

    /// 尚未設定的環境變數名稱，只在發送前提示
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.account_sid.is_none() {
            missing.push(ACCOUNT_SID_VAR);
        }
        if self.auth_token.is_none() {
            missing.push(AUTH_TOKEN_VAR);
        }
        missing
    }

    /// 未設定時回傳 `MissingCredentialError`
    pub fn account_sid(&self) -> Result<&str> {
        self.account_sid
            .as_deref()
            .ok_or_else(|| RelayError::MissingCredentialError {
                field: ACCOUNT_SID_VAR.to_string(),
            })
    }

    pub fn auth_token(&self) -> Result<&str> {
        self.auth_token
            .as_deref()
            .ok_or_else(|| RelayError::MissingCredentialError {
                field: AUTH_TOKEN_VAR.to_string(),
            })
    }
}
