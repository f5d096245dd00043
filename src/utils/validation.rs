use crate::utils::error::{RelayError, Result};
use url::Url;

/// 表單上提示的 WhatsApp 號碼最大長度 (含 +91 國碼)
pub const PHONE_MAX_CHARS: usize = 13;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(RelayError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 只檢查是否為空以及長度，不驗證國碼或位數
pub fn validate_phone_number(phone: &str) -> Result<()> {
    if phone.trim().is_empty() {
        return Err(RelayError::ValidationError {
            message: "Please enter a WhatsApp number.".to_string(),
        });
    }

    let length = phone.chars().count();
    if length > PHONE_MAX_CHARS {
        return Err(RelayError::ValidationError {
            message: format!(
                "WhatsApp number is {} characters long; at most {} are allowed",
                length, PHONE_MAX_CHARS
            ),
        });
    }

    Ok(())
}

/// 日誌用：只保留最後 4 碼
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let visible = if chars.len() > 4 { 4 } else { 0 };
    let hidden = chars.len() - visible;

    let mut masked = "*".repeat(hidden);
    masked.extend(&chars[hidden..]);
    masked
}
