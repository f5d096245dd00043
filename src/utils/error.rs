use thiserror::Error;

/// 找不到符合條件的物件時顯示的固定訊息
pub const NOT_FOUND_MESSAGE: &str = "No matching properties available";

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Failed to read dataset '{path}': {reason}")]
    DatasetError { path: String, reason: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Dataset schema error: {message}")]
    SchemaError { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Missing messaging credential: {field}")]
    MissingCredentialError { field: String },

    #[error("Messaging provider rejected the request (HTTP {status}{}): {message}", code_suffix(.code))]
    ProviderError {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

fn code_suffix(code: &Option<i64>) -> String {
    match code {
        Some(code) => format!(", code {}", code),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Load,
    NotFound,
    Validation,
    Send,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RelayError {
    pub fn not_found() -> Self {
        RelayError::NotFound {
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RelayError::DatasetError { .. }
            | RelayError::CsvError(_)
            | RelayError::SchemaError { .. } => ErrorCategory::Load,
            RelayError::NotFound { .. } => ErrorCategory::NotFound,
            RelayError::ValidationError { .. } => ErrorCategory::Validation,
            RelayError::MissingCredentialError { .. }
            | RelayError::ProviderError { .. }
            | RelayError::ApiError(_) => ErrorCategory::Send,
            RelayError::IoError(_)
            | RelayError::ConfigValidationError { .. }
            | RelayError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Send => ErrorSeverity::High,
            ErrorCategory::Load | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            RelayError::NotFound { message } => message.clone(),
            RelayError::ValidationError { message } => message.clone(),
            RelayError::DatasetError { .. }
            | RelayError::CsvError(_)
            | RelayError::SchemaError { .. } => format!("Error reading CSV: {}", self),
            RelayError::MissingCredentialError { field } => {
                format!("Cannot send message: credential {} is not set", field)
            }
            RelayError::ProviderError { .. } | RelayError::ApiError(_) => {
                format!("Failed to send message: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RelayError::DatasetError { .. } => {
                "Check that the dataset file exists and is readable, or pass --dataset"
            }
            RelayError::CsvError(_) => "Make sure every row has the same number of columns and the file is UTF-8",
            RelayError::SchemaError { .. } => {
                "The header must contain location,bhk,type,rent,furnishing,parking,contact,photos_link"
            }
            RelayError::NotFound { .. } => "Try another location or BHK combination (see the `options` command)",
            RelayError::ValidationError { .. } => "Enter a WhatsApp number including the country code, e.g. +91XXXXXXXXXX",
            RelayError::MissingCredentialError { .. } => {
                "Set TWILIO_ACCOUNT_SID and TWILIO_AUTH_TOKEN in the environment or in .env"
            }
            RelayError::ProviderError { .. } => {
                "Verify the credentials and that the destination number has joined the sandbox"
            }
            RelayError::ApiError(_) => "Check your network connection and the provider base URL",
            RelayError::IoError(_) => "Check file paths and permissions",
            RelayError::ConfigValidationError { .. } | RelayError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
        }
    }

    /// 退出碼：查無物件 0、輸入錯誤 2、發送失敗 1、資料或設定錯誤 3
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.severity() {
            ErrorSeverity::Low => tracing::Level::INFO,
            ErrorSeverity::Medium => tracing::Level::WARN,
            ErrorSeverity::High | ErrorSeverity::Critical => tracing::Level::ERROR,
        }
    }

    pub fn output_stream(&self) -> OutputStream {
        match self.category() {
            ErrorCategory::NotFound => OutputStream::Stdout,
            _ => OutputStream::Stderr,
        }
    }

    /// 每一種錯誤都有各自的呈現方式
    pub fn render(&self) -> String {
        match self.category() {
            ErrorCategory::NotFound => format!("ℹ️  {}", self.user_friendly_message()),
            ErrorCategory::Validation => format!("⚠️  {}", self.user_friendly_message()),
            ErrorCategory::Send => format!(
                "❌ {}\n💡 Suggestion: {}",
                self.user_friendly_message(),
                self.recovery_suggestion()
            ),
            ErrorCategory::Load | ErrorCategory::Configuration => format!(
                "🛑 {}\n💡 Suggestion: {}",
                self.user_friendly_message(),
                self.recovery_suggestion()
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

pub type Result<T> = std::result::Result<T, RelayError>;
