use crate::adapters::twilio::DEFAULT_BASE_URL;
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATASET_PATH: &str = "properties.csv";
pub const DEFAULT_FROM_NUMBER: &str = "whatsapp:+14155238886";
pub const DEFAULT_CHANNEL_PREFIX: &str = "whatsapp:";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_from_number")]
    pub from_number: String,
    #[serde(default = "default_channel_prefix")]
    pub channel_prefix: String,
    pub timeout_seconds: Option<u64>,
}

fn default_dataset_path() -> String {
    DEFAULT_DATASET_PATH.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_from_number() -> String {
    DEFAULT_FROM_NUMBER.to_string()
}

fn default_channel_prefix() -> String {
    DEFAULT_CHANNEL_PREFIX.to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            from_number: default_from_number(),
            channel_prefix: default_channel_prefix(),
            timeout_seconds: None,
        }
    }
}

impl RelayConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RelayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RelayError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATASET_PATH})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RelayError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn dataset_path(&self) -> &str {
        &self.dataset.path
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_path("dataset.path", &self.dataset.path)?;
        validate_url("provider.base_url", &self.provider.base_url)?;
        validate_non_empty_string("provider.from_number", &self.provider.from_number)?;
        validate_non_empty_string("provider.channel_prefix", &self.provider.channel_prefix)?;

        if self.provider.timeout_seconds == Some(0) {
            return Err(RelayError::InvalidConfigValueError {
                field: "provider.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
