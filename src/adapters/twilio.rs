use crate::config::credentials::MessagingCredentials;
use crate::domain::model::MessageId;
use crate::domain::ports::MessagingProvider;
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

/// 成功回應只需要 sid
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: Option<String>,
    status: Option<String>,
}

/// 4xx/5xx 時的錯誤內容
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<i64>,
    message: Option<String>,
    more_info: Option<String>,
}

pub struct TwilioProvider {
    client: Client,
    base_url: String,
    credentials: MessagingCredentials,
}

impl TwilioProvider {
    /// 未設定逾時則使用 reqwest 預設值
    pub fn new(base_url: String, credentials: MessagingCredentials, timeout_seconds: Option<u64>) -> Self {
        let client = match timeout_seconds {
            Some(secs) => Client::builder()
                .timeout(std::time::Duration::from_secs(secs))
                .build()
                .unwrap_or_else(|e| {
                    tracing::warn!("failed to build HTTP client with timeout ({}), using default", e);
                    Client::new()
                }),
            None => Client::new(),
        };

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn messages_url(&self, account_sid: &str) -> String {
        format!("{}/2010-04-01/Accounts/{}/Messages.json", self.base_url, account_sid)
    }
}

#[async_trait]
impl MessagingProvider for TwilioProvider {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<MessageId> {
        // 憑證缺少時不發出任何請求
        let account_sid = self.credentials.account_sid()?;
        let auth_token = self.credentials.auth_token()?;

        let url = self.messages_url(account_sid);
        tracing::debug!("Posting message to {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(account_sid, Some(auth_token))
            .form(&[("From", from), ("To", to), ("Body", body)])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("Provider response status: {}", status);

        if !status.is_success() {
            let (code, message) = match serde_json::from_str::<TwilioErrorBody>(&text) {
                Ok(err) => {
                    if let Some(info) = &err.more_info {
                        tracing::debug!("Provider error details: {}", info);
                    }
                    (err.code, err.message.unwrap_or_else(|| text.clone()))
                }
                Err(_) => (None, text),
            };
            return Err(RelayError::ProviderError {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let resource: MessageResource =
            serde_json::from_str(&text).map_err(|e| RelayError::ProviderError {
                status: status.as_u16(),
                code: None,
                message: format!("Unexpected response body: {}", e),
            })?;

        if let Some(delivery_status) = &resource.status {
            tracing::debug!("Message accepted with status: {}", delivery_status);
        }

        resource
            .sid
            .filter(|sid| !sid.is_empty())
            .map(MessageId::new)
            .ok_or_else(|| RelayError::ProviderError {
                status: status.as_u16(),
                code: None,
                message: "Response did not contain a message sid".to_string(),
            })
    }
}
