use crate::config::toml_config::{DEFAULT_CHANNEL_PREFIX, DEFAULT_FROM_NUMBER};
use crate::core::{MessageId, MessagingProvider, OutboundMessage};
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::mask_phone_number;

/// 將組好的訊息透過供應商送出；每次呼叫只發出一次請求，不重試
pub struct Dispatcher<P: MessagingProvider> {
    provider: P,
    from_number: String,
    channel_prefix: String,
}

impl<P: MessagingProvider> Dispatcher<P> {
    pub fn new(provider: P, from_number: String, channel_prefix: String) -> Self {
        Self {
            provider,
            from_number,
            channel_prefix,
        }
    }

    pub fn with_defaults(provider: P) -> Self {
        Self::new(
            provider,
            DEFAULT_FROM_NUMBER.to_string(),
            DEFAULT_CHANNEL_PREFIX.to_string(),
        )
    }

    /// 加上頻道前綴，號碼本身不做任何修改
    pub fn destination(&self, to_number: &str) -> String {
        format!("{}{}", self.channel_prefix, to_number)
    }

    pub fn outbound(&self, body: &str, to_number: &str) -> Result<OutboundMessage> {
        if to_number.trim().is_empty() {
            return Err(RelayError::ValidationError {
                message: "Please enter a WhatsApp number.".to_string(),
            });
        }

        Ok(OutboundMessage {
            from: self.from_number.clone(),
            to: self.destination(to_number),
            body: body.to_string(),
        })
    }

    pub async fn send(&self, body: &str, to_number: &str) -> Result<MessageId> {
        let message = self.outbound(body, to_number)?;

        tracing::info!(
            "📤 Sending message to {}{}",
            self.channel_prefix,
            mask_phone_number(to_number)
        );
        let id = self
            .provider
            .send(&message.from, &message.to, &message.body)
            .await?;
        tracing::info!("✅ Provider accepted message {}", id);

        Ok(id)
    }
}
