use crate::domain::model::MessageId;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// 外部訊息供應商的最小介面，測試時可替換成假的實作
#[async_trait]
pub trait MessagingProvider: Send + Sync {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<MessageId>;
}
