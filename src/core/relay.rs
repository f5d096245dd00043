use crate::core::composer::format_property_message;
use crate::core::dispatcher::Dispatcher;
use crate::core::loader::load_properties;
use crate::core::matcher::find_property;
use crate::core::{
    DispatchReceipt, FilterOptions, MessagingProvider, PropertyRecord, PropertyTable, SearchFilter,
    Storage,
};
use crate::utils::error::{RelayError, Result};
use chrono::Utc;
use tokio::sync::OnceCell;

/// 一個工作階段：資料集在第一次需要時載入並快取，之後不再重新讀取
pub struct RelayEngine<S: Storage, P: MessagingProvider> {
    storage: S,
    dataset_path: String,
    dispatcher: Dispatcher<P>,
    table: OnceCell<PropertyTable>,
}

impl<S: Storage, P: MessagingProvider> RelayEngine<S, P> {
    pub fn new(storage: S, dataset_path: String, dispatcher: Dispatcher<P>) -> Self {
        Self {
            storage,
            dataset_path,
            dispatcher,
            table: OnceCell::new(),
        }
    }

    /// 載入失敗不會被快取，呼叫端應視為此工作階段無法繼續
    pub async fn table(&self) -> Result<&PropertyTable> {
        self.table
            .get_or_try_init(|| load_properties(&self.storage, &self.dataset_path))
            .await
    }

    pub async fn filter_options(&self) -> Result<FilterOptions> {
        Ok(self.table().await?.filter_options())
    }

    pub async fn find(&self, filter: &SearchFilter) -> Result<&PropertyRecord> {
        let table = self.table().await?;
        let record = find_property(table, filter)?;
        tracing::debug!(
            "Matched {} property for {} / {}",
            record.property_type,
            filter.location,
            filter.bhk
        );
        Ok(record)
    }

    pub async fn preview(&self, filter: &SearchFilter) -> Result<String> {
        let record = self.find(filter).await?;
        Ok(format_property_message(record))
    }

    pub async fn relay(&self, filter: &SearchFilter, phone: &str) -> Result<DispatchReceipt> {
        // 號碼檢查在查詢與發送之前
        if phone.trim().is_empty() {
            return Err(RelayError::ValidationError {
                message: "Please enter a WhatsApp number.".to_string(),
            });
        }

        tracing::info!("🔎 Searching for {} in {}", filter.bhk, filter.location);
        let record = self.find(filter).await?;
        let body = format_property_message(record);

        let message_id = self.dispatcher.send(&body, phone).await?;

        Ok(DispatchReceipt {
            message_id,
            to: self.dispatcher.destination(phone),
            sent_at: Utc::now(),
        })
    }
}
