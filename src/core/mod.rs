pub mod composer;
pub mod dispatcher;
pub mod loader;
pub mod matcher;
pub mod relay;

pub use crate::domain::model::{
    DispatchReceipt, FilterOptions, MessageId, OutboundMessage, PropertyRecord, PropertyTable,
    SearchFilter,
};
pub use crate::domain::ports::{MessagingProvider, Storage};
pub use crate::utils::error::Result;
