pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{storage::LocalStorage, twilio::TwilioProvider};
pub use config::{credentials::MessagingCredentials, toml_config::RelayConfig, CliConfig};
pub use core::{dispatcher::Dispatcher, relay::RelayEngine};
pub use domain::model::{DispatchReceipt, MessageId, PropertyRecord, PropertyTable, SearchFilter};
pub use utils::error::{RelayError, Result};
