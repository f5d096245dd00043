// Adapters layer: concrete implementations for external systems (storage, messaging provider).

pub mod storage;
pub mod twilio;
