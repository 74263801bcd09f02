//! Service layer module
//!
//! Contains the KRX HTTP client, the batched explorer, the JSON structure
//! analyzer, and response file persistence

pub mod analyzer;
pub mod client;
pub mod explorer;
pub mod storage;

pub use client::KrxClient;
pub use explorer::{ExplorerService, PacingConfig};
pub use storage::ResponseStore;
