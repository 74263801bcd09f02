//! Configuration management module
//!
//! Environment-backed server settings and the file-backed KRX endpoint catalog

pub mod catalog;
pub mod settings;

pub use catalog::{ApiConfig, EndpointDef, KrxConfig};
pub use settings::Settings;
