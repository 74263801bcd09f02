//! File-based KRX configuration
//!
//! Loads the upstream API connection settings and the endpoint catalog
//! from a JSON file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Upstream API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the KRX data API
    #[serde(rename = "baseUrl", default = "default_base_url")]
    pub base_url: String,

    /// API key, injected as a `key` query parameter when non-empty
    #[serde(default)]
    pub key: String,

    /// Request timeout in seconds
    #[serde(rename = "timeoutSecs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Response format requested on every call
    #[serde(rename = "defaultFormat", default = "default_format")]
    pub default_format: String,
}

fn default_base_url() -> String {
    "https://data-api.krx.co.kr".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_format() -> String {
    "json".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: String::new(),
            timeout_secs: default_timeout_secs(),
            default_format: default_format(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// One upstream data query in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointDef {
    /// Endpoint identifier, unique across the whole catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
}

/// KRX configuration loaded from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KrxConfig {
    /// Connection settings (optional, defaults to the public KRX data API)
    #[serde(default)]
    pub api: ApiConfig,

    /// Endpoint catalog, keyed by category name
    pub apis: HashMap<String, Vec<EndpointDef>>,
}

impl KrxConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading KRX configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: KrxConfig =
            serde_json::from_str(&content).with_context(|| "Failed to parse config JSON")?;

        config.validate()?;

        debug!(
            "Loaded {} categories with {} endpoints",
            config.apis.len(),
            config.endpoint_count()
        );
        Ok(config)
    }

    /// Load configuration from default locations
    /// Searches in order:
    /// 1. ~/.config/krx-explorer/krx-explorer.json
    /// 2. ./krx-explorer.json
    ///
    /// Returns error if no configuration file is found.
    pub fn load_default() -> Result<Self> {
        // Try home config directory first
        if let Some(home) = dirs::home_dir() {
            let config_path = home
                .join(".config")
                .join("krx-explorer")
                .join("krx-explorer.json");
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        // Try current directory
        let local_path = Path::new("krx-explorer.json");
        if local_path.exists() {
            return Self::load(local_path);
        }

        anyhow::bail!(
            "Configuration file not found. Please create one at:\n\
             - ~/.config/krx-explorer/krx-explorer.json (recommended)\n\
             - ./krx-explorer.json (current directory)\n\
             \n\
             See krx-explorer.example.json for reference."
        )
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.api.base_url.starts_with("http") {
            anyhow::bail!(
                "Invalid base URL format, should start with 'http': {}",
                self.api.base_url
            );
        }

        if self.api.timeout_secs == 0 {
            anyhow::bail!("Request timeout cannot be 0");
        }

        if self.endpoint_count() == 0 {
            anyhow::bail!("At least one endpoint must be configured");
        }

        let mut seen = HashSet::new();
        for (category, endpoints) in &self.apis {
            for endpoint in endpoints {
                if endpoint.id.is_empty() {
                    anyhow::bail!("Endpoint with empty id in category '{}'", category);
                }
                if !seen.insert(endpoint.id.as_str()) {
                    anyhow::bail!("Duplicate endpoint id: {}", endpoint.id);
                }
            }
        }

        Ok(())
    }

    /// All endpoints across every category, in category-name order
    pub fn all_endpoints(&self) -> Vec<&EndpointDef> {
        let mut categories: Vec<&String> = self.apis.keys().collect();
        categories.sort();

        categories
            .into_iter()
            .flat_map(|category| self.apis[category].iter())
            .collect()
    }

    /// Endpoints of one category; `None` when the category is absent or empty
    pub fn category(&self, name: &str) -> Option<&[EndpointDef]> {
        self.apis
            .get(name)
            .filter(|endpoints| !endpoints.is_empty())
            .map(Vec::as_slice)
    }

    /// Sorted category names
    pub fn category_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.apis.keys().cloned().collect();
        names.sort();
        names
    }

    /// Total number of configured endpoints
    pub fn endpoint_count(&self) -> usize {
        self.apis.values().map(Vec::len).sum()
    }
}
