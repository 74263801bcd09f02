//! Response file persistence
//!
//! Writes one pretty-printed copy of each successful response body under a
//! relative directory. Persistence is best-effort: callers log write
//! failures and continue.

use crate::services::analyzer;
use crate::utils::error::AppResult;
use chrono::Local;
use std::path::PathBuf;
use tracing::debug;

/// Timestamp embedded in generated file names
const FILE_DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Directory used when none is given
const DEFAULT_DIR: &str = "logs/responses";

/// Store for raw response bodies
#[derive(Debug, Clone)]
pub struct ResponseStore {
    dir: PathBuf,
}

impl Default for ResponseStore {
    fn default() -> Self {
        Self::new(DEFAULT_DIR)
    }
}

impl ResponseStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist one response body as `{api_id}_{yyyyMMdd_HHmmss}.json`
    ///
    /// The body is pretty-printed first; invalid JSON is written as-is.
    pub async fn save(&self, api_id: &str, body: &str) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let timestamp = Local::now().format(FILE_DATE_FORMAT);
        let path = self.dir.join(format!("{}_{}.json", api_id, timestamp));

        tokio::fs::write(&path, analyzer::pretty_print(body)).await?;

        debug!("API response saved to file: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_pretty_printed_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResponseStore::new(tmp.path().join("responses"));

        let path = store.save("sto_bydd_trd", r#"{"x":1}"#).await.unwrap();

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("sto_bydd_trd_"));
        assert!(name.ends_with(".json"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"x\": 1\n}");
    }

    #[tokio::test]
    async fn test_save_keeps_invalid_json_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResponseStore::new(tmp.path());

        let path = store.save("idx_bydd_trd", "not json at all").await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "not json at all"
        );
    }

    #[tokio::test]
    async fn test_save_creates_directory_on_demand() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        let store = ResponseStore::new(&nested);

        store.save("etf_bydd_trd", "{}").await.unwrap();
        assert!(nested.exists());
    }
}
