use super::base::{StorageError, StorageItem};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Writes items as pretty JSON files, one per item, grouped by host.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    base_path: PathBuf,
    filename_prefix: Option<String>,
}

impl DiskStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, StorageError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            filename_prefix: None,
        })
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.filename_prefix = Some(prefix.to_string());
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn store<T: Serialize>(&self, item: &StorageItem<T>) -> Result<PathBuf, StorageError> {
        let timestamp = item.timestamp.format("%Y%m%d_%H%M%S");
        let host = item.url.host_str().unwrap_or("unknown");
        let prefix = self.filename_prefix.as_deref().unwrap_or("");
        let filename = format!("{}{}_{}.json", prefix, timestamp, Uuid::now_v7());

        let dir = self.base_path.join(host);
        fs::create_dir_all(&dir)?;
        let final_path = dir.join(filename);

        fs::write(&final_path, serde_json::to_string_pretty(item)?)?;
        debug!("Stored item for {} at {}", item.url, final_path.display());
        Ok(final_path)
    }
}
