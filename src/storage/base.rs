use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone)]
pub enum StorageError {
    #[error("Storage operation failed: {0}")]
    OperationError(String),
    #[error("Serialization failed: {0}")]
    SerializationError(String),
}

impl From<std::io::Error> for StorageError {
    fn from(error: std::io::Error) -> Self {
        StorageError::OperationError(error.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        StorageError::SerializationError(error.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageItem<T: Serialize> {
    pub url: Url,
    pub timestamp: DateTime<Utc>,
    pub data: T,
    pub metadata: Option<Value>,
}

impl<T: Serialize> StorageItem<T> {
    pub fn new(url: Url, data: T) -> Self {
        Self {
            url,
            timestamp: Utc::now(),
            data,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
