use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Value of the `type` field that marks dashboard documents.
pub const DASHBOARD_DOC_TYPE: &str = "dashboard";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid document: {0}")]
    Document(String),
    #[error("invalid store credentials: {0}")]
    Credentials(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Document(err.to_string())
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Payload of the newest dashboard document, if the store holds one.
    async fn latest_dashboard_payload(&self) -> Result<Option<Value>, StorageError>;
}

/// Used when no store is configured; the dashboard then serves sample data.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStore;

#[async_trait]
impl DocumentStore for NoStore {
    async fn latest_dashboard_payload(&self) -> Result<Option<Value>, StorageError> {
        Ok(None)
    }
}
