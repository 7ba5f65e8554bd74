//! Store abstraction traits
//!
//! `FileStore` and `RecordStore` mirror the contracts the platform
//! exposes. Both are consumed behind `Arc<dyn _>` so the API never
//! couples to a concrete backend.

use async_trait::async_trait;
use bytes::Bytes;
use filehub_core::FolderId;
use serde_json::{Map, Value};
use thiserror::Error;

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Insert failed: {0}")]
    InsertFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Invalid store response: {0}")]
    InvalidResponse(String),

    #[cfg(feature = "store-catalyst")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Blob store: opaque files keyed by folder.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Upload a named byte stream into `folder` and return the store's raw
    /// acknowledgement. A well-behaved store includes an `id` and usually a
    /// `file_size`; presence of `id` is checked by the caller, not here.
    async fn upload_file(
        &self,
        folder: FolderId,
        filename: &str,
        data: Bytes,
    ) -> StoreResult<Value>;
}

/// Tabular record store: row inserts and read-only queries.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one row of named fields; returns the store's representation
    /// of the inserted row (including generated `ROWID` / `CREATEDTIME`).
    async fn insert_row(&self, table: &str, fields: Map<String, Value>) -> StoreResult<Value>;

    /// Run a read-only query string and return the ordered raw rows. Row
    /// shape is whatever the store sends; see `filehub_core::QueryRow`.
    async fn query(&self, query: &str) -> StoreResult<Vec<Value>>;
}
