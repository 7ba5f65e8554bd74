//! In-memory store backend
//!
//! Backs both store contracts with process-local state. Used by the
//! integration tests and by `STORE_BACKEND=memory` for local development.
//! The backend deliberately reproduces the platform's quirks so the
//! handler's defensive paths can be exercised without network access:
//! query rows can be served namespaced under the table name or flat, and
//! upload acknowledgements can be made to omit `id` or `file_size`.

use crate::traits::{FileStore, RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use filehub_core::FolderId;
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};

/// Shape in which query rows are delivered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowShape {
    /// Fields nested one level under the table name.
    #[default]
    Namespaced,
    /// Fields at the top level of the row object.
    Flat,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    files: Vec<StoredFile>,
    tables: Vec<(String, Value)>,
    row_shape: RowShape,
    omit_upload_id: bool,
    omit_upload_size: bool,
    fail_next_insert: Option<String>,
}

struct StoredFile {
    #[allow(dead_code)]
    folder: FolderId,
    #[allow(dead_code)]
    filename: String,
    data: Bytes,
}

/// In-memory implementation of both store contracts.
///
/// Clones share state, so a test can keep a handle while the application
/// holds `Arc<dyn FileStore>` / `Arc<dyn RecordStore>` views of it.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            inner: Arc::new(Mutex::new(Inner {
                // Platform-style long numeric ids
                next_id: 2_664_000_000_001_000,
                ..Inner::default()
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Lock poisoning only happens if a holder panicked; tests want the
        // state regardless.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Serve query rows namespaced or flat.
    pub fn set_row_shape(&self, shape: RowShape) {
        self.lock().row_shape = shape;
    }

    /// Make upload acknowledgements omit the `id` field.
    pub fn set_omit_upload_id(&self, omit: bool) {
        self.lock().omit_upload_id = omit;
    }

    /// Make upload acknowledgements omit the `file_size` field.
    pub fn set_omit_upload_size(&self, omit: bool) {
        self.lock().omit_upload_size = omit;
    }

    /// Fail the next `insert_row` call with the given message.
    pub fn fail_next_insert(&self, message: impl Into<String>) {
        self.lock().fail_next_insert = Some(message.into());
    }

    /// Number of blobs stored so far.
    pub fn stored_file_count(&self) -> usize {
        self.lock().files.len()
    }

    /// Number of rows in `table`.
    pub fn row_count(&self, table: &str) -> usize {
        self.lock().tables.iter().filter(|(t, _)| t == table).count()
    }

    /// Total bytes of the most recently stored blob, if any.
    pub fn last_stored_size(&self) -> Option<usize> {
        self.lock().files.last().map(|f| f.data.len())
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn upload_file(
        &self,
        folder: FolderId,
        filename: &str,
        data: Bytes,
    ) -> StoreResult<Value> {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        let size = data.len();
        inner.files.push(StoredFile {
            folder,
            filename: filename.to_string(),
            data,
        });

        let mut ack = Map::new();
        if !inner.omit_upload_id {
            ack.insert("id".to_string(), json!(id.to_string()));
        }
        ack.insert("file_name".to_string(), json!(filename));
        if !inner.omit_upload_size {
            ack.insert("file_size".to_string(), json!(size));
        }
        ack.insert("folder_details".to_string(), json!(folder.to_string()));
        Ok(Value::Object(ack))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_row(&self, table: &str, fields: Map<String, Value>) -> StoreResult<Value> {
        let mut inner = self.lock();
        if let Some(message) = inner.fail_next_insert.take() {
            return Err(StoreError::InsertFailed(message));
        }

        let row_id = inner.next_id;
        inner.next_id += 1;

        let mut row = fields;
        row.insert("ROWID".to_string(), json!(row_id.to_string()));
        row.insert(
            "CREATEDTIME".to_string(),
            json!(Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()),
        );

        let row = Value::Object(row);
        inner.tables.push((table.to_string(), row.clone()));
        Ok(row)
    }

    async fn query(&self, query: &str) -> StoreResult<Vec<Value>> {
        let inner = self.lock();
        let table = table_from_query(query)
            .ok_or_else(|| StoreError::QueryFailed(format!("unsupported query: {}", query)))?;
        let limit = limit_from_query(query).unwrap_or(usize::MAX);

        // Insertion order doubles as creation-time order; newest first.
        let rows = inner
            .tables
            .iter()
            .rev()
            .filter(|(t, _)| t == &table)
            .take(limit)
            .map(|(t, row)| match inner.row_shape {
                RowShape::Namespaced => {
                    let mut wrapped = Map::new();
                    wrapped.insert(t.clone(), row.clone());
                    Value::Object(wrapped)
                }
                RowShape::Flat => row.clone(),
            })
            .collect();
        Ok(rows)
    }
}

fn table_from_query(query: &str) -> Option<String> {
    let mut words = query.split_whitespace();
    while let Some(word) = words.next() {
        if word.eq_ignore_ascii_case("from") {
            return words.next().map(|t| t.trim_end_matches(',').to_string());
        }
    }
    None
}

fn limit_from_query(query: &str) -> Option<usize> {
    let mut words = query.split_whitespace();
    while let Some(word) = words.next() {
        if word.eq_ignore_ascii_case("limit") {
            return words.next().and_then(|n| n.parse().ok());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY: &str =
        "SELECT ROWID, file_name, file_id, file_size, CREATEDTIME FROM Uploads \
         ORDER BY CREATEDTIME DESC LIMIT 25";

    fn fields(name: &str) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("file_name".to_string(), json!(name));
        m.insert("file_id".to_string(), json!("42"));
        m.insert("file_size".to_string(), json!(10));
        m
    }

    #[tokio::test]
    async fn upload_acknowledgement_has_id_and_size() {
        let store = MemoryStore::new();
        let ack = store
            .upload_file(FolderId(1), "a.txt", Bytes::from_static(b"hello"))
            .await
            .expect("upload");
        assert!(ack.get("id").is_some());
        assert_eq!(ack.get("file_size"), Some(&json!(5)));
        assert_eq!(store.stored_file_count(), 1);
    }

    #[tokio::test]
    async fn upload_acknowledgement_can_omit_id() {
        let store = MemoryStore::new();
        store.set_omit_upload_id(true);
        let ack = store
            .upload_file(FolderId(1), "a.txt", Bytes::from_static(b"hello"))
            .await
            .expect("upload");
        assert!(ack.get("id").is_none());
        // The blob is still stored; only the acknowledgement is degraded.
        assert_eq!(store.stored_file_count(), 1);
    }

    #[tokio::test]
    async fn insert_assigns_rowid_and_createdtime() {
        let store = MemoryStore::new();
        let row = store
            .insert_row("Uploads", fields("a.txt"))
            .await
            .expect("insert");
        assert!(row.get("ROWID").is_some());
        assert!(row.get("CREATEDTIME").is_some());
        assert_eq!(row.get("file_name"), Some(&json!("a.txt")));
    }

    #[tokio::test]
    async fn failed_insert_consumes_the_failure() {
        let store = MemoryStore::new();
        store.fail_next_insert("connection reset");
        let err = store
            .insert_row("Uploads", fields("a.txt"))
            .await
            .expect_err("insert should fail");
        assert!(err.to_string().contains("connection reset"));
        // The knob is one-shot.
        assert!(store.insert_row("Uploads", fields("b.txt")).await.is_ok());
    }

    #[tokio::test]
    async fn query_returns_newest_first_up_to_limit() {
        let store = MemoryStore::new();
        store.set_row_shape(RowShape::Flat);
        for i in 0..30 {
            store
                .insert_row("Uploads", fields(&format!("f{}.txt", i)))
                .await
                .expect("insert");
        }
        let rows = store.query(QUERY).await.expect("query");
        assert_eq!(rows.len(), 25);
        assert_eq!(rows[0].get("file_name"), Some(&json!("f29.txt")));
    }

    #[tokio::test]
    async fn namespaced_rows_nest_fields_under_the_table_name() {
        let store = MemoryStore::new();
        store.set_row_shape(RowShape::Namespaced);
        store
            .insert_row("Uploads", fields("a.txt"))
            .await
            .expect("insert");
        let rows = store.query(QUERY).await.expect("query");
        assert!(rows[0].get("Uploads").is_some());
    }
}
