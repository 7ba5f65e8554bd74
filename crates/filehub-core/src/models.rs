//! Domain models
//!
//! The upload metadata row, the blob-store folder identifier, and the
//! row-shape normalization applied to record-store query results.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Numeric identifier of the destination blob-store folder.
///
/// The platform hands these out as 16/17-digit integers; configuration
/// carries them in string form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(pub i64);

impl FromStr for FolderId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(FolderId)
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata row persisted for every successful upload.
///
/// `ROWID` and `CREATEDTIME` are generated by the record store, `file_id`
/// by the blob store. Field names follow the store's column naming.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadRecord {
    #[serde(rename = "ROWID")]
    pub row_id: String,
    pub file_name: String,
    pub file_id: String,
    pub file_size: i64,
    #[serde(rename = "CREATEDTIME")]
    pub created_time: String,
}

/// A raw query result row as delivered by the record store.
///
/// The store sometimes namespaces a row's fields one level under the table
/// name and sometimes returns them flat. This union resolves the ambiguity
/// once, at the boundary; handlers only ever see the unwrapped shape.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryRow {
    /// Fields were nested under the table name.
    Namespaced(Value),
    /// Fields arrived at the top level (or the row was not an object).
    Flat(Value),
}

impl QueryRow {
    /// Classify a raw row. A row is namespaced only when it is an object
    /// whose entry for `table` is itself an object; anything else passes
    /// through untouched.
    pub fn from_value(table: &str, row: Value) -> Self {
        match row {
            Value::Object(mut obj) => match obj.remove(table) {
                Some(fields @ Value::Object(_)) => QueryRow::Namespaced(fields),
                Some(other) => {
                    obj.insert(table.to_string(), other);
                    QueryRow::Flat(Value::Object(obj))
                }
                None => QueryRow::Flat(Value::Object(obj)),
            },
            other => QueryRow::Flat(other),
        }
    }

    /// The normalized field mapping.
    pub fn into_value(self) -> Value {
        match self {
            QueryRow::Namespaced(fields) | QueryRow::Flat(fields) => fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn folder_id_parses_digit_strings() {
        let id: FolderId = "2664000000014747".parse().expect("parse");
        assert_eq!(id, FolderId(2664000000014747));
        assert_eq!(id.to_string(), "2664000000014747");
    }

    #[test]
    fn folder_id_rejects_non_numeric() {
        assert!("folder-a".parse::<FolderId>().is_err());
        assert!("".parse::<FolderId>().is_err());
    }

    #[test]
    fn namespaced_row_unwraps_to_fields() {
        let row = json!({"Uploads": {"ROWID": "1", "file_name": "a.txt"}});
        let normalized = QueryRow::from_value("Uploads", row).into_value();
        assert_eq!(normalized, json!({"ROWID": "1", "file_name": "a.txt"}));
    }

    #[test]
    fn flat_row_passes_through() {
        let row = json!({"ROWID": "1", "file_name": "a.txt"});
        let normalized = QueryRow::from_value("Uploads", row.clone()).into_value();
        assert_eq!(normalized, row);
    }

    #[test]
    fn namespaced_and_flat_rows_normalize_to_identical_shape() {
        let fields = json!({"ROWID": "7", "file_name": "b.txt", "file_size": 42});
        let nested = QueryRow::from_value("Uploads", json!({ "Uploads": fields.clone() }));
        let flat = QueryRow::from_value("Uploads", fields.clone());
        assert_eq!(nested.into_value(), flat.into_value());
    }

    #[test]
    fn table_name_entry_must_be_an_object_to_unwrap() {
        // A column that happens to share the table name does not trigger
        // unwrapping unless its value is an object.
        let row = json!({"Uploads": 3, "file_name": "a.txt"});
        let normalized = QueryRow::from_value("Uploads", row.clone()).into_value();
        assert_eq!(normalized, row);
    }

    #[test]
    fn non_object_row_is_kept_as_is() {
        let normalized = QueryRow::from_value("Uploads", json!("opaque")).into_value();
        assert_eq!(normalized, json!("opaque"));
    }

    #[test]
    fn upload_record_uses_store_column_names() {
        let record = UploadRecord {
            row_id: "101".into(),
            file_name: "report.pdf".into(),
            file_id: "555".into(),
            file_size: 1024,
            created_time: "2026-08-25 10:00:00.000".into(),
        };
        let value = serde_json::to_value(&record).expect("serialize");
        assert!(value.get("ROWID").is_some());
        assert!(value.get("CREATEDTIME").is_some());
        assert_eq!(value.get("file_size"), Some(&json!(1024)));
    }
}
