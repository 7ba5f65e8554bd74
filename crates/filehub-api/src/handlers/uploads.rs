//! Upload and listing handlers
//!
//! The whole service is this one method-routed endpoint: POST accepts a
//! multipart upload and performs the two-step write (blob first, metadata
//! row second), GET returns the most recent rows. Validation failures
//! short-circuit before any external call; everything else propagates to
//! the `HttpAppError` boundary.

use crate::constants::LIST_LIMIT;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    http::{header, HeaderMap},
    Json,
};
use bytes::Bytes;
use filehub_core::{AppError, QueryRow};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse {
    /// Always `true`.
    pub ok: bool,
    /// Number of rows in `data`.
    pub count: usize,
    /// Normalized metadata rows, newest first.
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Always `true`.
    pub ok: bool,
    /// Raw blob-store acknowledgement.
    #[schema(value_type = Object)]
    pub file: Value,
    /// Raw record-store representation of the inserted row.
    #[schema(value_type = Object)]
    pub row: Value,
}

fn list_query(table: &str) -> String {
    format!(
        "SELECT ROWID, file_name, file_id, file_size, CREATEDTIME \
         FROM {} ORDER BY CREATEDTIME DESC LIMIT {}",
        table, LIST_LIMIT
    )
}

#[utoipa::path(
    get,
    path = "/",
    tag = "uploads",
    responses(
        (status = 200, description = "Most recent upload records, newest first", body = ListResponse),
        (status = 500, description = "Missing configuration or store failure", body = ErrorResponse)
    )
)]
pub async fn list_recent(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse>, HttpAppError> {
    // Config resolution runs for reads too, even though listing never
    // touches the folder. Documented behavior; see AppState.
    state.require_folder_id()?;

    let rows = state.records.query(&list_query(&state.table_name)).await?;

    let data: Vec<Value> = rows
        .into_iter()
        .map(|row| QueryRow::from_value(&state.table_name, row).into_value())
        .collect();

    Ok(Json(ListResponse {
        ok: true,
        count: data.len(),
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored and metadata row inserted", body = UploadResponse),
        (status = 400, description = "Missing file part or empty filename", body = ErrorResponse),
        (status = 500, description = "Missing configuration, store failure, or upload without file id", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let folder = state.require_folder_id()?;

    // A body that is not multipart at all is the same caller mistake as a
    // form without the expected part.
    let Ok(mut multipart) = multipart else {
        return Err(AppError::InvalidInput("No file part. Use form-data key: file".to_string()).into());
    };

    let declared_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok());

    // Scan for the part named `file`; extra parts are skipped.
    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Invalid multipart payload: {}", e)))?;
        upload = Some((filename, data));
        break;
    }

    let Some((filename, data)) = upload else {
        return Err(AppError::InvalidInput("No file part. Use form-data key: file".to_string()).into());
    };
    if filename.is_empty() {
        return Err(AppError::InvalidInput("Empty filename".to_string()).into());
    }

    let uploaded = state.files.upload_file(folder, &filename, data).await?;

    // Transport succeeded but the contract was violated: report with the
    // raw acknowledgement attached, and never insert metadata for a blob
    // we cannot reference.
    let Some(file_id) = uploaded_file_id(&uploaded) else {
        return Err(AppError::MissingFileId { raw: uploaded }.into());
    };

    // Prefer the size the store reports; fall back to the declared
    // content length, then 0.
    let file_size = upstream_file_size(&uploaded)
        .or(declared_length)
        .unwrap_or(0);

    let mut fields = Map::new();
    fields.insert("file_name".to_string(), Value::String(filename.clone()));
    fields.insert("file_id".to_string(), file_id);
    fields.insert("file_size".to_string(), Value::from(file_size));

    let row = state.records.insert_row(&state.table_name, fields).await?;

    tracing::info!(file_name = %filename, file_size, "file uploaded");

    Ok(Json(UploadResponse {
        ok: true,
        file: uploaded,
        row,
    }))
}

/// Handles every method other than GET and POST on the endpoint. The
/// configuration check still runs first: dispatch order is config, then
/// method.
pub async fn method_not_allowed(State(state): State<Arc<AppState>>) -> HttpAppError {
    if let Err(err) = state.require_folder_id() {
        return err.into();
    }
    AppError::MethodNotAllowed.into()
}

/// The acknowledgement's `id`, unless it is missing or empty. Null, empty
/// string, zero, and false all count as no id.
fn uploaded_file_id(uploaded: &Value) -> Option<Value> {
    let id = uploaded.get("id")?;
    let empty = match id {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_i64() == Some(0) || n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    if empty {
        None
    } else {
        Some(id.clone())
    }
}

/// Size reported by the blob store, if usable. Upstream sends a number or
/// a numeric string depending on endpoint; absent, null, zero, and empty
/// string all fall through to the caller's next choice.
fn upstream_file_size(uploaded: &Value) -> Option<i64> {
    let size = match uploaded.get("file_size")? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    if size == 0 {
        None
    } else {
        Some(size)
    }
}
