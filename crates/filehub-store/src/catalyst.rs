//! Catalyst REST backend
//!
//! Implements both store contracts against the platform's BaaS REST API.
//! Every response arrives wrapped in `{"status": "...", "data": ...}`;
//! anything other than a 2xx with `status == "success"` is surfaced as a
//! `StoreError`. No retries and no client-side timeouts beyond reqwest's
//! defaults: failure policy lives with the caller.

use crate::traits::{FileStore, RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use bytes::Bytes;
use filehub_core::FolderId;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Map, Value};

/// Client for the Catalyst file store and data store of one project.
#[derive(Clone)]
pub struct CatalystClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    oauth_token: String,
}

impl CatalystClient {
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        oauth_token: impl Into<String>,
    ) -> Self {
        CatalystClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            project_id: project_id.into(),
            oauth_token: oauth_token.into(),
        }
    }

    fn project_url(&self, suffix: &str) -> String {
        format!(
            "{}/baas/v1/project/{}{}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            suffix
        )
    }

    /// Unwrap the platform envelope, returning the `data` payload.
    async fn response_data(response: reqwest::Response) -> StoreResult<Value> {
        let status = response.status();
        let body: Value = response.json().await?;

        let envelope_status = body.get("status").and_then(Value::as_str).unwrap_or("");
        if !status.is_success() || envelope_status != "success" {
            let message = body
                .get("data")
                .and_then(|d| d.get("message"))
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| format!("unexpected response (HTTP {})", status.as_u16()));
            return Err(StoreError::InvalidResponse(message));
        }

        body.get("data")
            .cloned()
            .ok_or_else(|| StoreError::InvalidResponse("envelope without data".to_string()))
    }
}

#[async_trait]
impl FileStore for CatalystClient {
    async fn upload_file(
        &self,
        folder: FolderId,
        filename: &str,
        data: Bytes,
    ) -> StoreResult<Value> {
        let url = self.project_url(&format!("/folder/{}/file", folder));

        // The platform expects the file content under the part name "code".
        let part = Part::bytes(data.to_vec()).file_name(filename.to_string());
        let form = Form::new().part("code", part);

        tracing::debug!(folder = %folder, filename = %filename, "uploading file");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.oauth_token)
            .multipart(form)
            .send()
            .await?;

        Self::response_data(response)
            .await
            .map_err(|e| StoreError::UploadFailed(e.to_string()))
    }
}

#[async_trait]
impl RecordStore for CatalystClient {
    async fn insert_row(&self, table: &str, fields: Map<String, Value>) -> StoreResult<Value> {
        let url = self.project_url(&format!("/table/{}/row", table));

        // The row endpoint takes a batch; we always send exactly one row
        // and hand back its representation.
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.oauth_token)
            .json(&json!([Value::Object(fields)]))
            .send()
            .await?;

        let data = Self::response_data(response)
            .await
            .map_err(|e| StoreError::InsertFailed(e.to_string()))?;

        match data {
            Value::Array(mut rows) if !rows.is_empty() => Ok(rows.remove(0)),
            other => Ok(other),
        }
    }

    async fn query(&self, query: &str) -> StoreResult<Vec<Value>> {
        let url = self.project_url("/query");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.oauth_token)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let data = Self::response_data(response)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        match data {
            Value::Array(rows) => Ok(rows),
            other => Err(StoreError::InvalidResponse(format!(
                "query returned non-array data: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_url_joins_base_and_suffix() {
        let client = CatalystClient::new("https://api.example.com/", "123", "token");
        assert_eq!(
            client.project_url("/query"),
            "https://api.example.com/baas/v1/project/123/query"
        );
    }
}
