//! HTTP error response conversion
//!
//! Single fault boundary for the API: every handler returns
//! `Result<_, HttpAppError>` and this module renders any error as the
//! uniform `{ ok: false, error, raw? }` envelope with the right status.
//! Clients decide success from the `ok` boolean plus `error` string; they
//! never need to interpret status codes beyond that.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use filehub_core::{error::LogLevel, AppError};
use filehub_store::StoreError;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Error envelope returned on every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub ok: bool,
    pub error: String,
    /// Raw upstream payload, attached when an upstream succeeded but
    /// violated its contract.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub raw: Option<Value>,
}

/// Wrapper type for AppError to implement IntoResponse.
/// Needed because of the orphan rule: IntoResponse is external and
/// AppError lives in filehub-core.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

// Store faults carry no classification beyond their message; stringify
// and surface, per the failure policy.
impl From<StoreError> for HttpAppError {
    fn from(err: StoreError) -> Self {
        HttpAppError(AppError::Upstream(err.to_string()))
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, "request rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, "request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&app_error);

        let raw = app_error.raw_payload().cloned();
        let body = Json(ErrorResponse {
            ok: false,
            error: app_error.to_string(),
            raw,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn store_error_becomes_upstream_with_message() {
        let store_err = StoreError::InsertFailed("connection reset".to_string());
        let HttpAppError(app_err) = store_err.into();
        match app_err {
            AppError::Upstream(msg) => assert_eq!(msg, "Insert failed: connection reset"),
            _ => panic!("Expected Upstream variant"),
        }
    }

    /// The public envelope contract: `ok` always present and false,
    /// `error` a string, `raw` only when attached.
    #[test]
    fn error_envelope_shape() {
        let body = ErrorResponse {
            ok: false,
            error: "Empty filename".to_string(),
            raw: None,
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert_eq!(value.get("ok"), Some(&json!(false)));
        assert!(value.get("error").and_then(Value::as_str).is_some());
        assert!(value.get("raw").is_none());

        let body = ErrorResponse {
            ok: false,
            error: "Upload succeeded but no file id returned".to_string(),
            raw: Some(json!({"file_name": "a.txt"})),
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert_eq!(value.get("raw"), Some(&json!({"file_name": "a.txt"})));
    }
}
