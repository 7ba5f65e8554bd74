//! Error types module
//!
//! The `AppError` enum covers every failure the request handler can
//! surface: missing configuration, input validation, an upstream that
//! reports success without honoring its contract, and plain upstream
//! faults. The HTTP layer maps each variant to a status code and the
//! `{ ok: false, error, raw? }` envelope.

use serde_json::Value;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as validation failures
    Debug,
    /// Unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The destination folder id was never configured. The wording is part
    /// of the API contract; clients match on it.
    #[error("Missing env var FILESTORE_FOLDER_ID in function settings")]
    MissingFolderId,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The blob store acknowledged the upload but returned no identifier.
    /// The raw acknowledgement is attached to the response for diagnosis.
    #[error("Upload succeeded but no file id returned")]
    MissingFileId { raw: Value },

    /// A raised fault from either external store, surfaced verbatim.
    #[error("{0}")]
    Upstream(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::MissingFolderId => 500,
            AppError::InvalidInput(_) => 400,
            AppError::MethodNotAllowed => 405,
            AppError::MissingFileId { .. } => 500,
            AppError::Upstream(_) => 500,
        }
    }

    /// Raw upstream payload to attach to the response, if any.
    pub fn raw_payload(&self) -> Option<&Value> {
        match self {
            AppError::MissingFileId { raw } => Some(raw),
            _ => None,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) | AppError::MethodNotAllowed => LogLevel::Debug,
            _ => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_folder_id_message_names_the_variable() {
        let err = AppError::MissingFolderId;
        assert_eq!(
            err.to_string(),
            "Missing env var FILESTORE_FOLDER_ID in function settings"
        );
        assert_eq!(err.http_status_code(), 500);
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = AppError::InvalidInput("Empty filename".into());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.to_string(), "Empty filename");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn missing_file_id_carries_the_raw_acknowledgement() {
        let err = AppError::MissingFileId {
            raw: json!({"file_name": "a.txt"}),
        };
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.raw_payload(), Some(&json!({"file_name": "a.txt"})));
        assert_eq!(err.to_string(), "Upload succeeded but no file id returned");
    }

    #[test]
    fn upstream_faults_surface_their_message_verbatim() {
        let err = AppError::Upstream("Insert failed: connection reset".into());
        assert_eq!(err.to_string(), "Insert failed: connection reset");
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.log_level(), LogLevel::Error);
    }
}
