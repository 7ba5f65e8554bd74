//! Configuration module
//!
//! Environment-sourced configuration, loaded once at process start into an
//! immutable struct. `FILESTORE_FOLDER_ID` is deliberately not a startup
//! requirement: the original contract is that a missing folder id fails
//! every request with a fixed message, so absence leaves the field unset
//! and the handlers report it per request.

use std::env;

use crate::models::FolderId;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 50;
const DEFAULT_TABLE_NAME: &str = "Uploads";
const DEFAULT_CATALYST_BASE_URL: &str = "https://api.catalyst.zoho.com";

/// Which pair of store backends to talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// Catalyst-style platform REST API (file store + data store).
    Catalyst,
    /// In-process stores for tests and local development.
    Memory,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_upload_size_bytes: usize,
    /// Destination folder for uploads. `None` when `FILESTORE_FOLDER_ID`
    /// is unset; requests then fail with the fixed missing-config error.
    pub folder_id: Option<FolderId>,
    /// Record-store table holding upload metadata.
    pub table_name: String,
    pub store_backend: StoreBackend,
    pub catalyst_base_url: String,
    pub catalyst_project_id: Option<String>,
    pub catalyst_oauth_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);

        // Absent or blank is tolerated (reported per request); a present
        // but non-numeric value is a misconfiguration worth failing on.
        let folder_id = match env::var("FILESTORE_FOLDER_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.parse::<FolderId>().map_err(|_| {
                anyhow::anyhow!("FILESTORE_FOLDER_ID must be the integer id of a folder")
            })?),
            _ => None,
        };

        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "catalyst".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            _ => StoreBackend::Catalyst,
        };

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            folder_id,
            table_name: env::var("UPLOADS_TABLE_NAME")
                .unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string()),
            store_backend,
            catalyst_base_url: env::var("CATALYST_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CATALYST_BASE_URL.to_string()),
            catalyst_project_id: env::var("CATALYST_PROJECT_ID")
                .ok()
                .filter(|s| !s.is_empty()),
            catalyst_oauth_token: env::var("CATALYST_OAUTH_TOKEN")
                .ok()
                .filter(|s| !s.is_empty()),
        })
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
