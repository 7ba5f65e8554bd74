//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use filehub_core::Config;
use std::sync::Arc;

/// Initialize the application: store clients, state, and router.
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let (files, records) =
        filehub_store::create_stores(&config).context("Store initialization failed")?;

    if config.folder_id.is_none() {
        // Not fatal at startup: the contract is a per-request 500 with a
        // fixed message until the variable is set.
        tracing::warn!(
            "FILESTORE_FOLDER_ID is not set; every request will fail until it is configured"
        );
    }

    let state = Arc::new(AppState::new(config.clone(), files, records));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
