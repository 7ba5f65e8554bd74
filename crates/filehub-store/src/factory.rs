//! Store backend factory

use crate::{FileStore, RecordStore, StoreError, StoreResult};
use filehub_core::{Config, StoreBackend};
use std::sync::Arc;

/// Create the file-store and record-store clients selected by configuration.
///
/// Both halves of the Catalyst backend are one shared client; the memory
/// backend likewise serves both contracts from one piece of state.
pub fn create_stores(config: &Config) -> StoreResult<(Arc<dyn FileStore>, Arc<dyn RecordStore>)> {
    match config.store_backend {
        #[cfg(feature = "store-catalyst")]
        StoreBackend::Catalyst => {
            let project_id = config.catalyst_project_id.clone().ok_or_else(|| {
                StoreError::ConfigError("CATALYST_PROJECT_ID not configured".to_string())
            })?;
            let oauth_token = config.catalyst_oauth_token.clone().ok_or_else(|| {
                StoreError::ConfigError("CATALYST_OAUTH_TOKEN not configured".to_string())
            })?;

            let client = Arc::new(crate::CatalystClient::new(
                config.catalyst_base_url.clone(),
                project_id,
                oauth_token,
            ));
            Ok((client.clone(), client))
        }

        #[cfg(not(feature = "store-catalyst"))]
        StoreBackend::Catalyst => Err(StoreError::ConfigError(
            "Catalyst backend not available (store-catalyst feature not enabled)".to_string(),
        )),

        #[cfg(feature = "store-memory")]
        StoreBackend::Memory => {
            let store = Arc::new(crate::MemoryStore::new());
            Ok((store.clone(), store))
        }

        #[cfg(not(feature = "store-memory"))]
        StoreBackend::Memory => Err(StoreError::ConfigError(
            "Memory backend not available (store-memory feature not enabled)".to_string(),
        )),
    }
}
