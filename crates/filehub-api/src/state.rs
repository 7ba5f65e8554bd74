//! Application state
//!
//! One immutable state struct shared across handlers. The folder id is
//! resolved from configuration once at startup and carried as an
//! `Option`: its absence is not a boot failure but a per-request error,
//! matching the service's long-standing contract.

use filehub_core::{AppError, Config, FolderId};
use filehub_store::{FileStore, RecordStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Destination folder for uploads; `None` until configured.
    pub folder_id: Option<FolderId>,
    /// Record-store table holding upload metadata.
    pub table_name: String,
    pub files: Arc<dyn FileStore>,
    pub records: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(config: Config, files: Arc<dyn FileStore>, records: Arc<dyn RecordStore>) -> Self {
        AppState {
            folder_id: config.folder_id,
            table_name: config.table_name.clone(),
            config,
            files,
            records,
        }
    }

    /// Resolve the configured folder id.
    ///
    /// Runs first for every method, reads included: a GET with missing
    /// configuration fails even though listing never touches the folder.
    /// Documented behavior, kept deliberately.
    pub fn require_folder_id(&self) -> Result<FolderId, AppError> {
        self.folder_id.ok_or(AppError::MissingFolderId)
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
