//! Test helpers: build AppState and router on memory store backends.
//!
//! Run from workspace root: `cargo test -p filehub-api`.

use axum_test::TestServer;
use filehub_api::setup::routes;
use filehub_api::state::AppState;
use filehub_core::{Config, FolderId, StoreBackend};
use filehub_store::{FileStore, MemoryStore, RecordStore};
use std::sync::Arc;

pub const TEST_FOLDER_ID: i64 = 2664000000014747;

/// Test application: server plus a handle onto the shared memory store.
pub struct TestApp {
    pub server: TestServer,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(folder_id: Option<i64>) -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        max_upload_size_bytes: 50 * 1024 * 1024,
        folder_id: folder_id.map(FolderId),
        table_name: "Uploads".to_string(),
        store_backend: StoreBackend::Memory,
        catalyst_base_url: "https://api.catalyst.zoho.com".to_string(),
        catalyst_project_id: None,
        catalyst_oauth_token: None,
    }
}

/// App with a configured folder id.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with_folder(Some(TEST_FOLDER_ID))
}

/// App with an explicit (possibly absent) folder id.
pub fn setup_test_app_with_folder(folder_id: Option<i64>) -> TestApp {
    let config = test_config(folder_id);
    let store = MemoryStore::new();

    let files: Arc<dyn FileStore> = Arc::new(store.clone());
    let records: Arc<dyn RecordStore> = Arc::new(store.clone());
    let state = Arc::new(AppState::new(config.clone(), files, records));

    let router = routes::setup_routes(&config, state).expect("router setup");
    let server = TestServer::new(router).expect("test server");

    TestApp { server, store }
}
