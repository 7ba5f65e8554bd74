//! FileHub store library
//!
//! Contracts for the two external platform stores the service talks to:
//! a blob store ("upload named bytes into a folder, get an id back") and
//! a tabular record store ("insert a row", "run a read-only query").
//!
//! Two backends implement both contracts: a Catalyst-style REST client
//! and an in-memory store used by tests and local development. The raw
//! upstream payloads stay `serde_json::Value` at this boundary; callers
//! decide what to make of them.

#[cfg(feature = "store-catalyst")]
pub mod catalyst;
pub mod factory;
#[cfg(feature = "store-memory")]
pub mod memory;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "store-catalyst")]
pub use catalyst::CatalystClient;
pub use factory::create_stores;
#[cfg(feature = "store-memory")]
pub use memory::{MemoryStore, RowShape};
pub use traits::{FileStore, RecordStore, StoreError, StoreResult};
