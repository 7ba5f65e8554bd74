//! FileHub core library
//!
//! Configuration, error types, and domain models shared by the store
//! backends and the HTTP API.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, StoreBackend};
pub use error::AppError;
pub use models::{FolderId, QueryRow, UploadRecord};
