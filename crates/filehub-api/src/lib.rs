//! FileHub API Library
//!
//! This crate provides the HTTP handlers and application setup for the
//! upload-and-list service.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;

// Public modules
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
