//! Metamodel Store - SQLite backend, filesystem resources and configuration
//!
//! Provides:
//! - TOML store configuration
//! - SQLite connection management
//! - SQLite data context whose insert builders run through the registered
//!   row-insertion interceptors
//! - File resources with atomic replace-on-close writes

pub mod config;
pub mod db;
pub mod errors;
pub mod resource;
pub mod sqlite;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use resource::FileResource;
pub use sqlite::SqliteDataContext;
