//! SQLite backend
//!
//! - `SqliteDataContext`: tables, interceptors and queries over one connection
//! - `SqliteRowInsertionBuilder`: parameterised single-row insert
//! - `value`: binding and reading of metamodel values

pub mod context;
pub mod insert;
pub mod value;

pub use context::SqliteDataContext;
pub use insert::SqliteRowInsertionBuilder;
