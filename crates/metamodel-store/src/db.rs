//! Database connection management
//!
//! Provides utilities for opening and managing SQLite connections

use crate::config::DatabaseConfig;
use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
///
/// # Errors
///
/// Returns a `Persistence` error if the file cannot be opened.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database
///
/// # Errors
///
/// Returns a `Persistence` error if SQLite cannot allocate the database.
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Apply the configured pragmas to a connection
///
/// WAL is only requested for file databases; in-memory databases ignore it.
///
/// # Errors
///
/// Returns a `Persistence` error if a pragma is rejected.
pub fn configure(conn: &Connection, config: &DatabaseConfig) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(from_rusqlite)?;

    if config.wal && config.path.is_some() {
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(from_rusqlite)?;
    }

    Ok(())
}
