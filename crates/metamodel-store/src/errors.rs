//! Error handling for metamodel-store
//!
//! Wraps metamodel-core MmError with store-specific helpers

use metamodel_core::errors::{MetaModelError, MmError, MmErrorKind};

/// Result type alias using MmError
pub type Result<T> = std::result::Result<T, MmError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> MmError {
    MmError::new(MmErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an insertion error for a statement the database refused
pub fn insertion_rejected(table: &str, err: rusqlite::Error) -> MmError {
    MetaModelError::InsertionRejected {
        table: table.to_string(),
        reason: err.to_string(),
    }
    .into()
}

/// Create a table lookup error
pub fn table_not_found(table: &str) -> MmError {
    MetaModelError::TableNotFound {
        table: table.to_string(),
    }
    .into()
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> MmError {
    MetaModelError::Config {
        message: reason.into(),
    }
    .into()
}

/// Create an error for a poisoned connection lock
pub fn lock_poisoned(op: &str) -> MmError {
    MmError::new(MmErrorKind::Internal)
        .with_op(op.to_string())
        .with_message("connection lock poisoned")
}
