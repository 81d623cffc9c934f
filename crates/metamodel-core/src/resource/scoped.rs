//! Scoped stream acquisition
//!
//! Each helper takes ownership of an open stream, runs the callback and then
//! closes the stream exactly once, whether the callback succeeded or not.
//! A callback error always wins over a close error; the close error is then
//! only logged.

use crate::errors::{MetaModelError, MmError, Result};
use crate::resource::{InputStream, OutputStream};
use std::io::{Read, Write};

/// Run `f` against an output stream and close it afterwards
///
/// # Errors
///
/// Returns the callback's error unchanged, or a `Resource` error if the
/// callback succeeded but the stream failed to close.
pub fn with_output<T, F>(
    resource: &str,
    op: &str,
    mut stream: Box<dyn OutputStream>,
    f: F,
) -> Result<T>
where
    F: FnOnce(&mut dyn Write) -> Result<T>,
{
    tracing::debug!(resource, op, "output stream opened");
    let outcome = f(&mut stream);
    let closed = stream.close();
    settle(resource, op, outcome, closed)
}

/// Run `f` against an input stream and close it afterwards
///
/// # Errors
///
/// Returns the callback's error unchanged, or a `Resource` error if the
/// callback succeeded but the stream failed to close.
pub fn with_input<T, F>(
    resource: &str,
    op: &str,
    mut stream: Box<dyn InputStream>,
    f: F,
) -> Result<T>
where
    F: FnOnce(&mut dyn Read) -> Result<T>,
{
    tracing::debug!(resource, op, "input stream opened");
    let outcome = f(&mut stream);
    let closed = stream.close();
    settle(resource, op, outcome, closed)
}

fn settle<T>(
    resource: &str,
    op: &str,
    outcome: Result<T>,
    closed: std::io::Result<()>,
) -> Result<T> {
    match (outcome, closed) {
        (Ok(value), Ok(())) => {
            tracing::debug!(resource, op, "stream closed");
            Ok(value)
        }
        (Ok(_), Err(e)) => Err(unavailable(resource, &format!("{}_close", op), &e)),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            tracing::warn!(
                resource,
                op,
                error = %close_err,
                "stream failed to close after callback error"
            );
            Err(e)
        }
    }
}

/// `Resource` error for a failed stream operation
pub fn unavailable(resource: &str, op: &str, err: &std::io::Error) -> MmError {
    MetaModelError::ResourceUnavailable {
        resource: resource.to_string(),
        op: op.to_string(),
        reason: err.to_string(),
    }
    .into()
}

/// `ReadOnly` error for a rejected write or append
pub fn read_only(resource: &str) -> MmError {
    MetaModelError::ResourceReadOnly {
        resource: resource.to_string(),
    }
    .into()
}

/// `NotFound` error for a read of a missing resource
pub fn not_found(resource: &str) -> MmError {
    MetaModelError::ResourceNotFound {
        resource: resource.to_string(),
    }
    .into()
}
