//! Resources: named handles to byte-addressable storage
//!
//! A [`Resource`] exposes metadata about a backing store (file, in-memory
//! blob, ...) and hands out streams to it. The preferred access pattern is
//! scoped: [`Resource::write`], [`Resource::append`], [`Resource::read_with`]
//! and [`ResourceExt::read_map`] open a stream, pass it to a callback and
//! close it on every exit path before returning. [`Resource::read`] returns
//! an open stream for cases where it has to outlive the calling function; the
//! caller then owns closing it.
//!
//! Metadata is evaluated on every call, never cached.

pub mod memory;
pub mod scoped;

use crate::errors::Result;
use std::io::{Read, Write};

pub use memory::InMemoryResource;

/// Returned by [`Resource::size`] when the size cannot be determined cheaply
pub const UNKNOWN_SIZE: i64 = -1;

/// Returned by [`Resource::last_modified`] when no timestamp is available
pub const UNKNOWN_LAST_MODIFIED: i64 = -1;

/// Writable stream handed out by a resource
pub trait OutputStream: Write + Send {
    /// Flush and release the stream
    ///
    /// Consuming `self` makes a second close impossible.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while flushing or releasing.
    fn close(self: Box<Self>) -> std::io::Result<()>;
}

/// Readable stream handed out by a resource
pub trait InputStream: Read + Send {
    /// Release the stream
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while releasing.
    fn close(self: Box<Self>) -> std::io::Result<()>;
}

/// Callback receiving an open output stream
pub type WriteCallback<'a> = dyn FnMut(&mut dyn Write) -> Result<()> + 'a;

/// Callback receiving an open input stream
pub type ReadCallback<'a> = dyn FnMut(&mut dyn Read) -> Result<()> + 'a;

/// A named resource from which bytes can be read and to which bytes can be
/// written
pub trait Resource: Send + Sync {
    /// Identifying name, typically a file name; not necessarily unique
    fn name(&self) -> &str;

    /// Whether writes are impossible
    fn is_read_only(&self) -> bool;

    /// Whether the backing data currently exists
    fn is_exists(&self) -> bool;

    /// Size in bytes (approximations allowed), or [`UNKNOWN_SIZE`]
    fn size(&self) -> i64;

    /// Milliseconds since the Unix epoch of the last modification, or
    /// [`UNKNOWN_LAST_MODIFIED`]
    fn last_modified(&self) -> i64;

    /// Open a stream that replaces the current content once closed
    ///
    /// # Errors
    ///
    /// `ReadOnly` for read-only resources, `Resource` if the stream cannot
    /// be opened.
    fn open_write(&self) -> Result<Box<dyn OutputStream>>;

    /// Open a stream positioned after the current content
    ///
    /// # Errors
    ///
    /// `ReadOnly` for read-only resources, `Resource` if the stream cannot
    /// be opened.
    fn open_append(&self) -> Result<Box<dyn OutputStream>>;

    /// Open a stream over the current content
    ///
    /// The caller owns the stream and must close it (dropping also releases
    /// it). Prefer [`read_with`](Self::read_with) or
    /// [`ResourceExt::read_map`] which release the stream themselves.
    ///
    /// # Errors
    ///
    /// `NotFound` if the resource does not exist, `Resource` if the stream
    /// cannot be opened.
    fn read(&self) -> Result<Box<dyn InputStream>>;

    /// Overwrite the resource with whatever the callback writes
    ///
    /// # Errors
    ///
    /// Open and close failures as `Resource`/`ReadOnly` errors; callback
    /// errors are returned unchanged.
    fn write(&self, callback: &mut WriteCallback<'_>) -> Result<()> {
        if self.is_read_only() {
            return Err(scoped::read_only(self.name()));
        }
        scoped::with_output(self.name(), "write", self.open_write()?, |out| callback(out))
    }

    /// Append whatever the callback writes to the existing content
    ///
    /// # Errors
    ///
    /// Open and close failures as `Resource`/`ReadOnly` errors; callback
    /// errors are returned unchanged.
    fn append(&self, callback: &mut WriteCallback<'_>) -> Result<()> {
        if self.is_read_only() {
            return Err(scoped::read_only(self.name()));
        }
        scoped::with_output(self.name(), "append", self.open_append()?, |out| callback(out))
    }

    /// Hand an open input stream to the callback
    ///
    /// # Errors
    ///
    /// Open and close failures as `Resource`/`NotFound` errors; callback
    /// errors are returned unchanged.
    fn read_with(&self, callback: &mut ReadCallback<'_>) -> Result<()> {
        scoped::with_input(self.name(), "read", self.read()?, |input| callback(input))
    }
}

/// Generic conveniences over any [`Resource`], including trait objects
pub trait ResourceExt: Resource {
    /// Compute a value from the open input stream and return it after the
    /// stream has been closed
    ///
    /// # Errors
    ///
    /// Open and close failures as `Resource`/`NotFound` errors; callback
    /// errors are returned unchanged.
    fn read_map<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Read) -> Result<T>,
    {
        scoped::with_input(self.name(), "read", self.read()?, f)
    }

    /// Read the whole content
    ///
    /// # Errors
    ///
    /// See [`read_map`](Self::read_map).
    fn read_to_bytes(&self) -> Result<Vec<u8>> {
        self.read_map(|input| {
            let mut buf = Vec::new();
            input.read_to_end(&mut buf)?;
            Ok(buf)
        })
    }

    /// Read the whole content as UTF-8
    ///
    /// # Errors
    ///
    /// See [`read_map`](Self::read_map); invalid UTF-8 is a `Resource` error.
    fn read_to_string(&self) -> Result<String> {
        self.read_map(|input| {
            let mut buf = String::new();
            input.read_to_string(&mut buf)?;
            Ok(buf)
        })
    }

    /// Replace the content with `bytes`
    ///
    /// # Errors
    ///
    /// See [`Resource::write`].
    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.write(&mut |out| {
            out.write_all(bytes)?;
            Ok(())
        })
    }
}

impl<R: Resource + ?Sized> ResourceExt for R {}
