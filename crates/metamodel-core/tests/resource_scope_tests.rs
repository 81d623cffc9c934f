//! Integration tests for scoped resource access
//!
//! Streams close exactly once and callback errors take precedence over
//! close failures.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use metamodel_core::errors::{MmError, MmErrorKind, Result};
use metamodel_core::resource::{InputStream, OutputStream, UNKNOWN_LAST_MODIFIED, UNKNOWN_SIZE};
use metamodel_core::{Resource, ResourceExt};
use std::io::{self, Cursor, Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Resource that counts stream opens and closes
#[derive(Default)]
struct CountingResource {
    data: Arc<Mutex<Vec<u8>>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    read_only: bool,
    fail_close: bool,
}

impl CountingResource {
    fn with_data(bytes: &[u8]) -> Self {
        let resource = Self::default();
        resource.data.lock().unwrap().extend_from_slice(bytes);
        resource
    }

    fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

struct CountingOutput {
    data: Arc<Mutex<Vec<u8>>>,
    closed: Arc<AtomicUsize>,
    fail_close: bool,
}

impl Write for CountingOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl OutputStream for CountingOutput {
    fn close(self: Box<Self>) -> io::Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(io::Error::new(io::ErrorKind::Other, "flush failed"));
        }
        Ok(())
    }
}

struct CountingInput {
    cursor: Cursor<Vec<u8>>,
    closed: Arc<AtomicUsize>,
}

impl Read for CountingInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl InputStream for CountingInput {
    fn close(self: Box<Self>) -> io::Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Resource for CountingResource {
    fn name(&self) -> &str {
        "counting"
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn is_exists(&self) -> bool {
        true
    }

    fn size(&self) -> i64 {
        UNKNOWN_SIZE
    }

    fn last_modified(&self) -> i64 {
        UNKNOWN_LAST_MODIFIED
    }

    fn open_write(&self) -> Result<Box<dyn OutputStream>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.data.lock().unwrap().clear();
        Ok(Box::new(CountingOutput {
            data: self.data.clone(),
            closed: self.closed.clone(),
            fail_close: self.fail_close,
        }))
    }

    fn open_append(&self) -> Result<Box<dyn OutputStream>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingOutput {
            data: self.data.clone(),
            closed: self.closed.clone(),
            fail_close: self.fail_close,
        }))
    }

    fn read(&self) -> Result<Box<dyn InputStream>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingInput {
            cursor: Cursor::new(self.data.lock().unwrap().clone()),
            closed: self.closed.clone(),
        }))
    }
}

fn callback_failure() -> MmError {
    MmError::new(MmErrorKind::Internal).with_message("callback failed")
}

#[test]
fn test_write_closes_stream_once_on_success() {
    let resource = CountingResource::default();
    resource
        .write(&mut |out| {
            out.write_all(b"hello")?;
            Ok(())
        })
        .unwrap();

    assert_eq!(resource.opened(), 1);
    assert_eq!(resource.closed(), 1);
    assert_eq!(resource.read_to_bytes().unwrap(), b"hello");
}

#[test]
fn test_write_closes_stream_once_on_callback_error() {
    let resource = CountingResource::default();
    let err = resource
        .write(&mut |out| {
            out.write_all(b"partial")?;
            Err(callback_failure())
        })
        .unwrap_err();

    assert_eq!(err.kind(), MmErrorKind::Internal);
    assert_eq!(err.message(), "callback failed");
    assert_eq!(resource.closed(), 1);
}

#[test]
fn test_append_closes_stream_once_on_callback_error() {
    let resource = CountingResource::with_data(b"a");
    let err = resource
        .append(&mut |_| Err(callback_failure()))
        .unwrap_err();

    assert_eq!(err.kind(), MmErrorKind::Internal);
    assert_eq!(resource.opened(), 1);
    assert_eq!(resource.closed(), 1);
}

#[test]
fn test_append_keeps_existing_content() {
    let resource = CountingResource::with_data(b"ab");
    resource
        .append(&mut |out| {
            out.write_all(b"cd")?;
            Ok(())
        })
        .unwrap();

    assert_eq!(resource.read_to_string().unwrap(), "abcd");
}

#[test]
fn test_read_with_closes_stream_on_both_paths() {
    let resource = CountingResource::with_data(b"xyz");
    let mut seen = String::new();
    resource
        .read_with(&mut |input| {
            input.read_to_string(&mut seen)?;
            Ok(())
        })
        .unwrap();
    assert_eq!(seen, "xyz");
    assert_eq!(resource.closed(), 1);

    let err = resource
        .read_with(&mut |_| Err(callback_failure()))
        .unwrap_err();
    assert_eq!(err.kind(), MmErrorKind::Internal);
    assert_eq!(resource.closed(), 2);
}

#[test]
fn test_read_map_returns_value_after_close() {
    let resource = CountingResource::with_data(b"1,2,3");
    let total: i64 = resource
        .read_map(|input| {
            let mut text = String::new();
            input.read_to_string(&mut text)?;
            Ok(text.split(',').filter_map(|n| n.parse::<i64>().ok()).sum())
        })
        .unwrap();

    assert_eq!(total, 6);
    assert_eq!(resource.opened(), 1);
    assert_eq!(resource.closed(), 1);
}

#[test]
fn test_read_map_through_trait_object() {
    let resource: Box<dyn Resource> = Box::new(CountingResource::with_data(b"dyn"));
    let len = resource
        .read_map(|input| {
            let mut buf = Vec::new();
            Ok(input.read_to_end(&mut buf)?)
        })
        .unwrap();
    assert_eq!(len, 3);
}

#[test]
fn test_unscoped_read_leaves_close_to_caller() {
    let resource = CountingResource::with_data(b"raw");
    let mut stream = resource.read().unwrap();
    let mut buf = String::new();
    stream.read_to_string(&mut buf).unwrap();

    assert_eq!(buf, "raw");
    assert_eq!(resource.closed(), 0);

    stream.close().unwrap();
    assert_eq!(resource.closed(), 1);
}

#[test]
fn test_close_failure_after_successful_write_is_resource_error() {
    let resource = CountingResource {
        fail_close: true,
        ..CountingResource::default()
    };
    let err = resource
        .write(&mut |out| {
            out.write_all(b"x")?;
            Ok(())
        })
        .unwrap_err();

    assert_eq!(err.kind(), MmErrorKind::Resource);
    assert_eq!(err.resource(), Some("counting"));
    assert_eq!(err.op(), Some("write_close"));
    assert_eq!(resource.closed(), 1);
}

#[test]
fn test_read_only_rejected_before_open() {
    let resource = CountingResource {
        read_only: true,
        ..CountingResource::default()
    };
    let mut called = false;
    let err = resource
        .append(&mut |_| {
            called = true;
            Ok(())
        })
        .unwrap_err();

    assert_eq!(err.kind(), MmErrorKind::ReadOnly);
    assert!(!called);
    assert_eq!(resource.opened(), 0);
}

#[test]
fn test_io_error_in_callback_maps_to_resource_kind() {
    let resource = CountingResource::with_data(b"abc");
    let err = resource
        .read_map(|input| {
            let mut buf = [0u8; 8];
            input.read_exact(&mut buf)?;
            Ok(())
        })
        .unwrap_err();

    assert_eq!(err.kind(), MmErrorKind::Resource);
    assert_eq!(resource.closed(), 1);
}
