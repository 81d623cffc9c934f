//! In-memory resource
//!
//! Content lives in a shared buffer; clones of an [`InMemoryResource`] see
//! the same bytes. Output streams buffer privately and publish on close, so
//! readers never observe a half-written state.

use crate::errors::{MetaModelError, MmError, Result};
use crate::resource::scoped::{not_found, read_only};
use crate::resource::{InputStream, OutputStream, Resource, UNKNOWN_SIZE};
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, RwLock};

#[derive(Debug)]
struct Content {
    bytes: Option<Vec<u8>>,
    last_modified: i64,
}

/// Resource backed by a byte buffer in memory
#[derive(Debug, Clone)]
pub struct InMemoryResource {
    name: String,
    read_only: bool,
    content: Arc<RwLock<Content>>,
}

impl InMemoryResource {
    /// A resource that does not exist until first written
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read_only: false,
            content: Arc::new(RwLock::new(Content {
                bytes: None,
                last_modified: now_millis(),
            })),
        }
    }

    /// A resource holding `bytes`
    pub fn with_content(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let resource = Self::new(name);
        if let Ok(mut content) = resource.content.write() {
            content.bytes = Some(bytes.into());
        }
        resource
    }

    /// Reject every subsequent write and append through this handle
    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    fn poisoned(&self) -> MmError {
        MetaModelError::Internal {
            message: format!("content lock of resource {} is poisoned", self.name),
        }
        .into()
    }

    fn open_output(&self, append: bool) -> Result<Box<dyn OutputStream>> {
        if self.read_only {
            return Err(read_only(&self.name));
        }
        Ok(Box::new(MemoryOutput {
            target: self.content.clone(),
            buffer: Vec::new(),
            append,
            published: false,
        }))
    }
}

impl Resource for InMemoryResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn is_exists(&self) -> bool {
        self.content
            .read()
            .map(|c| c.bytes.is_some())
            .unwrap_or(false)
    }

    fn size(&self) -> i64 {
        match self.content.read() {
            Ok(c) => c.bytes.as_ref().map(|b| b.len() as i64).unwrap_or(0),
            Err(_) => UNKNOWN_SIZE,
        }
    }

    fn last_modified(&self) -> i64 {
        self.content
            .read()
            .map(|c| c.last_modified)
            .unwrap_or_else(|_| now_millis())
    }

    fn open_write(&self) -> Result<Box<dyn OutputStream>> {
        self.open_output(false)
    }

    fn open_append(&self) -> Result<Box<dyn OutputStream>> {
        self.open_output(true)
    }

    fn read(&self) -> Result<Box<dyn InputStream>> {
        let content = self.content.read().map_err(|_| self.poisoned())?;
        match &content.bytes {
            Some(bytes) => Ok(Box::new(MemoryInput(Cursor::new(bytes.clone())))),
            None => Err(not_found(&self.name)),
        }
    }
}

struct MemoryOutput {
    target: Arc<RwLock<Content>>,
    buffer: Vec<u8>,
    append: bool,
    published: bool,
}

impl MemoryOutput {
    fn publish(&mut self) -> io::Result<()> {
        if self.published {
            return Ok(());
        }
        self.published = true;
        let mut content = self
            .target
            .write()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "content lock poisoned"))?;
        let staged = std::mem::take(&mut self.buffer);
        match (&mut content.bytes, self.append) {
            (Some(existing), true) => existing.extend_from_slice(&staged),
            (slot, _) => *slot = Some(staged),
        }
        content.last_modified = now_millis();
        Ok(())
    }
}

impl Write for MemoryOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl OutputStream for MemoryOutput {
    fn close(mut self: Box<Self>) -> io::Result<()> {
        self.publish()
    }
}

impl Drop for MemoryOutput {
    fn drop(&mut self) {
        let _ = self.publish();
    }
}

struct MemoryInput(Cursor<Vec<u8>>);

impl Read for MemoryInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl InputStream for MemoryInput {
    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MmErrorKind;
    use crate::resource::ResourceExt;

    #[test]
    fn test_new_resource_does_not_exist() {
        let resource = InMemoryResource::new("blob");
        assert!(!resource.is_exists());
        assert_eq!(resource.size(), 0);
        let err = resource.read().err().map(|e| e.kind());
        assert_eq!(err, Some(MmErrorKind::NotFound));
    }

    #[test]
    fn test_write_replaces_and_append_extends() {
        let resource = InMemoryResource::with_content("blob", b"old".to_vec());
        resource.write_bytes(b"new").unwrap();
        assert_eq!(resource.read_to_bytes().unwrap(), b"new");

        resource
            .append(&mut |out| {
                out.write_all(b"er")?;
                Ok(())
            })
            .unwrap();
        assert_eq!(resource.read_to_string().unwrap(), "newer");
        assert_eq!(resource.size(), 5);
    }

    #[test]
    fn test_append_creates_missing_content() {
        let resource = InMemoryResource::new("log");
        resource
            .append(&mut |out| {
                out.write_all(b"line\n")?;
                Ok(())
            })
            .unwrap();
        assert!(resource.is_exists());
        assert_eq!(resource.read_to_string().unwrap(), "line\n");
    }

    #[test]
    fn test_size_unknown_after_poisoned_lock() {
        let resource = InMemoryResource::with_content("blob", b"abc".to_vec());
        let content = resource.content.clone();
        let _ = std::thread::spawn(move || {
            let _guard = content.write().unwrap();
            panic!("writer died");
        })
        .join();

        assert_eq!(resource.size(), UNKNOWN_SIZE);
    }

    #[test]
    fn test_clones_share_content() {
        let resource = InMemoryResource::new("shared");
        let other = resource.clone();
        resource.write_bytes(b"hello").unwrap();
        assert_eq!(other.read_to_bytes().unwrap(), b"hello");
    }

    #[test]
    fn test_read_only_rejects_writes_without_calling_back() {
        let resource = InMemoryResource::with_content("ro", b"keep".to_vec()).into_read_only();
        let mut called = false;
        let err = resource
            .write(&mut |_| {
                called = true;
                Ok(())
            })
            .unwrap_err();

        assert_eq!(err.kind(), MmErrorKind::ReadOnly);
        assert!(!called);
        assert_eq!(resource.read_to_bytes().unwrap(), b"keep");
    }
}
