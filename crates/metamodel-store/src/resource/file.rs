//! Filesystem-backed resource

use crate::resource::atomic::AtomicWriter;
use chrono::{DateTime, Utc};
use metamodel_core::errors::Result;
use metamodel_core::resource::scoped::{not_found, read_only, unavailable};
use metamodel_core::resource::{
    InputStream, OutputStream, Resource, UNKNOWN_LAST_MODIFIED, UNKNOWN_SIZE,
};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Resource stored in a single file
///
/// `write` replaces the file atomically on close; `append` writes in place
/// and creates the file when missing. Metadata is read from the filesystem
/// on every call.
#[derive(Debug, Clone)]
pub struct FileResource {
    path: PathBuf,
    name: String,
    read_only: bool,
}

impl FileResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            name,
            read_only: false,
        }
    }

    /// Refuse writes regardless of file permissions
    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn metadata(&self) -> Option<fs::Metadata> {
        fs::metadata(&self.path).ok().filter(|m| m.is_file())
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.is_read_only() {
            return Err(read_only(&self.name));
        }
        Ok(())
    }
}

impl Resource for FileResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_read_only(&self) -> bool {
        self.read_only
            || self
                .metadata()
                .map(|m| m.permissions().readonly())
                .unwrap_or(false)
    }

    fn is_exists(&self) -> bool {
        self.metadata().is_some()
    }

    fn size(&self) -> i64 {
        self.metadata()
            .and_then(|m| i64::try_from(m.len()).ok())
            .unwrap_or(UNKNOWN_SIZE)
    }

    fn last_modified(&self) -> i64 {
        self.metadata()
            .and_then(|m| m.modified().ok())
            .map(|t| DateTime::<Utc>::from(t).timestamp_millis())
            .unwrap_or(UNKNOWN_LAST_MODIFIED)
    }

    fn open_write(&self) -> Result<Box<dyn OutputStream>> {
        self.ensure_writable()?;
        let writer =
            AtomicWriter::create(&self.path).map_err(|e| unavailable(&self.name, "open_write", &e))?;
        Ok(Box::new(writer))
    }

    fn open_append(&self) -> Result<Box<dyn OutputStream>> {
        self.ensure_writable()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| unavailable(&self.name, "open_append", &e))?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| unavailable(&self.name, "open_append", &e))?;
        tracing::debug!(path = %self.path.display(), "append stream opened");
        Ok(Box::new(AppendWriter(BufWriter::new(file))))
    }

    fn read(&self) -> Result<Box<dyn InputStream>> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => not_found(&self.name),
            _ => unavailable(&self.name, "open_read", &e),
        })?;
        Ok(Box::new(FileReader(BufReader::new(file))))
    }
}

struct AppendWriter(BufWriter<File>);

impl Write for AppendWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl OutputStream for AppendWriter {
    fn close(self: Box<Self>) -> io::Result<()> {
        let file = self.0.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }
}

struct FileReader(BufReader<File>);

impl Read for FileReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl InputStream for FileReader {
    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}
