//! Atomic write primitives
//!
//! Uses temp→rename pattern to ensure no partial writes: bytes go to a
//! hidden sibling of the target and replace it only on `close`. An existing
//! target is resolved through symlinks first and keeps its permissions.

use metamodel_core::resource::OutputStream;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output stream that replaces its target atomically on close
///
/// Dropping the writer without closing it discards everything written and
/// leaves the target untouched.
pub struct AtomicWriter {
    target: PathBuf,
    temp_path: PathBuf,
    permissions: Option<fs::Permissions>,
    writer: Option<BufWriter<File>>,
}

impl AtomicWriter {
    /// Create the temp file next to `target`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while creating directories or the temp
    /// file.
    pub fn create(target: &Path) -> io::Result<Self> {
        let (target, permissions) = match fs::canonicalize(target) {
            Ok(resolved) => {
                let permissions = fs::metadata(&resolved)?.permissions();
                (resolved, Some(permissions))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => (target.to_path_buf(), None),
            Err(e) => return Err(e),
        };

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = temp_sibling(&target);
        let file = File::create(&temp_path)?;
        tracing::debug!(path = %target.display(), temp = %temp_path.display(), "atomic write started");

        Ok(Self {
            target,
            temp_path,
            permissions,
            writer: Some(BufWriter::new(file)),
        })
    }

    fn commit(&mut self) -> io::Result<()> {
        let Some(writer) = self.writer.take() else {
            return Ok(());
        };
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        if let Some(permissions) = self.permissions.take() {
            file.set_permissions(permissions)?;
        }
        drop(file);
        fs::rename(&self.temp_path, &self.target)
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "atomic writer already closed"))
    }
}

/// `.<name>.<uuid>.tmp` in the target's directory
fn temp_sibling(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.tmp", name, uuid::Uuid::new_v4()))
}

impl Write for AtomicWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl OutputStream for AtomicWriter {
    fn close(mut self: Box<Self>) -> io::Result<()> {
        let committed = self.commit();
        if committed.is_err() {
            let _ = fs::remove_file(&self.temp_path);
        }
        tracing::debug!(path = %self.target.display(), ok = committed.is_ok(), "atomic write closed");
        committed
    }
}

impl Drop for AtomicWriter {
    fn drop(&mut self) {
        if self.writer.take().is_some() {
            let _ = fs::remove_file(&self.temp_path);
            tracing::debug!(path = %self.target.display(), "atomic write discarded");
        }
    }
}
