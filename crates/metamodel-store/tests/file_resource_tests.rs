//! Integration tests for filesystem resources
//!
//! Covers scoped write/append/read, atomic replacement and metadata.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use metamodel_core::errors::{MmError, MmErrorKind};
use metamodel_core::resource::{InputStream, UNKNOWN_LAST_MODIFIED, UNKNOWN_SIZE};
use metamodel_core::{Resource, ResourceExt};
use metamodel_store::{FileResource, StoreConfig};
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use tempfile::TempDir;

fn setup() -> (TempDir, FileResource) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let resource = FileResource::new(temp_dir.path().join("people.csv"));
    (temp_dir, resource)
}

fn tmp_files(dir: &std::path::Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .count()
}

#[test]
fn test_write_then_read_map() {
    let (_dir, resource) = setup();

    resource
        .write(&mut |out| {
            writeln!(out, "id,name")?;
            writeln!(out, "1,ann")?;
            Ok(())
        })
        .unwrap();

    let lines = resource
        .read_map(|input| {
            let reader = BufReader::new(input);
            let mut lines = Vec::new();
            for line in reader.lines() {
                lines.push(line?);
            }
            Ok(lines)
        })
        .unwrap();

    assert_eq!(lines, vec!["id,name", "1,ann"]);
}

#[test]
fn test_metadata_of_existing_file() {
    let (_dir, resource) = setup();
    assert_eq!(resource.size(), UNKNOWN_SIZE);
    assert_eq!(resource.last_modified(), UNKNOWN_LAST_MODIFIED);

    resource.write_bytes(b"0123456789").unwrap();

    assert!(resource.is_exists());
    assert_eq!(resource.size(), 10);
    assert!(resource.last_modified() > 0);
}

#[test]
fn test_write_replaces_content() {
    let (_dir, resource) = setup();
    resource.write_bytes(b"a much longer first version").unwrap();
    resource.write_bytes(b"short").unwrap();

    assert_eq!(resource.read_to_string().unwrap(), "short");
}

#[test]
fn test_failed_write_still_closes_and_cleans_up() {
    let (dir, resource) = setup();
    resource.write_bytes(b"stable").unwrap();

    let err = resource
        .write(&mut |out| {
            out.write_all(b"partial")?;
            Err(MmError::new(MmErrorKind::Internal).with_message("abort"))
        })
        .unwrap_err();

    assert_eq!(err.kind(), MmErrorKind::Internal);
    assert_eq!(resource.read_to_string().unwrap(), "partial");
    assert_eq!(tmp_files(dir.path()), 0);
}

#[test]
fn test_target_untouched_while_write_in_progress() {
    let (dir, resource) = setup();
    resource.write_bytes(b"before").unwrap();

    let observer = FileResource::new(dir.path().join("people.csv"));
    resource
        .write(&mut |out| {
            out.write_all(b"after")?;
            assert_eq!(observer.read_to_string().unwrap(), "before");
            Ok(())
        })
        .unwrap();

    assert_eq!(observer.read_to_string().unwrap(), "after");
}

#[test]
fn test_append_creates_and_extends() {
    let (_dir, resource) = setup();

    for line in ["one", "two"] {
        resource
            .append(&mut |out| {
                writeln!(out, "{}", line)?;
                Ok(())
            })
            .unwrap();
    }

    assert_eq!(resource.read_to_string().unwrap(), "one\ntwo\n");
}

#[test]
fn test_read_with_and_unscoped_read() {
    let (_dir, resource) = setup();
    resource.write_bytes(b"abc").unwrap();

    let mut seen = Vec::new();
    resource
        .read_with(&mut |input| {
            input.read_to_end(&mut seen)?;
            Ok(())
        })
        .unwrap();
    assert_eq!(seen, b"abc");

    let mut stream = resource.read().unwrap();
    let mut text = String::new();
    stream.read_to_string(&mut text).unwrap();
    stream.close().unwrap();
    assert_eq!(text, "abc");
}

#[cfg(unix)]
#[test]
fn test_read_only_permissions_detected() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, resource) = setup();
    resource.write_bytes(b"locked").unwrap();
    fs::set_permissions(resource.path(), fs::Permissions::from_mode(0o444)).unwrap();

    assert!(resource.is_read_only());
    let err = resource.write_bytes(b"nope").unwrap_err();
    assert_eq!(err.kind(), MmErrorKind::ReadOnly);
    assert_eq!(resource.read_to_string().unwrap(), "locked");
}

#[cfg(unix)]
#[test]
fn test_write_keeps_mode_of_existing_file() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, resource) = setup();
    resource.write_bytes(b"old").unwrap();
    fs::set_permissions(resource.path(), fs::Permissions::from_mode(0o600)).unwrap();

    resource.write_bytes(b"new").unwrap();

    let mode = fs::metadata(resource.path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    assert_eq!(resource.read_to_string().unwrap(), "new");
}

#[cfg(unix)]
#[test]
fn test_write_through_symlink_updates_link_target() {
    let temp_dir = TempDir::new().unwrap();
    let real = temp_dir.path().join("real.txt");
    let link = temp_dir.path().join("link.txt");
    fs::write(&real, b"old").unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();

    FileResource::new(&link).write_bytes(b"new").unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&real).unwrap(), "new");
    assert_eq!(tmp_files(temp_dir.path()), 0);
}

#[test]
fn test_config_resolves_resources_under_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("resources");
    let config = StoreConfig::from_toml_str(&format!("[resources]\nroot = {:?}\n", root)).unwrap();

    let resource = config.resource("nested.txt");
    resource.write_bytes(b"under root").unwrap();

    assert_eq!(
        fs::read_to_string(root.join("nested.txt")).unwrap(),
        "under root"
    );
}
