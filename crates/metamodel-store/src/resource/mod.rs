//! Filesystem resources
//!
//! - `FileResource`: `Resource` over a single file
//! - `AtomicWriter`: temp file + rename output stream behind `write`

pub mod atomic;
pub mod file;

pub use atomic::AtomicWriter;
pub use file::FileResource;
