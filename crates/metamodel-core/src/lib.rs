//! Metamodel Core - backend-independent data model, insertion builders,
//! interceptors and resources
//!
//! This crate provides:
//! - Table/column schema and row/value/style data types
//! - The object-safe [`RowInsertionBuilder`] contract and a staging helper
//!   for backends
//! - Ordered interceptor chains and the interceptable insertion decorator
//! - The [`Resource`] abstraction with scoped stream handling and an
//!   in-memory implementation
//! - The error facility and structured logging shared by every backend

pub mod data;
pub mod errors;
pub mod insert;
pub mod intercept;
pub mod logging_facility;
pub mod resource;
pub mod schema;

// Re-export commonly used types
pub use data::{Row, Style, Value};
pub use errors::{MetaModelError, MmError, MmErrorKind, Result};
pub use insert::{ColumnRef, RowInsertionBuilder, StagedRow};
pub use intercept::{
    InterceptableRowInsertionBuilder, Interceptor, InterceptorList, RowInsertionInterceptors,
};
pub use resource::{InMemoryResource, Resource, ResourceExt};
pub use schema::{Column, ColumnType, Table};
