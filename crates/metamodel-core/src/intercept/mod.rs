//! Interceptors
//!
//! Ordered chains of transforms that are folded over a value (typically a
//! builder) before it is used, enabling cross-cutting policy such as
//! defaulting, validation, auditing or veto.

pub mod interceptable;
pub mod list;

use crate::insert::RowInsertionBuilder;

pub use interceptable::InterceptableRowInsertionBuilder;
pub use list::{Interceptor, InterceptorList};

/// Interceptors applied to row insertion builders
pub type RowInsertionInterceptors = InterceptorList<Box<dyn RowInsertionBuilder>>;
