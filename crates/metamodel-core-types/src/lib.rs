//! Core types shared across the metamodel facilities
//!
//! This crate holds the canonical field keys and event names used by the
//! structured logging macros and by log assertions in tests.

pub mod schema;
