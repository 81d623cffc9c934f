//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between emitters and the
//! test capture layer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Data-model identifiers
pub const FIELD_TABLE: &str = "table";
pub const FIELD_COLUMN: &str = "column";
pub const FIELD_INTERCEPTOR_COUNT: &str = "interceptor_count";

// Resource identifiers
pub const FIELD_RESOURCE: &str = "resource";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
