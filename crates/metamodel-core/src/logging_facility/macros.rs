//! Boundary logging macros
//!
//! Every public operation that crosses a component boundary emits one
//! `start` event and exactly one of `end` / `end_error`. Field keys come from
//! `metamodel_core_types::schema`; extra fields such as `table` or
//! `interceptor_count` are passed through verbatim.

/// Emit the `start` event of an operation
///
/// ```
/// # use metamodel_core::log_op_start;
/// log_op_start!("create_table", table = "people");
/// log_op_start!("row_insertion_execute", table = "people", interceptor_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = metamodel_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = metamodel_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Emit the `end` event; `duration_ms` is required
///
/// ```
/// # use metamodel_core::log_op_end;
/// log_op_end!("create_table", duration_ms = 1, table = "people");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = metamodel_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = metamodel_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Emit the `end_error` event with `err.kind` and `err.code`
///
/// The error may be a `MetaModelError` or an `MmError`.
///
/// ```
/// # use metamodel_core::log_op_error;
/// # use metamodel_core::errors::MetaModelError;
/// let veto = MetaModelError::InterceptorVeto {
///     table: "people".to_string(),
///     reason: "created must be set".to_string(),
/// };
/// log_op_error!("row_insertion_execute", veto, duration_ms = 0, table = "people");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let mm_err: $crate::errors::MmError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = metamodel_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?mm_err.kind(),
            err.code = mm_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let mm_err: $crate::errors::MmError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = metamodel_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?mm_err.kind(),
            err.code = mm_err.code(),
            $($field)*
        );
    }};
}
