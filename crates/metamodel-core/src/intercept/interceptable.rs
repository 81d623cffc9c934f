//! Interceptable row insertion
//!
//! Wraps a backend builder so that registered interceptors get to inspect,
//! replace or veto it right before the insert executes. Every other builder
//! call is forwarded untouched.

use crate::data::{Row, Style, Value};
use crate::errors::Result;
use crate::insert::{ColumnRef, RowInsertionBuilder};
use crate::intercept::RowInsertionInterceptors;
use crate::schema::{Column, Table};
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Decorator applying [`RowInsertionInterceptors`] on `execute`
pub struct InterceptableRowInsertionBuilder {
    delegate: Box<dyn RowInsertionBuilder>,
    interceptors: RowInsertionInterceptors,
}

impl InterceptableRowInsertionBuilder {
    pub fn new(
        delegate: Box<dyn RowInsertionBuilder>,
        interceptors: RowInsertionInterceptors,
    ) -> Self {
        Self {
            delegate,
            interceptors,
        }
    }

    /// Number of interceptors that will run on `execute`
    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }
}

impl RowInsertionBuilder for InterceptableRowInsertionBuilder {
    fn table(&self) -> &Table {
        self.delegate.table()
    }

    fn value(&mut self, column: ColumnRef, value: Value) -> Result<&mut dyn RowInsertionBuilder> {
        self.delegate.value(column, value)?;
        Ok(self)
    }

    fn styled_value(
        &mut self,
        column: ColumnRef,
        value: Value,
        style: Style,
    ) -> Result<&mut dyn RowInsertionBuilder> {
        self.delegate.styled_value(column, value, style)?;
        Ok(self)
    }

    fn like(&mut self, row: &Row) -> Result<&mut dyn RowInsertionBuilder> {
        self.delegate.like(row)?;
        Ok(self)
    }

    fn to_row(&self) -> Row {
        self.delegate.to_row()
    }

    fn to_sql(&self) -> String {
        self.delegate.to_sql()
    }

    fn is_set(&self, column: &Column) -> bool {
        self.delegate.is_set(column)
    }

    fn execute(self: Box<Self>) -> Result<()> {
        let start = Instant::now();
        let Self {
            delegate,
            interceptors,
        } = *self;
        let table = delegate.table().name.clone();

        log_op_start!(
            "row_insertion_execute",
            table = table.as_str(),
            interceptor_count = interceptors.len()
        );

        let outcome = interceptors
            .intercept_all(delegate)
            .and_then(|builder| builder.execute());

        let duration_ms = start.elapsed().as_millis() as u64;
        match outcome {
            Ok(()) => {
                log_op_end!(
                    "row_insertion_execute",
                    duration_ms = duration_ms,
                    table = table.as_str()
                );
                Ok(())
            }
            Err(e) => {
                log_op_error!(
                    "row_insertion_execute",
                    e.clone(),
                    duration_ms = duration_ms,
                    table = table.as_str()
                );
                Err(e)
            }
        }
    }
}
