//! Row insertion builders
//!
//! A [`RowInsertionBuilder`] accumulates column/value assignments for one
//! pending insert against a [`Table`], can preview them as a [`Row`] or as
//! SQL text, and finally executes the insert exactly once.

pub mod staged;

use crate::data::{Row, Style, Value};
use crate::errors::Result;
use crate::schema::{Column, Table};

pub use staged::StagedRow;

/// How a caller addresses a column of the builder's table
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRef {
    /// By ordinal
    Index(usize),
    /// By name; exact match first, then case-insensitive
    Name(String),
    /// By column; matched against the table by name
    Column(Column),
}

impl From<usize> for ColumnRef {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Name(name)
    }
}

impl From<&Column> for ColumnRef {
    fn from(column: &Column) -> Self {
        ColumnRef::Column(column.clone())
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRef::Index(i) => write!(f, "#{}", i),
            ColumnRef::Name(name) => write!(f, "{}", name),
            ColumnRef::Column(column) => write!(f, "{}", column.name),
        }
    }
}

/// Builder for a single row insert
///
/// The trait is object safe: builders travel as `Box<dyn RowInsertionBuilder>`
/// so that interceptors can wrap or replace them. The mutating methods return
/// the builder they were called on, which allows chaining:
///
/// ```ignore
/// builder
///     .value("id".into(), 1.into())?
///     .value("name".into(), "ann".into())?;
/// builder.execute()?;
/// ```
pub trait RowInsertionBuilder {
    /// Table the row will be inserted into
    fn table(&self) -> &Table;

    /// Stage a value for a column
    ///
    /// # Errors
    ///
    /// Returns `NoSuchColumn` when the column cannot be resolved against
    /// the table.
    fn value(&mut self, column: ColumnRef, value: Value) -> Result<&mut dyn RowInsertionBuilder>;

    /// Stage a value together with a presentation style
    ///
    /// # Errors
    ///
    /// Returns `NoSuchColumn` when the column cannot be resolved against
    /// the table.
    fn styled_value(
        &mut self,
        column: ColumnRef,
        value: Value,
        style: Style,
    ) -> Result<&mut dyn RowInsertionBuilder>;

    /// Copy the values of an existing row as a baseline
    ///
    /// # Errors
    ///
    /// Implementation defined; the staged implementation never fails.
    fn like(&mut self, row: &Row) -> Result<&mut dyn RowInsertionBuilder>;

    /// Preview of the staged values, without executing
    fn to_row(&self) -> Row;

    /// Statement text the builder would execute, for diagnostics
    fn to_sql(&self) -> String;

    /// Whether a value has been staged for the column
    fn is_set(&self, column: &Column) -> bool;

    /// Perform the insert
    ///
    /// # Errors
    ///
    /// Returns an `Insertion` error when the backing store rejects the row.
    fn execute(self: Box<Self>) -> Result<()>;
}
