//! Staging area shared by row insertion builders
//!
//! Backends embed a [`StagedRow`] and forward the bookkeeping part of
//! [`RowInsertionBuilder`](crate::insert::RowInsertionBuilder) to it, keeping
//! only `execute` for themselves.

use crate::data::{Row, Style, Value};
use crate::errors::{MetaModelError, Result};
use crate::insert::ColumnRef;
use crate::schema::{Column, Table};

/// Values and styles staged for one row of a table
#[derive(Debug, Clone)]
pub struct StagedRow {
    table: Table,
    values: Vec<Value>,
    styles: Vec<Style>,
    explicit: Vec<bool>,
}

impl StagedRow {
    pub fn new(table: Table) -> Self {
        let width = table.column_count();
        Self {
            table,
            values: vec![Value::Null; width],
            styles: vec![Style::default(); width],
            explicit: vec![false; width],
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Resolve a column reference to an ordinal of this table
    ///
    /// # Errors
    ///
    /// Returns `NoSuchColumn` if the ordinal is out of range or no column
    /// with that name exists.
    pub fn resolve(&self, column: &ColumnRef) -> Result<usize> {
        match column {
            ColumnRef::Index(index) if *index < self.table.column_count() => Ok(*index),
            ColumnRef::Index(index) => Err(MetaModelError::ColumnIndexOutOfRange {
                table: self.table.name.clone(),
                index: *index,
                column_count: self.table.column_count(),
            }
            .into()),
            ColumnRef::Name(name) => self.index_by_name(name),
            ColumnRef::Column(column) => self.index_by_name(&column.name),
        }
    }

    fn index_by_name(&self, name: &str) -> Result<usize> {
        self.table.index_of(name).ok_or_else(|| {
            MetaModelError::NoSuchColumn {
                table: self.table.name.clone(),
                column: name.to_string(),
            }
            .into()
        })
    }

    /// Stage a value and style for a column
    ///
    /// # Errors
    ///
    /// Returns `NoSuchColumn` if the column cannot be resolved.
    pub fn set(&mut self, column: &ColumnRef, value: Value, style: Style) -> Result<()> {
        let index = self.resolve(column)?;
        tracing::debug!(table = %self.table.name, column = %column, "staging value");
        self.values[index] = value;
        self.styles[index] = style;
        self.explicit[index] = true;
        Ok(())
    }

    /// Copy value and style of every row column that also exists in the table
    pub fn like(&mut self, row: &Row) {
        for (i, column) in row.columns().iter().enumerate() {
            let Some(index) = self.table.index_of(&column.name) else {
                continue;
            };
            self.values[index] = row.value(i).cloned().unwrap_or_default();
            self.styles[index] = row.style(i).cloned().unwrap_or_default();
            self.explicit[index] = true;
        }
    }

    pub fn is_set(&self, column: &Column) -> bool {
        self.table
            .index_of(&column.name)
            .map(|i| self.explicit[i])
            .unwrap_or(false)
    }

    /// All table columns with their staged values; unset columns are null
    pub fn to_row(&self) -> Row {
        Row::new(self.table.columns().to_vec(), self.values.clone())
            .with_styles(self.styles.clone())
    }

    /// Explicitly staged columns and values, in ordinal order
    pub fn set_columns(&self) -> impl Iterator<Item = (&Column, &Value)> {
        self.table
            .columns()
            .iter()
            .zip(self.values.iter())
            .zip(self.explicit.iter())
            .filter(|(_, explicit)| **explicit)
            .map(|(pair, _)| pair)
    }

    /// Literal SQL rendering of the pending insert
    pub fn to_sql(&self) -> String {
        let (names, literals): (Vec<_>, Vec<_>) = self
            .set_columns()
            .map(|(column, value)| (column.name.as_str(), value.to_sql_literal()))
            .unzip();

        if names.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES", self.table.name);
        }

        format!(
            "INSERT INTO {}({}) VALUES ({})",
            self.table.name,
            names.join(","),
            literals.join(",")
        )
    }
}
