//! SQLite row insertion builder

use crate::errors::{insertion_rejected, lock_poisoned};
use crate::sqlite::value::{quote_ident, SqlValue};
use metamodel_core::errors::Result;
use metamodel_core::{Column, ColumnRef, Row, RowInsertionBuilder, StagedRow, Style, Table, Value};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Builder that inserts its staged row with one parameterised statement
pub struct SqliteRowInsertionBuilder {
    conn: Arc<Mutex<Connection>>,
    staged: StagedRow,
}

impl SqliteRowInsertionBuilder {
    pub fn new(conn: Arc<Mutex<Connection>>, table: Table) -> Self {
        Self {
            conn,
            staged: StagedRow::new(table),
        }
    }

    /// Statement with `?N` placeholders for the staged columns
    fn statement(&self) -> String {
        let table = quote_ident(&self.staged.table().name);
        let names: Vec<String> = self
            .staged
            .set_columns()
            .map(|(column, _)| quote_ident(&column.name))
            .collect();

        if names.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES", table);
        }

        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            names.join(", "),
            placeholders.join(", ")
        )
    }
}

impl RowInsertionBuilder for SqliteRowInsertionBuilder {
    fn table(&self) -> &Table {
        self.staged.table()
    }

    fn value(&mut self, column: ColumnRef, value: Value) -> Result<&mut dyn RowInsertionBuilder> {
        self.staged.set(&column, value, Style::default())?;
        Ok(self)
    }

    fn styled_value(
        &mut self,
        column: ColumnRef,
        value: Value,
        style: Style,
    ) -> Result<&mut dyn RowInsertionBuilder> {
        self.staged.set(&column, value, style)?;
        Ok(self)
    }

    fn like(&mut self, row: &Row) -> Result<&mut dyn RowInsertionBuilder> {
        self.staged.like(row);
        Ok(self)
    }

    fn to_row(&self) -> Row {
        self.staged.to_row()
    }

    fn to_sql(&self) -> String {
        self.staged.to_sql()
    }

    fn is_set(&self, column: &Column) -> bool {
        self.staged.is_set(column)
    }

    fn execute(self: Box<Self>) -> Result<()> {
        let sql = self.statement();
        let table = self.staged.table().name.as_str();
        let params: Vec<SqlValue<'_>> = self
            .staged
            .set_columns()
            .map(|(_, value)| SqlValue(value))
            .collect();

        let conn = self.conn.lock().map_err(|_| lock_poisoned("insert"))?;
        let inserted = conn
            .execute(&sql, rusqlite::params_from_iter(params.iter()))
            .map_err(|e| insertion_rejected(table, e))?;

        tracing::debug!(table, inserted, "row inserted");
        Ok(())
    }
}
