use metamodel_core::errors::Result;
use metamodel_core::{
    Column, ColumnRef, ColumnType, Row, RowInsertionBuilder, StagedRow, Style, Table, Value,
};
use std::sync::{Arc, Mutex};

/// Shared record of builder calls, readable after the builder is consumed
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
    queries: Arc<Mutex<Vec<String>>>,
    executed: Arc<Mutex<Vec<Row>>>,
}

#[allow(dead_code)]
impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn query(&self, call: impl Into<String>) {
        self.queries.lock().unwrap().push(call.into());
    }

    /// Read-only calls (`table`, `to_row`, `to_sql`, `is_set`), kept apart
    /// from mutations so ordering assertions stay readable
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Rows passed to `execute`, in execution order
    pub fn executed(&self) -> Vec<Row> {
        self.executed.lock().unwrap().clone()
    }

    pub fn execute_count(&self) -> usize {
        self.executed.lock().unwrap().len()
    }
}

/// Builder that stages values in memory and records every call
pub struct RecordingBuilder {
    pub label: &'static str,
    staged: StagedRow,
    log: CallLog,
}

#[allow(dead_code)]
impl RecordingBuilder {
    pub fn new(label: &'static str, table: Table, log: CallLog) -> Self {
        Self {
            label,
            staged: StagedRow::new(table),
            log,
        }
    }

    pub fn boxed(label: &'static str, table: Table, log: CallLog) -> Box<dyn RowInsertionBuilder> {
        Box::new(Self::new(label, table, log))
    }
}

impl RowInsertionBuilder for RecordingBuilder {
    fn table(&self) -> &Table {
        self.log.query(format!("{}.table", self.label));
        self.staged.table()
    }

    fn value(&mut self, column: ColumnRef, value: Value) -> Result<&mut dyn RowInsertionBuilder> {
        self.log.push(format!("{}.value({}={})", self.label, column, value));
        self.staged.set(&column, value, Style::default())?;
        Ok(self)
    }

    fn styled_value(
        &mut self,
        column: ColumnRef,
        value: Value,
        style: Style,
    ) -> Result<&mut dyn RowInsertionBuilder> {
        self.log
            .push(format!("{}.styled_value({}={})", self.label, column, value));
        self.staged.set(&column, value, style)?;
        Ok(self)
    }

    fn like(&mut self, row: &Row) -> Result<&mut dyn RowInsertionBuilder> {
        self.log.push(format!("{}.like", self.label));
        self.staged.like(row);
        Ok(self)
    }

    fn to_row(&self) -> Row {
        self.log.query(format!("{}.to_row", self.label));
        self.staged.to_row()
    }

    fn to_sql(&self) -> String {
        self.log.query(format!("{}.to_sql", self.label));
        self.staged.to_sql()
    }

    fn is_set(&self, column: &Column) -> bool {
        self.log
            .query(format!("{}.is_set({})", self.label, column.name));
        self.staged.is_set(column)
    }

    fn execute(self: Box<Self>) -> Result<()> {
        self.log.push(format!("{}.execute", self.label));
        self.log.executed.lock().unwrap().push(self.staged.to_row());
        Ok(())
    }
}

/// `people(id INTEGER PK, name TEXT NOT NULL, age INTEGER, created TEXT)`
#[allow(dead_code)]
pub fn people_table() -> Table {
    Table::new("people")
        .with_column(Column::new("id", ColumnType::Integer).primary_key())
        .with_column(Column::new("name", ColumnType::Text).not_null())
        .with_column(Column::new("age", ColumnType::Integer))
        .with_column(Column::new("created", ColumnType::Text))
}
