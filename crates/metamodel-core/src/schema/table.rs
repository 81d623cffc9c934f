use crate::schema::Column;
use serde::{Deserialize, Serialize};

/// A table: a name and its ordered columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Append a column, assigning it the next ordinal
    pub fn add_column(&mut self, mut column: Column) {
        column.ordinal = self.columns.len();
        self.columns.push(column);
    }

    /// Builder-style variant of [`add_column`](Self::add_column)
    pub fn with_column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get a column by ordinal
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Get a column by name
    ///
    /// An exact match wins; otherwise the first case-insensitive match is
    /// returned.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
    }

    /// Ordinal of the column with the given name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.column_by_name(name).map(|c| c.ordinal)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
