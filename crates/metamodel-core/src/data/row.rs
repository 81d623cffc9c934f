use crate::data::{Style, Value};
use crate::schema::Column;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A row of values, each paired with its column and style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    columns: Vec<Column>,
    values: Vec<Value>,
    styles: Vec<Style>,
}

impl Row {
    /// Create an unstyled row
    ///
    /// Missing trailing values are filled with `Value::Null`.
    pub fn new(columns: Vec<Column>, mut values: Vec<Value>) -> Self {
        values.resize(columns.len(), Value::Null);
        let styles = vec![Style::default(); columns.len()];
        Self {
            columns,
            values,
            styles,
        }
    }

    /// Replace the styles; missing trailing styles default to no style
    pub fn with_styles(mut self, mut styles: Vec<Style>) -> Self {
        styles.resize(self.columns.len(), Style::default());
        self.styles = styles;
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn style(&self, index: usize) -> Option<&Style> {
        self.styles.get(index)
    }

    /// Value of the first column with the given name
    pub fn value_of(&self, column_name: &str) -> Option<&Value> {
        self.index_of(column_name).and_then(|i| self.values.get(i))
    }

    pub fn style_of(&self, column_name: &str) -> Option<&Style> {
        self.index_of(column_name).and_then(|i| self.styles.get(i))
    }

    fn index_of(&self, column_name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == column_name)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row[values=[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]]")
    }
}
