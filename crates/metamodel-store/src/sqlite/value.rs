//! Conversions between metamodel values and SQLite values

use metamodel_core::{ColumnType, Value};
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::ToSql;

/// Borrowing adapter that binds a [`Value`] as a statement parameter
pub struct SqlValue<'a>(pub &'a Value);

impl ToSql for SqlValue<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(v) => ToSqlOutput::from(*v),
            Value::Float(v) => ToSqlOutput::from(*v),
            Value::Text(v) => ToSqlOutput::from(v.as_str()),
            Value::Boolean(v) => ToSqlOutput::from(*v),
            Value::Bytes(v) => ToSqlOutput::from(v.as_slice()),
        })
    }
}

/// Read a stored value back, using the declared column type to restore
/// booleans
pub fn from_sql(value: ValueRef<'_>, column_type: ColumnType) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) if column_type == ColumnType::Boolean => Value::Boolean(v != 0),
        ValueRef::Integer(v) => Value::Integer(v),
        ValueRef::Real(v) => Value::Float(v),
        ValueRef::Text(v) => Value::Text(String::from_utf8_lossy(v).into_owned()),
        ValueRef::Blob(v) => Value::Bytes(v.to_vec()),
    }
}

/// Double-quoted SQL identifier
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
