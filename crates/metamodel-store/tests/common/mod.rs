use metamodel_core::{Column, ColumnType, Table};
use metamodel_store::SqliteDataContext;

/// `people(id INTEGER PK, name TEXT NOT NULL, age INTEGER, active BOOLEAN, created TEXT)`
pub fn people_table() -> Table {
    Table::new("people")
        .with_column(Column::new("id", ColumnType::Integer).primary_key())
        .with_column(Column::new("name", ColumnType::Text).not_null())
        .with_column(Column::new("age", ColumnType::Integer))
        .with_column(Column::new("active", ColumnType::Boolean))
        .with_column(Column::new("created", ColumnType::Text))
}

/// In-memory context with the people table created
#[allow(dead_code)]
pub fn people_context() -> SqliteDataContext {
    let mut ctx = SqliteDataContext::in_memory().expect("Failed to open in-memory database");
    ctx.create_table(people_table())
        .expect("Failed to create people table");
    ctx
}
