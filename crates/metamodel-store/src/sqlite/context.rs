//! SQLite data context
//!
//! Owns the connection, the table models created through it and the
//! row-insertion interceptors. Every builder handed out by
//! [`SqliteDataContext::insert_into`] is wrapped in the interceptable
//! decorator.

use crate::config::StoreConfig;
use crate::db;
use crate::errors::{from_rusqlite, lock_poisoned, table_not_found, Result};
use crate::sqlite::insert::SqliteRowInsertionBuilder;
use crate::sqlite::value::{from_sql, quote_ident};
use metamodel_core::errors::{MmError, MmErrorKind};
use metamodel_core::{
    log_op_end, log_op_error, log_op_start, InterceptableRowInsertionBuilder, Interceptor, Row,
    RowInsertionBuilder, RowInsertionInterceptors, Table,
};
use rusqlite::Connection;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Data context over one SQLite connection
pub struct SqliteDataContext {
    conn: Arc<Mutex<Connection>>,
    tables: HashMap<String, Table>,
    interceptors: RowInsertionInterceptors,
}

impl SqliteDataContext {
    /// Open the database described by `config` and apply its pragmas
    ///
    /// # Errors
    ///
    /// Returns a `Persistence` error if the database cannot be opened or
    /// configured.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = match &config.database.path {
            Some(path) => db::open(path)?,
            None => db::open_in_memory()?,
        };
        db::configure(&conn, &config.database)?;
        Ok(Self::from_connection(conn))
    }

    /// Fresh in-memory database with default settings
    ///
    /// # Errors
    ///
    /// See [`open`](Self::open).
    pub fn in_memory() -> Result<Self> {
        Self::open(&StoreConfig::default())
    }

    /// Wrap an already configured connection
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            tables: HashMap::new(),
            interceptors: RowInsertionInterceptors::new(),
        }
    }

    /// Create the table if it does not exist and register its model
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a table without columns, `Persistence` if SQLite
    /// rejects the statement.
    pub fn create_table(&mut self, table: Table) -> Result<()> {
        let start = Instant::now();
        log_op_start!("create_table", table = table.name.as_str());

        let result = self.create_table_inner(&table);
        let duration_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(()) => {
                log_op_end!(
                    "create_table",
                    duration_ms = duration_ms,
                    table = table.name.as_str()
                );
                self.tables.insert(table.name.clone(), table);
                Ok(())
            }
            Err(e) => {
                log_op_error!(
                    "create_table",
                    e.clone(),
                    duration_ms = duration_ms,
                    table = table.name.as_str()
                );
                Err(e)
            }
        }
    }

    fn create_table_inner(&self, table: &Table) -> Result<()> {
        if table.column_count() == 0 {
            return Err(MmError::new(MmErrorKind::InvalidInput)
                .with_op("create_table")
                .with_table(table.name.clone())
                .with_message("Table must have at least one column"));
        }

        let conn = self.conn.lock().map_err(|_| lock_poisoned("create_table"))?;
        conn.execute_batch(&create_table_sql(table))
            .map_err(from_rusqlite)
    }

    /// Registered table model by name
    ///
    /// An exact match wins; otherwise the first case-insensitive match is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such table was created through this context.
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .or_else(|| {
                self.tables
                    .values()
                    .find(|t| t.name.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| table_not_found(name))
    }

    /// Register an interceptor for every subsequent `insert_into`
    pub fn add_row_insertion_interceptor(
        &mut self,
        interceptor: Arc<dyn Interceptor<Box<dyn RowInsertionBuilder>>>,
    ) {
        self.interceptors.add(interceptor);
    }

    /// Interceptors currently registered, in application order
    pub fn row_insertion_interceptors(&self) -> &RowInsertionInterceptors {
        &self.interceptors
    }

    /// Mutable access to the registered interceptors (removal, clearing)
    pub fn row_insertion_interceptors_mut(&mut self) -> &mut RowInsertionInterceptors {
        &mut self.interceptors
    }

    /// Start an insert into `table`
    ///
    /// The returned builder carries a snapshot of the interceptors registered
    /// at this point.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the table is unknown.
    pub fn insert_into(&self, table: &str) -> Result<Box<dyn RowInsertionBuilder>> {
        let table = self.table(table)?.clone();
        tracing::debug!(
            table = %table.name,
            interceptor_count = self.interceptors.len(),
            "insert builder created"
        );

        let delegate = Box::new(SqliteRowInsertionBuilder::new(self.conn.clone(), table));
        Ok(Box::new(InterceptableRowInsertionBuilder::new(
            delegate,
            self.interceptors.clone(),
        )))
    }

    /// Every row of `table`, in insertion order
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown table, `Persistence` if the query fails.
    pub fn select_all(&self, table: &str) -> Result<Vec<Row>> {
        let start = Instant::now();
        log_op_start!("select_all", table = table);

        let result = self.select_all_inner(table);
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(rows) => {
                log_op_end!(
                    "select_all",
                    duration_ms = duration_ms,
                    table = table,
                    row_count = rows.len()
                );
            }
            Err(e) => {
                log_op_error!(
                    "select_all",
                    e.clone(),
                    duration_ms = duration_ms,
                    table = table
                );
            }
        }
        result
    }

    fn select_all_inner(&self, table: &str) -> Result<Vec<Row>> {
        let table = self.table(table)?;
        let columns = table.columns().to_vec();
        let names: Vec<String> = columns.iter().map(|c| quote_ident(&c.name)).collect();
        let sql = format!(
            "SELECT {} FROM {} ORDER BY rowid",
            names.join(", "),
            quote_ident(&table.name)
        );

        let conn = self.conn.lock().map_err(|_| lock_poisoned("select_all"))?;
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], |row| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| row.get_ref(i).map(|v| from_sql(v, column.column_type)))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        Ok(rows
            .into_iter()
            .map(|values| Row::new(columns.clone(), values))
            .collect())
    }

    /// Number of rows in `table`
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown table, `Persistence` if the query fails.
    pub fn count_rows(&self, table: &str) -> Result<u64> {
        let table = self.table(table)?;
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(&table.name));

        let conn = self.conn.lock().map_err(|_| lock_poisoned("count_rows"))?;
        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

/// `CREATE TABLE IF NOT EXISTS` statement for a table model
fn create_table_sql(table: &Table) -> String {
    let columns: Vec<String> = table
        .columns()
        .iter()
        .map(|column| {
            let mut definition = format!(
                "{} {}",
                quote_ident(&column.name),
                column.column_type.sql_name()
            );
            if !column.nullable {
                definition.push_str(" NOT NULL");
            }
            if column.primary_key {
                definition.push_str(" PRIMARY KEY");
            }
            definition
        })
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_ident(&table.name),
        columns.join(", ")
    )
}
