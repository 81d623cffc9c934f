use thiserror::Error;

/// Result type alias using MmError
pub type Result<T> = std::result::Result<T, MmError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and in tests. `Resource` covers every failed stream
/// operation against a resource; `Insertion` covers every failed insert,
/// whether the backend rejected it or an interceptor vetoed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmErrorKind {
    // Addressing/Validation
    InvalidInput,
    NoSuchColumn,
    NotFound,

    // Data model
    Insertion,

    // Resources
    Resource,
    ReadOnly,

    // Integration
    Persistence,
    Config,

    // Internal
    Internal,
}

impl MmErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            MmErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            MmErrorKind::NoSuchColumn => "ERR_NO_SUCH_COLUMN",
            MmErrorKind::NotFound => "ERR_NOT_FOUND",
            MmErrorKind::Insertion => "ERR_INSERTION",
            MmErrorKind::Resource => "ERR_RESOURCE",
            MmErrorKind::ReadOnly => "ERR_READ_ONLY",
            MmErrorKind::Persistence => "ERR_PERSISTENCE",
            MmErrorKind::Config => "ERR_CONFIG",
            MmErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional
/// context (operation, table, column, resource) for debugging.
#[derive(Debug, Clone)]
pub struct MmError {
    kind: MmErrorKind,
    op: Option<String>,
    table: Option<String>,
    column: Option<String>,
    resource: Option<String>,
    message: String,
}

impl MmError {
    /// Create a new error with the specified kind
    pub fn new(kind: MmErrorKind) -> Self {
        Self {
            kind,
            op: None,
            table: None,
            column: None,
            resource: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add table context
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add column context
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Add resource name context
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> MmErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for MmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(table) = &self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(column) = &self.column {
            write!(f, " (column: {})", column)?;
        }
        if let Some(resource) = &self.resource {
            write!(f, " (resource: {})", resource)?;
        }
        Ok(())
    }
}

impl std::error::Error for MmError {}

/// I/O failures raised inside resource callbacks surface as resource errors
impl From<std::io::Error> for MmError {
    fn from(err: std::io::Error) -> Self {
        MmError::new(MmErrorKind::Resource)
            .with_op("io")
            .with_message(err.to_string())
    }
}

// ========== End Error Facility ==========

/// Typed error taxonomy for metamodel operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetaModelError {
    // ===== Addressing Errors =====
    /// Column name (or column) is not part of the table
    #[error("No such column in table {table}: {column}")]
    NoSuchColumn { table: String, column: String },

    /// Column ordinal is outside the table's column range
    #[error("Column index {index} out of range for table {table} with {column_count} columns")]
    ColumnIndexOutOfRange {
        table: String,
        index: usize,
        column_count: usize,
    },

    /// Table is not known to the data context
    #[error("Table not found: {table}")]
    TableNotFound { table: String },

    // ===== Insertion Errors =====
    /// The backing store refused the insert
    #[error("Insert into {table} rejected: {reason}")]
    InsertionRejected { table: String, reason: String },

    /// An interceptor refused to let the insert proceed
    #[error("Insert into {table} vetoed: {reason}")]
    InterceptorVeto { table: String, reason: String },

    // ===== Resource Errors =====
    /// A stream could not be opened, written, read or closed
    #[error("Resource {resource} failed during {op}: {reason}")]
    ResourceUnavailable {
        resource: String,
        op: String,
        reason: String,
    },

    /// Write or append attempted on a read-only resource
    #[error("Resource is read-only: {resource}")]
    ResourceReadOnly { resource: String },

    /// Read attempted on a resource that does not exist
    #[error("Resource does not exist: {resource}")]
    ResourceNotFound { resource: String },

    // ===== Generic Errors =====
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<MetaModelError> for MmError {
    fn from(err: MetaModelError) -> Self {
        match err {
            MetaModelError::NoSuchColumn { table, column } => {
                MmError::new(MmErrorKind::NoSuchColumn)
                    .with_table(table)
                    .with_column(column)
                    .with_message("No such column")
            }

            MetaModelError::ColumnIndexOutOfRange {
                table,
                index,
                column_count,
            } => MmError::new(MmErrorKind::NoSuchColumn)
                .with_table(table)
                .with_column(index.to_string())
                .with_message(format!(
                    "Column index {} out of range (column count {})",
                    index, column_count
                )),

            MetaModelError::TableNotFound { table } => MmError::new(MmErrorKind::NotFound)
                .with_table(table)
                .with_message("Table not found"),

            MetaModelError::InsertionRejected { table, reason } => {
                MmError::new(MmErrorKind::Insertion)
                    .with_table(table)
                    .with_op("insert")
                    .with_message(reason)
            }

            MetaModelError::InterceptorVeto { table, reason } => {
                MmError::new(MmErrorKind::Insertion)
                    .with_table(table)
                    .with_op("intercept")
                    .with_message(reason)
            }

            MetaModelError::ResourceUnavailable {
                resource,
                op,
                reason,
            } => MmError::new(MmErrorKind::Resource)
                .with_resource(resource)
                .with_op(op)
                .with_message(reason),

            MetaModelError::ResourceReadOnly { resource } => MmError::new(MmErrorKind::ReadOnly)
                .with_resource(resource)
                .with_message("Resource is read-only"),

            MetaModelError::ResourceNotFound { resource } => MmError::new(MmErrorKind::NotFound)
                .with_resource(resource)
                .with_message("Resource does not exist"),

            MetaModelError::Config { message } => {
                MmError::new(MmErrorKind::Config).with_message(message)
            }

            MetaModelError::Internal { message } => {
                MmError::new(MmErrorKind::Internal).with_message(message)
            }
        }
    }
}
