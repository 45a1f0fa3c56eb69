//! Error types shared by the codec, the persistence adapters and the record layer.
//!
//! Every violated precondition maps to its own variant so callers can tell
//! failures apart without string matching. All errors are terminal: nothing in
//! this workspace retries or substitutes a default value.
//!
//! # Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Input validation | `MalformedInput`, `EmptyHeader`, `NullHeader`, `UnescapedCell`, `RowCellCountMismatch`, `UnsupportedCellType`, `InvalidDimensions`, `IndexOutOfBounds`, `InvalidName` |
//! | Schema | `MissingTableName`, `MissingUuidField`, `NoPrimaryKey`, `MissingKeyColumn`, `NoColumnTypeChange`, `ValueTooLong`, `UnknownSemanticType`, `TypeMismatch` |
//! | Statement shape | `NoResultSet`, `UnexpectedResultSet`, `StatementAfterResultSet`, `UnexpectedRowCount` |
//! | System | `Database`, `InvalidConfig` |

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the tabular data model, the CSV codec and the adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // ==================== Input Validation ====================
    /// CSV text rejected before any row splitting (empty, odd quote count)
    #[error("malformed input: {reason}")]
    MalformedInput {
        /// Why the input was rejected
        reason: String,
    },

    /// Header row is missing or a header name is empty
    #[error("empty header")]
    EmptyHeader,

    /// A header slot was never assigned a name
    #[error("header for column {column} is null")]
    NullHeader {
        /// 0-based column index
        column: usize,
    },

    /// A non-empty field is not wrapped in quote characters
    #[error("cell is not wrapped in quotes: {cell}")]
    UnescapedCell {
        /// The offending field text, after trimming
        cell: String,
    },

    /// A data row decodes to a different field count than the header row
    #[error("row {row} has {found} cells, expected {expected}")]
    RowCellCountMismatch {
        /// 0-based data row index (header excluded)
        row: usize,
        /// Field count of the offending row
        found: usize,
        /// Field count of the header row
        expected: usize,
    },

    /// A cell holds a value kind the operation cannot handle
    #[error("unsupported cell type {kind} at row {row}, column {column}")]
    UnsupportedCellType {
        /// 0-based row index
        row: usize,
        /// 0-based column index
        column: usize,
        /// Name of the rejected kind
        kind: String,
    },

    /// Table dimensions rejected at construction
    #[error("invalid dimensions: {rows} rows x {columns} columns")]
    InvalidDimensions {
        /// Requested row count
        rows: usize,
        /// Requested column count
        columns: usize,
    },

    /// Positional access outside the table
    #[error("{axis} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// "row" or "column"
        axis: &'static str,
        /// Requested index
        index: usize,
        /// Size of the addressed axis
        len: usize,
    },

    /// A table or column name sanitized down to nothing
    #[error("invalid identifier: {name:?}")]
    InvalidName {
        /// The name as supplied
        name: String,
    },

    // ==================== Schema ====================
    /// Record schema declares no table name
    #[error("record schema has no table name")]
    MissingTableName,

    /// Record schema lacks the reserved `uuid` key field
    #[error("record schema for {table} has no uuid field")]
    MissingUuidField {
        /// Table of the schema
        table: String,
    },

    /// Target table does not have exactly one primary key column
    #[error("table {table} must have exactly one primary key column, found {found}")]
    NoPrimaryKey {
        /// Target table
        table: String,
        /// Number of primary key columns found
        found: usize,
    },

    /// The data being saved does not carry the primary key column
    #[error("data for table {table} has no column {column}")]
    MissingKeyColumn {
        /// Target table
        table: String,
        /// Primary key column name
        column: String,
    },

    /// An existing column would need a different declared type
    #[error("column {table}.{column} is {existing}, cannot change to {declared}")]
    NoColumnTypeChange {
        /// Table of the column
        table: String,
        /// Column name
        column: String,
        /// Type currently in the database
        existing: String,
        /// Type declared by the schema
        declared: String,
    },

    /// A string value exceeds the declared field size
    #[error("value for {column} is {actual} chars, limit is {size}")]
    ValueTooLong {
        /// Column name
        column: String,
        /// Declared size
        size: usize,
        /// Actual length in chars
        actual: usize,
    },

    /// Semantic type name not one of bool/int/long/string
    #[error("unknown semantic type: {name}")]
    UnknownSemanticType {
        /// The rejected name
        name: String,
    },

    /// A raw value cannot be cast to the field's semantic type
    #[error("cannot cast {actual} to {expected} for column {column}")]
    TypeMismatch {
        /// Column name
        column: String,
        /// Semantic type of the field
        expected: String,
        /// Description of the raw value
        actual: String,
    },

    // ==================== Statement Shape ====================
    /// Statement produced no result set (DML) where one was required
    #[error("statement produced no result set")]
    NoResultSet,

    /// Statement produced a result set where none was expected
    #[error("statement produced a result set")]
    UnexpectedResultSet,

    /// A statement followed the one that produced the result set
    #[error("statement {index} follows a statement that returned rows")]
    StatementAfterResultSet {
        /// 0-based position of the trailing statement in the batch
        index: usize,
    },

    /// Statement returned the wrong number of rows for a single-row call
    #[error("expected exactly one row, got {actual}")]
    UnexpectedRowCount {
        /// Rows actually returned
        actual: usize,
    },

    // ==================== System ====================
    /// Error reported by the database driver
    #[error("database error: {reason}")]
    Database {
        /// Driver message
        reason: String,
    },

    /// Configuration could not be loaded or is invalid
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong
        reason: String,
    },
}

impl Error {
    /// Create a MalformedInput error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            reason: reason.into(),
        }
    }

    /// Create a Database error
    pub fn database(reason: impl Into<String>) -> Self {
        Error::Database {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            reason: reason.into(),
        }
    }
}
