//! The persistence adapter contract
//!
//! Everything above the engine (the transfer protocol, the record store, the
//! sync helpers) talks to a database only through [`PersistenceAdapter`].
//! Each backing store supplies one implementation; dialect-neutral pieces
//! live in [`crate::common`].

use tablebridge_core::{Error, FieldDescriptor, RecordSchema, Result, Row, TabularData, Value};

use crate::common;

/// One column of an existing table, as introspected from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Declared SQL type, as the database reports it
    pub declared_type: String,
    /// Part of the primary key
    pub primary_key: bool,
}

/// Executes SQL against one concrete database and moves tabular data in and out.
///
/// Thread safety: implementations are shared across request threads and must
/// serialize access to connections that are not safe for concurrent use.
///
/// # Statement shapes
///
/// | Call | Fails when |
/// |------|------------|
/// | `query_single` | no result set, or not exactly one row |
/// | `query_multiple` | no result set (DML) |
/// | `execute_no_result` | the statement yields a result set |
pub trait PersistenceAdapter: Send + Sync {
    /// Short dialect name, used in logs
    fn dialect(&self) -> &'static str;

    /// Render `value` as a literal safe to interpolate into this dialect's SQL.
    fn escape(&self, value: &Value) -> String {
        common::escape_literal(value)
    }

    /// Column type this dialect uses for a record field.
    fn sql_type(&self, field: &FieldDescriptor) -> String {
        common::sql_type(field)
    }

    /// Run a statement expected to return exactly one row.
    ///
    /// # Errors
    ///
    /// `NoResultSet` for DML, `UnexpectedRowCount` for zero or several rows.
    fn query_single(&self, sql: &str) -> Result<Row> {
        let mut rows = self.query_multiple(sql)?;
        if rows.len() != 1 {
            return Err(Error::UnexpectedRowCount { actual: rows.len() });
        }
        Ok(rows.remove(0))
    }

    /// Run a statement expected to return a result set (possibly empty).
    ///
    /// # Errors
    ///
    /// `NoResultSet` when the statement produced none; the statement has still run.
    fn query_multiple(&self, sql: &str) -> Result<Vec<Row>>;

    /// Run a statement expected to return no result set; returns affected rows.
    ///
    /// # Errors
    ///
    /// `UnexpectedResultSet` when it would return rows; that statement is not
    /// run, though earlier statements of a batch have been.
    fn execute_no_result(&self, sql: &str) -> Result<usize>;

    /// Run a query and return its result as wire-ready text cells.
    ///
    /// Every cell is stringified the same way on every dialect (see
    /// [`common::stringify`]). Columns keep the statement's order, duplicates
    /// included.
    ///
    /// # Errors
    ///
    /// `NoResultSet` when the statement produced none; the statement has still run.
    fn get_data_table(&self, sql: &str) -> Result<TabularData>;

    /// Upsert every row of `data` into `table`, keyed by its primary key.
    ///
    /// A table with no rows is a no-op.
    ///
    /// # Errors
    ///
    /// `NoPrimaryKey` unless the table has exactly one primary key column,
    /// `MissingKeyColumn` when `data` lacks it, `InvalidName` / `NullHeader`
    /// for unusable names.
    fn save_data_table(&self, table: &str, data: &TabularData) -> Result<()>;

    /// Columns of `table`, empty when the table does not exist.
    fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>>;

    /// Create the table for `schema` with `uuid` as primary key.
    fn create_table(&self, schema: &RecordSchema) -> Result<()>;

    /// Add one column to an existing table.
    fn add_column(&self, table: &str, field: &FieldDescriptor) -> Result<()>;
}
