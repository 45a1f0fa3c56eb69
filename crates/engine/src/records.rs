//! Typed record operations over any adapter
//!
//! [`RecordStore`] is implemented for every [`PersistenceAdapter`], so a
//! record type only has to declare its [`RecordSchema`] to be loaded, saved
//! and deleted by `uuid`, and to have its table created or extended.

use tablebridge_core::{Error, Record, RecordSchema, Result, TabularData, UUID_COLUMN};

use crate::adapter::PersistenceAdapter;
use crate::common;

/// Record CRUD and additive schema management.
pub trait RecordStore: PersistenceAdapter {
    /// Load the record with this key, if present.
    ///
    /// # Errors
    ///
    /// `UnexpectedRowCount` when the key is not unique, `TypeMismatch` when a
    /// stored value cannot be cast to its field type.
    fn get<R: Record>(&self, uuid: &str) -> Result<Option<R>>;

    /// Load every record of the type's table.
    fn get_all<R: Record>(&self) -> Result<Vec<R>>;

    /// Insert or update a record.
    ///
    /// # Errors
    ///
    /// `ValueTooLong` when a string exceeds its field size.
    fn save<R: Record>(&self, record: &R) -> Result<()>;

    /// Delete the record with this key; `true` when a row was removed.
    fn delete<R: Record>(&self, uuid: &str) -> Result<bool>;

    /// Bring the table of `R` in line with its schema.
    fn update_or_create_table<R: Record>(&self) -> Result<()> {
        self.update_or_create_schema(R::schema())
    }

    /// Create the table when absent, otherwise add the columns it lacks.
    ///
    /// # Errors
    ///
    /// `NoColumnTypeChange` when an existing column's type differs; nothing is
    /// altered in that case.
    fn update_or_create_schema(&self, schema: &RecordSchema) -> Result<()>;
}

fn select_columns(schema: &RecordSchema) -> Result<String> {
    let columns = schema
        .fields
        .iter()
        .map(|f| common::quote_identifier(f.column))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!(
        "SELECT {} FROM {}",
        columns.join(", "),
        common::quote_identifier(schema.table)?
    ))
}

impl<A: PersistenceAdapter + ?Sized> RecordStore for A {
    fn get<R: Record>(&self, uuid: &str) -> Result<Option<R>> {
        let schema = R::schema();
        schema.validate()?;
        let sql = format!(
            "{} WHERE {} = {}",
            select_columns(schema)?,
            common::quote_identifier(UUID_COLUMN)?,
            self.escape(&uuid.into())
        );
        let mut rows = self.query_multiple(&sql)?;
        match rows.len() {
            0 => Ok(None),
            1 => {
                let row = rows.remove(0);
                R::from_values(schema.cast_row(&row)?).map(Some)
            }
            actual => Err(Error::UnexpectedRowCount { actual }),
        }
    }

    fn get_all<R: Record>(&self) -> Result<Vec<R>> {
        let schema = R::schema();
        schema.validate()?;
        self.query_multiple(&select_columns(schema)?)?
            .iter()
            .map(|row| R::from_values(schema.cast_row(row)?))
            .collect()
    }

    fn save<R: Record>(&self, record: &R) -> Result<()> {
        let schema = R::schema();
        schema.validate()?;
        let values = schema.prepare_values(&record.to_values())?;
        let headers = schema
            .fields
            .iter()
            .map(|f| Some(f.column.to_string()))
            .collect();
        let data = TabularData::from_parts(headers, vec![values])?;
        self.save_data_table(schema.table, &data)?;
        tracing::debug!(
            target: "tablebridge::engine::records",
            table = schema.table,
            uuid = record.uuid(),
            "saved record"
        );
        Ok(())
    }

    fn delete<R: Record>(&self, uuid: &str) -> Result<bool> {
        let schema = R::schema();
        schema.validate()?;
        let sql = format!(
            "DELETE FROM {} WHERE {} = {}",
            common::quote_identifier(schema.table)?,
            common::quote_identifier(UUID_COLUMN)?,
            self.escape(&uuid.into())
        );
        Ok(self.execute_no_result(&sql)? > 0)
    }

    fn update_or_create_schema(&self, schema: &RecordSchema) -> Result<()> {
        schema.validate()?;
        let existing = self.table_columns(schema.table)?;
        if existing.is_empty() {
            return self.create_table(schema);
        }
        let missing = common::missing_fields(schema, &existing, |f| self.sql_type(f))?;
        for field in &missing {
            self.add_column(schema.table, field)?;
        }
        tracing::debug!(
            target: "tablebridge::engine::records",
            table = schema.table,
            dialect = self.dialect(),
            added = missing.len(),
            "schema up to date"
        );
        Ok(())
    }
}
