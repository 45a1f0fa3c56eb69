//! Execute command handler.

use tablebridge_core::Error as CoreError;
use tablebridge_engine::PersistenceAdapter;

use crate::{Output, Result};

/// Handle Execute command.
///
/// A statement without a result set (DML, DDL) still runs and answers with
/// an empty body.
pub fn execute_query(adapter: &dyn PersistenceAdapter, query: &str) -> Result<Output> {
    match adapter.get_data_table(query) {
        Ok(table) => {
            tracing::debug!(
                target: "tablebridge::executor",
                rows = table.row_count(),
                columns = table.column_count(),
                "query returned a result set"
            );
            Ok(Output::Table(tablebridge_codec::encode(&table)?))
        }
        Err(CoreError::NoResultSet) => Ok(Output::Empty),
        Err(e) => Err(e.into()),
    }
}
