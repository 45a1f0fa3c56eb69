//! Save command handler.

use tablebridge_core::TabularData;
use tablebridge_engine::PersistenceAdapter;

use crate::{Output, Result};

/// Handle Save command.
pub fn save_table(adapter: &dyn PersistenceAdapter, table: &str, data: &TabularData) -> Result<Output> {
    adapter.save_data_table(table, data)?;
    tracing::debug!(
        target: "tablebridge::executor",
        table,
        rows = data.row_count(),
        "saved table"
    );
    Ok(Output::Empty)
}
