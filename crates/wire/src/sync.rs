//! Whole-table copies between a local adapter and a remote endpoint.

use tablebridge_engine::{common, PersistenceAdapter};

use crate::{ClientError, RemoteTransferClient, Result};

fn select_all(table: &str) -> Result<String> {
    let table = common::quote_identifier(table).map_err(ClientError::Local)?;
    Ok(format!("SELECT * FROM {}", table))
}

/// Copy every row of the remote `table` into the local table of the same name.
///
/// Rows are upserted by the local table's primary key. Returns the number of
/// rows transferred.
pub fn pull_table(
    client: &RemoteTransferClient,
    adapter: &dyn PersistenceAdapter,
    table: &str,
) -> Result<usize> {
    let sql = select_all(table)?;
    let Some(data) = client.execute(&sql)? else {
        return Ok(0);
    };
    adapter
        .save_data_table(table, &data)
        .map_err(ClientError::Local)?;
    tracing::info!(
        target: "tablebridge::wire::sync",
        table,
        rows = data.row_count(),
        remote = client.endpoint(),
        "pulled table"
    );
    Ok(data.row_count())
}

/// Copy every row of the local `table` to the remote table of the same name.
///
/// Returns the number of rows transferred.
pub fn push_table(
    adapter: &dyn PersistenceAdapter,
    client: &RemoteTransferClient,
    table: &str,
) -> Result<usize> {
    let sql = select_all(table)?;
    let data = adapter.get_data_table(&sql).map_err(ClientError::Local)?;
    client.save(table, &data)?;
    tracing::info!(
        target: "tablebridge::wire::sync",
        table,
        rows = data.row_count(),
        remote = client.endpoint(),
        "pushed table"
    );
    Ok(data.row_count())
}
