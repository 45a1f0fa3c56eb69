//! SQLite adapter
//!
//! Reference [`PersistenceAdapter`] backed by `rusqlite`. The connection is
//! opened on first use and kept for the adapter's lifetime; a mutex
//! serializes access because a `rusqlite::Connection` is not `Sync`.
//!
//! Stringification uses each result column's declared type: integers in
//! `BOOL*` columns become `"0"`/`"1"`, integers (unix seconds) and parseable
//! text in `DATE*`/`TIME*` columns become `YYYY-MM-DD HH:MM:SS`.

use std::path::PathBuf;
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Batch, Connection, Statement};
use tablebridge_core::{Error, FieldDescriptor, RecordSchema, Result, Row, TabularData, Value};

use crate::adapter::{ColumnInfo, PersistenceAdapter};
use crate::common::{self, BindValue, ColumnKind, NativeValue};
use crate::config::DatabaseConfig;

/// [`PersistenceAdapter`] for a SQLite file or in-memory database.
pub struct SqliteAdapter {
    path: Option<PathBuf>,
    busy_timeout: Duration,
    conn: Mutex<Option<Connection>>,
}

struct ColumnMeta {
    name: String,
    kind: ColumnKind,
}

enum Outcome {
    Rows {
        columns: Vec<ColumnMeta>,
        rows: Vec<Vec<SqlValue>>,
    },
    Affected(usize),
}

impl SqliteAdapter {
    /// Adapter for the database described by `config`. Nothing is opened yet.
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            path: config.path.clone(),
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
            conn: Mutex::new(None),
        }
    }

    /// Adapter for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(&DatabaseConfig::default())
    }

    /// Adapter for the database file at `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::new(&DatabaseConfig {
            path: Some(path.into()),
            ..DatabaseConfig::default()
        })
    }

    /// Whether the connection has been opened yet.
    pub fn is_connected(&self) -> bool {
        self.conn.lock().is_some()
    }

    fn connect(&self) -> Result<Connection> {
        let conn = match &self.path {
            Some(path) => Connection::open(path),
            None => Connection::open_in_memory(),
        }
        .map_err(sql_err)?;
        conn.busy_timeout(self.busy_timeout).map_err(sql_err)?;
        tracing::debug!(
            target: "tablebridge::engine::sqlite",
            path = ?self.path,
            "opened connection"
        );
        Ok(conn)
    }

    fn with_connection<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut guard = self.conn.lock();
        if guard.is_none() {
            *guard = Some(self.connect()?);
        }
        let conn = guard
            .as_mut()
            .ok_or_else(|| Error::database("connection unavailable"))?;
        f(conn)
    }

    fn run(&self, sql: &str) -> Result<Outcome> {
        tracing::trace!(target: "tablebridge::engine::sqlite", sql, "run");
        self.with_connection(|conn| run_statement(conn, sql))
    }
}

fn sql_err(e: rusqlite::Error) -> Error {
    Error::database(e.to_string())
}

fn require_sql(sql: &str) -> Result<()> {
    if sql.trim().is_empty() {
        return Err(Error::malformed("empty SQL statement"));
    }
    Ok(())
}

/// Run every statement in `sql` in order.
///
/// Statements without a result set accumulate their affected counts. A
/// statement that returns rows must be the last one; anything after it is
/// rejected before it runs.
fn run_statement(conn: &Connection, sql: &str) -> Result<Outcome> {
    require_sql(sql)?;
    let mut batch = Batch::new(conn, sql);
    let mut outcome = None;
    let mut affected = 0;
    let mut index = 0;
    while let Some(mut stmt) = batch.next().map_err(sql_err)? {
        if outcome.is_some() {
            return Err(Error::StatementAfterResultSet { index });
        }
        if stmt.column_count() == 0 {
            affected += stmt.execute([]).map_err(sql_err)?;
        } else {
            outcome = Some(read_rows(&mut stmt)?);
        }
        index += 1;
    }
    if index == 0 {
        return Err(Error::malformed("no SQL statement"));
    }
    Ok(outcome.unwrap_or(Outcome::Affected(affected)))
}

fn read_rows(stmt: &mut Statement<'_>) -> Result<Outcome> {
    let columns: Vec<ColumnMeta> = stmt
        .columns()
        .iter()
        .map(|c| ColumnMeta {
            name: c.name().to_string(),
            kind: ColumnKind::from_declared(c.decl_type()),
        })
        .collect();
    let width = columns.len();

    let mut result = Vec::new();
    let mut rows = stmt.query([]).map_err(sql_err)?;
    while let Some(row) = rows.next().map_err(sql_err)? {
        let mut cells = Vec::with_capacity(width);
        for i in 0..width {
            cells.push(row.get::<_, SqlValue>(i).map_err(sql_err)?);
        }
        result.push(cells);
    }
    Ok(Outcome::Rows {
        columns,
        rows: result,
    })
}

fn columns_of(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    let sql = format!("PRAGMA table_info({})", common::quote_identifier(table)?);
    let mut stmt = conn.prepare(&sql).map_err(sql_err)?;
    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get("name")?,
                declared_type: row.get::<_, Option<String>>("type")?.unwrap_or_default(),
                primary_key: row.get::<_, i64>("pk")? > 0,
            })
        })
        .map_err(sql_err)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_err)?;
    Ok(columns)
}

fn wire_cell(value: &SqlValue, kind: ColumnKind, row: usize, column: usize) -> Result<Value> {
    let native = match (value, kind) {
        (SqlValue::Null, _) => NativeValue::Null,
        (SqlValue::Integer(i), ColumnKind::Boolean) => NativeValue::Bool(*i != 0),
        (SqlValue::Integer(i), ColumnKind::Temporal) => match common::timestamp_from_epoch(*i) {
            Some(dt) => NativeValue::Timestamp(dt),
            None => NativeValue::Integer(*i),
        },
        (SqlValue::Integer(i), _) => NativeValue::Integer(*i),
        (SqlValue::Real(f), _) => NativeValue::Real(*f),
        (SqlValue::Text(s), ColumnKind::Temporal) => match common::parse_timestamp(s) {
            Some(dt) => NativeValue::Timestamp(dt),
            None => NativeValue::Text(s),
        },
        (SqlValue::Text(s), _) => NativeValue::Text(s),
        (SqlValue::Blob(_), _) => {
            return Err(Error::UnsupportedCellType {
                row,
                column,
                kind: "Blob".to_string(),
            })
        }
    };
    Ok(common::stringify(native))
}

fn raw_cell(value: SqlValue, row: usize, column: usize) -> Result<Value> {
    match value {
        SqlValue::Null => Ok(Value::Null),
        SqlValue::Integer(i) => Ok(Value::Int(i)),
        SqlValue::Real(f) => Ok(Value::String(f.to_string())),
        SqlValue::Text(s) => Ok(Value::String(s)),
        SqlValue::Blob(_) => Err(Error::UnsupportedCellType {
            row,
            column,
            kind: "Blob".to_string(),
        }),
    }
}

fn bind(value: BindValue) -> SqlValue {
    match value {
        BindValue::Null => SqlValue::Null,
        BindValue::Integer(i) => SqlValue::Integer(i),
        BindValue::Text(s) => SqlValue::Text(s),
    }
}

fn upsert_statement(table: &str, columns: &[String], key: &str) -> String {
    let names: Vec<String> = columns.iter().map(|c| format!("\"{}\"", c)).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    let updates: Vec<String> = columns
        .iter()
        .filter(|c| !c.eq_ignore_ascii_case(key))
        .map(|c| format!("\"{0}\" = excluded.\"{0}\"", c))
        .collect();
    let action = if updates.is_empty() {
        "DO NOTHING".to_string()
    } else {
        format!("DO UPDATE SET {}", updates.join(", "))
    };
    format!(
        "INSERT INTO \"{}\" ({}) VALUES ({}) ON CONFLICT (\"{}\") {}",
        table,
        names.join(", "),
        placeholders.join(", "),
        key,
        action
    )
}

impl PersistenceAdapter for SqliteAdapter {
    fn dialect(&self) -> &'static str {
        "sqlite"
    }

    fn query_multiple(&self, sql: &str) -> Result<Vec<Row>> {
        match self.run(sql)? {
            Outcome::Affected(_) => Err(Error::NoResultSet),
            Outcome::Rows { columns, rows } => rows
                .into_iter()
                .enumerate()
                .map(|(r, cells)| {
                    columns
                        .iter()
                        .zip(cells)
                        .enumerate()
                        .map(|(c, (meta, cell))| -> Result<(String, Value)> {
                            Ok((meta.name.clone(), raw_cell(cell, r, c)?))
                        })
                        .collect::<Result<Row>>()
                })
                .collect(),
        }
    }

    fn execute_no_result(&self, sql: &str) -> Result<usize> {
        require_sql(sql)?;
        self.with_connection(|conn| {
            let mut batch = Batch::new(conn, sql);
            let mut affected = 0;
            let mut ran = false;
            while let Some(mut stmt) = batch.next().map_err(sql_err)? {
                if stmt.column_count() > 0 {
                    return Err(Error::UnexpectedResultSet);
                }
                affected += stmt.execute([]).map_err(sql_err)?;
                ran = true;
            }
            if !ran {
                return Err(Error::malformed("no SQL statement"));
            }
            Ok(affected)
        })
    }

    fn get_data_table(&self, sql: &str) -> Result<TabularData> {
        match self.run(sql)? {
            Outcome::Affected(affected) => {
                tracing::debug!(
                    target: "tablebridge::engine::sqlite",
                    affected,
                    "statement produced no result set"
                );
                Err(Error::NoResultSet)
            }
            Outcome::Rows { columns, rows } => {
                let headers = columns.iter().map(|c| Some(c.name.clone())).collect();
                let cells = rows
                    .iter()
                    .enumerate()
                    .map(|(r, row)| {
                        row.iter()
                            .zip(&columns)
                            .enumerate()
                            .map(|(c, (value, meta))| wire_cell(value, meta.kind, r, c))
                            .collect::<Result<Vec<_>>>()
                    })
                    .collect::<Result<Vec<_>>>()?;
                TabularData::from_parts(headers, cells)
            }
        }
    }

    fn save_data_table(&self, table: &str, data: &TabularData) -> Result<()> {
        if data.is_empty() {
            tracing::debug!(target: "tablebridge::engine::sqlite", table, "nothing to save");
            return Ok(());
        }
        let table = common::sanitize_identifier(table)?;
        let columns = data
            .iter_headers()
            .enumerate()
            .map(|(column, header)| {
                header
                    .ok_or(Error::NullHeader { column })
                    .and_then(common::sanitize_identifier)
            })
            .collect::<Result<Vec<_>>>()?;

        self.with_connection(|conn| {
            let keys: Vec<ColumnInfo> = columns_of(conn, &table)?
                .into_iter()
                .filter(|c| c.primary_key)
                .collect();
            if keys.len() != 1 {
                return Err(Error::NoPrimaryKey {
                    table: table.clone(),
                    found: keys.len(),
                });
            }
            let key = common::sanitize_identifier(&keys[0].name)?;
            if !columns.iter().any(|c| c.eq_ignore_ascii_case(&key)) {
                return Err(Error::MissingKeyColumn {
                    table: table.clone(),
                    column: key,
                });
            }

            let sql = upsert_statement(&table, &columns, &key);
            let tx = conn.transaction().map_err(sql_err)?;
            {
                let mut stmt = tx.prepare(&sql).map_err(sql_err)?;
                for row in data.iter_rows() {
                    let params = row.iter().map(|v| bind(common::classify_cell(v)));
                    stmt.execute(params_from_iter(params)).map_err(sql_err)?;
                }
            }
            tx.commit().map_err(sql_err)?;

            tracing::debug!(
                target: "tablebridge::engine::sqlite",
                table = %table,
                rows = data.row_count(),
                "upserted rows"
            );
            Ok(())
        })
    }

    fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        self.with_connection(|conn| columns_of(conn, table))
    }

    fn create_table(&self, schema: &RecordSchema) -> Result<()> {
        schema.validate()?;
        let key = schema.key_index()?;
        let definitions = schema
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| -> Result<String> {
                let column = common::quote_identifier(field.column)?;
                let ty = self.sql_type(field);
                Ok(if i == key {
                    format!("{} {} NOT NULL PRIMARY KEY", column, ty)
                } else {
                    format!("{} {}", column, ty)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let sql = format!(
            "CREATE TABLE {} ({})",
            common::quote_identifier(schema.table)?,
            definitions.join(", ")
        );
        self.execute_no_result(&sql)?;
        tracing::info!(target: "tablebridge::engine::sqlite", table = schema.table, "created table");
        Ok(())
    }

    fn add_column(&self, table: &str, field: &FieldDescriptor) -> Result<()> {
        let sql = format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            common::quote_identifier(table)?,
            common::quote_identifier(field.column)?,
            self.sql_type(field)
        );
        self.execute_no_result(&sql)?;
        tracing::info!(
            target: "tablebridge::engine::sqlite",
            table,
            column = field.column,
            "added column"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn adapter_with_table() -> SqliteAdapter {
        let adapter = SqliteAdapter::in_memory();
        adapter
            .execute_no_result("CREATE TABLE items (id TEXT PRIMARY KEY, name TEXT, qty INTEGER)")
            .unwrap();
        adapter
    }

    fn items(rows: &[[Option<&str>; 3]]) -> TabularData {
        let mut t = TabularData::new(rows.len(), 3).unwrap();
        for (c, h) in ["id", "name", "qty"].iter().enumerate() {
            t.set_header(c, *h).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                t.set_cell_value(r, c, cell.map(str::to_string)).unwrap();
            }
        }
        t
    }

    #[test]
    fn test_connection_is_lazy() {
        let adapter = SqliteAdapter::in_memory();
        assert!(!adapter.is_connected());
        adapter.query_single("SELECT 1").unwrap();
        assert!(adapter.is_connected());
    }

    #[test]
    fn test_select_literal() {
        let adapter = SqliteAdapter::in_memory();
        let table = adapter.get_data_table("select 1").unwrap();
        assert_eq!(table.headers(), vec![Some("1".to_string())]);
        assert_eq!(table.rows(), vec![vec![Value::from("1")]]);
    }

    #[test]
    fn test_duplicate_columns_preserved() {
        let adapter = SqliteAdapter::in_memory();
        let table = adapter
            .get_data_table("SELECT 1 AS a, 2 AS a, NULL AS b")
            .unwrap();
        assert_eq!(
            table.headers(),
            vec![Some("a".to_string()), Some("a".to_string()), Some("b".to_string())]
        );
        assert_eq!(
            table.rows(),
            vec![vec![Value::from("1"), Value::from("2"), Value::Null]]
        );
    }

    #[test]
    fn test_stringification_uses_declared_types() {
        let adapter = SqliteAdapter::in_memory();
        adapter
            .execute_no_result("CREATE TABLE t (flag BOOLEAN, at DATETIME, ratio REAL, n INTEGER)")
            .unwrap();
        adapter
            .execute_no_result("INSERT INTO t VALUES (5, '2024-02-03T04:05:06', 0.5, 7), (0, 86400, 2.0, NULL)")
            .unwrap();
        let table = adapter
            .get_data_table("SELECT flag, at, ratio, n FROM t ORDER BY rowid")
            .unwrap();
        assert_eq!(
            table.rows(),
            vec![
                vec![
                    Value::from("1"),
                    Value::from("2024-02-03 04:05:06"),
                    Value::from("0.5"),
                    Value::from("7"),
                ],
                vec![
                    Value::from("0"),
                    Value::from("1970-01-02 00:00:00"),
                    Value::from("2"),
                    Value::Null,
                ],
            ]
        );
    }

    #[test]
    fn test_blob_rejected() {
        let adapter = SqliteAdapter::in_memory();
        let err = adapter.get_data_table("SELECT 'a', x'00ff'").unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedCellType {
                row: 0,
                column: 1,
                kind: "Blob".into()
            }
        );
    }

    #[test]
    fn test_dml_has_no_result_set() {
        let adapter = adapter_with_table();
        assert_eq!(
            adapter.get_data_table("INSERT INTO items (id) VALUES ('x')"),
            Err(Error::NoResultSet)
        );
        // The statement still ran.
        assert_eq!(adapter.query_multiple("SELECT id FROM items").unwrap().len(), 1);
    }

    #[test]
    fn test_batch_runs_every_statement() {
        let adapter = SqliteAdapter::in_memory();
        assert_eq!(
            adapter.get_data_table("CREATE TABLE x (a INTEGER);\nINSERT INTO x VALUES (1);"),
            Err(Error::NoResultSet)
        );
        let table = adapter
            .get_data_table("INSERT INTO x VALUES (2); SELECT count(*) AS n FROM x")
            .unwrap();
        assert_eq!(table.rows(), vec![vec![Value::from("2")]]);
        assert_eq!(
            adapter
                .execute_no_result("INSERT INTO x VALUES (3); DELETE FROM x WHERE a < 3;")
                .unwrap(),
            3
        );
    }

    #[test]
    fn test_statement_after_result_set_rejected() {
        let adapter = adapter_with_table();
        assert_eq!(
            adapter.get_data_table("select 1; select 2"),
            Err(Error::StatementAfterResultSet { index: 1 })
        );
        assert_eq!(
            adapter.get_data_table("SELECT 1; INSERT INTO items (id) VALUES ('late')"),
            Err(Error::StatementAfterResultSet { index: 1 })
        );
        assert!(adapter.query_multiple("SELECT id FROM items").unwrap().is_empty());
        assert_eq!(
            adapter.execute_no_result("INSERT INTO items (id) VALUES ('a'); SELECT 1"),
            Err(Error::UnexpectedResultSet)
        );
    }

    #[test]
    fn test_empty_sql_rejected() {
        let adapter = SqliteAdapter::in_memory();
        for sql in ["", "  \n", ";", "-- nothing"] {
            assert!(matches!(
                adapter.get_data_table(sql),
                Err(Error::MalformedInput { .. })
            ));
            assert!(matches!(
                adapter.execute_no_result(sql),
                Err(Error::MalformedInput { .. })
            ));
        }
    }

    #[test]
    fn test_statement_shapes() {
        let adapter = adapter_with_table();
        assert_eq!(
            adapter.execute_no_result("SELECT 1"),
            Err(Error::UnexpectedResultSet)
        );
        assert_eq!(
            adapter.query_multiple("DELETE FROM items"),
            Err(Error::NoResultSet)
        );
        assert_eq!(
            adapter.query_single("SELECT id FROM items"),
            Err(Error::UnexpectedRowCount { actual: 0 })
        );
        adapter
            .execute_no_result("INSERT INTO items (id) VALUES ('a'), ('b')")
            .unwrap();
        assert_eq!(
            adapter.query_single("SELECT id FROM items"),
            Err(Error::UnexpectedRowCount { actual: 2 })
        );
        let row = adapter
            .query_single("SELECT id, qty FROM items WHERE id = 'a'")
            .unwrap();
        assert_eq!(row.get("id"), Some(&Value::from("a")));
        assert_eq!(row.get("qty"), Some(&Value::Null));
    }

    #[test]
    fn test_sql_error_surfaces() {
        let adapter = SqliteAdapter::in_memory();
        assert!(matches!(
            adapter.get_data_table("SELEC nonsense"),
            Err(Error::Database { .. })
        ));
    }

    #[test]
    fn test_save_data_table_upserts() {
        let adapter = adapter_with_table();
        adapter
            .save_data_table("items", &items(&[[Some("a"), Some("apple"), Some("3")]]))
            .unwrap();
        adapter
            .save_data_table(
                "items",
                &items(&[
                    [Some("a"), Some("apricot"), None],
                    [Some("b"), Some("banana"), Some("5")],
                ]),
            )
            .unwrap();
        let table = adapter
            .get_data_table("SELECT id, name, qty, typeof(qty) FROM items ORDER BY id")
            .unwrap();
        assert_eq!(
            table.rows(),
            vec![
                vec![Value::from("a"), Value::from("apricot"), Value::Null, Value::from("null")],
                vec![Value::from("b"), Value::from("banana"), Value::from("5"), Value::from("integer")],
            ]
        );
    }

    #[test]
    fn test_save_data_table_is_idempotent() {
        let adapter = adapter_with_table();
        let data = items(&[
            [Some("a"), Some("x"), Some("1")],
            [Some("b"), None, Some("2")],
        ]);
        adapter.save_data_table("items", &data).unwrap();
        let once = adapter.get_data_table("SELECT * FROM items ORDER BY id").unwrap();
        adapter.save_data_table("items", &data).unwrap();
        let twice = adapter.get_data_table("SELECT * FROM items ORDER BY id").unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.row_count(), 2);
    }

    #[test]
    fn test_save_empty_table_is_noop() {
        let adapter = SqliteAdapter::in_memory();
        // Not even the missing table is noticed.
        adapter.save_data_table("missing", &items(&[])).unwrap();
        assert!(!adapter.is_connected());
    }

    #[test]
    fn test_save_requires_single_primary_key() {
        let adapter = SqliteAdapter::in_memory();
        adapter
            .execute_no_result("CREATE TABLE nokey (id TEXT, name TEXT, qty INTEGER)")
            .unwrap();
        adapter
            .execute_no_result(
                "CREATE TABLE twokeys (id TEXT, name TEXT, qty INTEGER, PRIMARY KEY (id, name))",
            )
            .unwrap();
        let data = items(&[[Some("a"), None, None]]);
        assert_eq!(
            adapter.save_data_table("nokey", &data),
            Err(Error::NoPrimaryKey {
                table: "nokey".into(),
                found: 0
            })
        );
        assert_eq!(
            adapter.save_data_table("twokeys", &data),
            Err(Error::NoPrimaryKey {
                table: "twokeys".into(),
                found: 2
            })
        );
    }

    #[test]
    fn test_save_requires_key_column_in_data() {
        let adapter = adapter_with_table();
        let mut data = TabularData::new(1, 1).unwrap();
        data.set_header(0, "name").unwrap();
        data.set_cell_value(0, 0, "x").unwrap();
        assert_eq!(
            adapter.save_data_table("items", &data),
            Err(Error::MissingKeyColumn {
                table: "items".into(),
                column: "id".into()
            })
        );
    }

    #[test]
    fn test_save_sanitizes_names() {
        let adapter = adapter_with_table();
        let mut data = items(&[[Some("a"), Some("n"), Some("1")]]);
        data.set_header(1, " na;me ").unwrap();
        adapter.save_data_table("it\"ems; ", &data).unwrap();
        let row = adapter.query_single("SELECT name FROM items").unwrap();
        assert_eq!(row.get("name"), Some(&Value::from("n")));
    }

    #[test]
    fn test_save_rolls_back_on_failure() {
        let adapter = SqliteAdapter::in_memory();
        adapter
            .execute_no_result("CREATE TABLE items (id TEXT PRIMARY KEY, name TEXT NOT NULL, qty INTEGER)")
            .unwrap();
        let data = items(&[[Some("a"), Some("ok"), None], [Some("b"), None, None]]);
        assert!(matches!(
            adapter.save_data_table("items", &data),
            Err(Error::Database { .. })
        ));
        assert!(adapter.query_multiple("SELECT * FROM items").unwrap().is_empty());
    }

    #[test]
    fn test_upsert_statement() {
        let sql = upsert_statement("t", &["id".into(), "v".into()], "id");
        assert_eq!(
            sql,
            "INSERT INTO \"t\" (\"id\", \"v\") VALUES (?1, ?2) ON CONFLICT (\"id\") DO UPDATE SET \"v\" = excluded.\"v\""
        );
        let sql = upsert_statement("t", &["id".into()], "id");
        assert!(sql.ends_with("DO NOTHING"));
    }

    #[test]
    fn test_escape_prevents_injection() {
        let adapter = adapter_with_table();
        let hostile = Value::from("x'); DROP TABLE items; --");
        let sql = format!(
            "INSERT INTO items (id, name) VALUES ('k', {})",
            adapter.escape(&hostile)
        );
        adapter.execute_no_result(&sql).unwrap();
        let row = adapter.query_single("SELECT name FROM items").unwrap();
        assert_eq!(row.get("name"), Some(&hostile));
    }

    #[test]
    fn test_concurrent_access() {
        let adapter = Arc::new(adapter_with_table());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let adapter = Arc::clone(&adapter);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        let id = format!("{}-{}", t, i);
                        let data = items(&[[Some(&id), Some("n"), Some("1")]]);
                        adapter.save_data_table("items", &data).unwrap();
                        let row = adapter
                            .query_single(&format!("SELECT id FROM items WHERE id = '{}'", id))
                            .unwrap();
                        assert_eq!(row.get("id"), Some(&Value::from(id.as_str())));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let count = adapter.query_single("SELECT count(*) AS n FROM items").unwrap();
        assert_eq!(count.get("n"), Some(&Value::Int(200)));
    }

    #[test]
    fn test_file_backed_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.db");
        {
            let adapter = SqliteAdapter::with_path(&path);
            adapter
                .execute_no_result("CREATE TABLE kv (k TEXT PRIMARY KEY, v TEXT)")
                .unwrap();
            adapter
                .execute_no_result("INSERT INTO kv VALUES ('a', 'b')")
                .unwrap();
        }
        let adapter = SqliteAdapter::with_path(&path);
        let table = adapter.get_data_table("SELECT * FROM kv").unwrap();
        assert_eq!(table.rows(), vec![vec![Value::from("a"), Value::from("b")]]);
    }
}
