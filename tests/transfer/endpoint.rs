//! A live endpoint driven by the remote client and the sync helpers.

use std::sync::Arc;

use tablebridge::{
    pull_table, push_table, ClientError, PersistenceAdapter, SqliteAdapter, Value,
};

use crate::common::*;

#[test]
fn client_execute_select() {
    let server = spawn_server(Arc::new(SqliteAdapter::in_memory()));
    let t = server.client().execute("select 1").unwrap().unwrap();
    assert_eq!(t.headers(), vec![Some("1".into())]);
    assert_eq!(t.rows(), vec![vec![Value::from("1")]]);
}

#[test]
fn client_execute_dml_is_none() {
    let remote = items_adapter();
    let server = spawn_server(remote.clone());
    let result = server
        .client()
        .execute("INSERT INTO items (id) VALUES ('z')")
        .unwrap();
    assert!(result.is_none());
    assert_eq!(remote.query_multiple("SELECT id FROM items").unwrap().len(), 1);
}

#[test]
fn remote_failure_is_reported_with_status() {
    let server = spawn_server(Arc::new(SqliteAdapter::in_memory()));
    match server.client().execute("SELECT * FROM missing") {
        Err(ClientError::Remote { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("missing"), "body: {}", body);
        }
        other => panic!("Expected Remote, got {:?}", other),
    }
}

#[test]
fn client_save_upserts_remote_table() {
    let remote = items_adapter();
    let server = spawn_server(remote.clone());
    let client = server.client();

    let data = table(&["id", "name"], &[&[Some("a"), Some("apple")], &[Some("b"), None]]);
    client.save("items", &data).unwrap();
    client.save("items", &data).unwrap();

    let back = client
        .execute("SELECT id, name FROM items ORDER BY id")
        .unwrap()
        .unwrap();
    assert_eq!(back, data);
}

#[test]
fn push_copies_local_rows() {
    let local = items_adapter();
    local
        .execute_no_result("INSERT INTO items VALUES ('a', 'apple', 3, 1), ('b', NULL, NULL, 0)")
        .unwrap();
    let remote = items_adapter();
    let server = spawn_server(remote.clone());

    let rows = push_table(&*local, &server.client(), "items").unwrap();
    assert_eq!(rows, 2);

    let sql = "SELECT * FROM items ORDER BY id";
    assert_eq!(
        remote.get_data_table(sql).unwrap(),
        local.get_data_table(sql).unwrap()
    );
}

#[test]
fn pull_copies_remote_rows() {
    let remote = items_adapter();
    remote
        .execute_no_result("INSERT INTO items VALUES ('r', 'remote', 7, 1)")
        .unwrap();
    let local = items_adapter();
    local
        .execute_no_result("INSERT INTO items VALUES ('r', 'stale', 1, 0), ('l', 'local', 2, 0)")
        .unwrap();
    let server = spawn_server(remote.clone());

    let rows = pull_table(&server.client(), &*local, "items").unwrap();
    assert_eq!(rows, 1);

    let pulled = local
        .query_single("SELECT name, qty FROM items WHERE id = 'r'")
        .unwrap();
    assert_eq!(pulled.get("name"), Some(&Value::from("remote")));
    assert_eq!(pulled.get("qty"), Some(&Value::Int(7)));
    // Rows only present locally are left alone.
    assert_eq!(local.query_multiple("SELECT id FROM items").unwrap().len(), 2);
}

#[test]
fn push_of_empty_table_is_noop() {
    let server = spawn_server(items_adapter());
    assert_eq!(push_table(&*items_adapter(), &server.client(), "items").unwrap(), 0);
}
