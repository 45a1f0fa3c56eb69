//! The execute/save protocol against a SQLite adapter.

use tablebridge::{decode, encode, Command, Error, Output, ProtocolError, Value};

use crate::common::*;

#[test]
fn execute_select_one() {
    let executor = create_executor();
    let output = executor.handle("execute\nselect 1").unwrap();
    assert_eq!(output.into_body(), "\"1\"\n\"1\"\n");
}

#[test]
fn save_then_execute_preserves_awkward_text() {
    let executor = create_executor();
    executor.handle(&format!("execute\n{}", ITEMS_DDL)).unwrap();

    let data = table(
        &["id", "name"],
        &[
            &[Some("a"), Some("comma, \"quote\"\nand newline")],
            &[Some("b"), Some("")],
            &[Some("c"), None],
        ],
    );
    let body = Command::Save {
        table: "items".into(),
        data: data.clone(),
    }
    .to_body()
    .unwrap();
    assert_eq!(executor.handle(&body).unwrap(), Output::Empty);

    let output = executor
        .handle("execute\nSELECT id, name FROM items ORDER BY id")
        .unwrap();
    let Output::Table(csv) = output else {
        panic!("Expected a result set");
    };
    assert_eq!(decode(&csv).unwrap(), data);
    assert_eq!(csv, encode(&data).unwrap());
}

#[test]
fn save_is_idempotent_over_the_protocol() {
    let executor = create_executor();
    executor.handle(&format!("execute\n{}", ITEMS_DDL)).unwrap();
    let body = "save\nitems\n\"id\",\"qty\",\"active\"\n\"a\",\"1\",\"1\"\n\"b\",\"2\",\"0\"\n";

    executor.handle(body).unwrap();
    let once = executor.handle("execute\nSELECT * FROM items ORDER BY id").unwrap();
    executor.handle(body).unwrap();
    let twice = executor.handle("execute\nSELECT * FROM items ORDER BY id").unwrap();
    assert_eq!(once, twice);
    assert_eq!(
        twice.into_body(),
        "\"id\",\"name\",\"qty\",\"active\"\n\"a\",,\"1\",\"1\"\n\"b\",,\"2\",\"0\"\n"
    );
}

#[test]
fn booleans_and_dates_use_canonical_text() {
    let executor = create_executor();
    executor
        .handle("execute\nCREATE TABLE events (id TEXT PRIMARY KEY, done BOOLEAN, at DATE)")
        .unwrap();
    executor
        .handle("execute\nINSERT INTO events VALUES ('e', 1, '2024-06-01')")
        .unwrap();
    let body = executor
        .handle("execute\nSELECT done, at FROM events")
        .unwrap()
        .into_body();
    assert_eq!(body, "\"done\",\"at\"\n\"1\",\"2024-06-01 00:00:00\"\n");
}

#[test]
fn protocol_errors() {
    let executor = create_executor();
    assert_eq!(executor.handle("execute"), Err(ProtocolError::MissingSecondLine));
    assert_eq!(executor.handle("save\nitems"), Err(ProtocolError::MissingThirdLine));
    assert!(matches!(
        executor.handle("merge\nitems\n\"id\"\n"),
        Err(ProtocolError::UnknownAction { .. })
    ));
}

#[test]
fn save_errors_surface_from_the_adapter() {
    let executor = create_executor();
    executor.handle(&format!("execute\n{}", ITEMS_DDL)).unwrap();
    match executor.handle("save\nitems\n\"name\"\n\"x\"\n") {
        Err(ProtocolError::Core(Error::MissingKeyColumn { table, column })) => {
            assert_eq!(table, "items");
            assert_eq!(column, "id");
        }
        other => panic!("Expected MissingKeyColumn, got {:?}", other),
    }
    assert!(matches!(
        executor.handle("save\nitems\n\"id\",\"name\"\n\"x\"\n"),
        Err(ProtocolError::Core(Error::RowCellCountMismatch { row: 0, .. }))
    ));
}

#[test]
fn duplicate_result_columns_survive_the_wire() {
    let executor = create_executor();
    let csv = executor
        .handle("execute\nSELECT 'x' AS H1, 'y' AS H1")
        .unwrap()
        .into_body();
    let t = decode(&csv).unwrap();
    assert_eq!(t.headers(), vec![Some("H1".into()), Some("H1".into())]);
    assert_eq!(t.row(0).unwrap(), vec![Value::from("x"), Value::from("y")]);
}
