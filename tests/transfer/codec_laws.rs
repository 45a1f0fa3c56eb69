//! CSV grammar laws on the public codec.

use proptest::prelude::*;
use tablebridge::{decode, encode, Error, TabularData, Value};

use crate::common::table;

#[test]
fn decode_simple_example() {
    let t = decode("\"A\",\"B\"\n\"1\",\"2\"").unwrap();
    assert_eq!(t.headers(), vec![Some("A".into()), Some("B".into())]);
    assert_eq!(t.rows(), vec![vec![Value::from("1"), Value::from("2")]]);
}

#[test]
fn decode_trailing_null_example() {
    let t = decode("\"A\",\"B\"\n\"1\",").unwrap();
    assert_eq!(t.rows(), vec![vec![Value::from("1"), Value::Null]]);
}

#[test]
fn null_field_law() {
    let t = table(&["A", "B", "C"], &[&[Some("x"), None, Some("")]]);
    let decoded = decode(&encode(&t).unwrap()).unwrap();
    assert_eq!(decoded.cell_value(0, 1).unwrap(), Value::Null);
    // The empty string stays distinct from null.
    assert_eq!(decoded.cell_value(0, 2).unwrap(), Value::from(""));

    let t = decode("\"A\",\"B\",\"C\"\n\"1\",,\"3\"").unwrap();
    assert_eq!(t.cell_value(0, 1).unwrap(), Value::Null);
}

#[test]
fn quote_escaping_law() {
    let t = table(&["A"], &[&[Some("a\"b")]]);
    let csv = encode(&t).unwrap();
    assert!(csv.contains("\"a\"\"b\""));
    assert_eq!(decode(&csv).unwrap().cell_value(0, 0).unwrap(), Value::from("a\"b"));
}

#[test]
fn embedded_newline_law() {
    let t = table(&["A", "B"], &[&[Some("line1\nline2"), Some("x")], &[Some("y"), None]]);
    let decoded = decode(&encode(&t).unwrap()).unwrap();
    assert_eq!(decoded, t);
    assert_eq!(decoded.row_count(), 2);
}

#[test]
fn arity_invariant() {
    let result = decode("\"H1\",\"H2\"\n\"a\",\"b\"\n\"c\",\"d\",\"e\"\n");
    match result {
        Err(Error::RowCellCountMismatch {
            row,
            found,
            expected,
        }) => {
            assert_eq!((row, found, expected), (1, 3, 2));
        }
        other => panic!("Expected RowCellCountMismatch, got {:?}", other),
    }
}

#[test]
fn odd_quote_precondition() {
    // The first row is fine on its own; the whole text is still rejected.
    assert!(matches!(
        decode("\"A\"\n\"ok\"\n\"broken\n"),
        Err(Error::MalformedInput { .. })
    ));
    assert!(matches!(decode("\"A\",B\"\n"), Err(Error::MalformedInput { .. })));
}

#[test]
fn duplicate_headers_are_independent() {
    let mut t = decode("\"H1\",\"H1\"\n\"a\",\"b\"\n").unwrap();
    assert_eq!(t.header(0).unwrap(), t.header(1).unwrap());
    t.set_cell_value(0, 1, "changed").unwrap();
    assert_eq!(t.cell_value(0, 0).unwrap(), Value::from("a"));
    assert_eq!(decode(&encode(&t).unwrap()).unwrap(), t);
}

#[test]
fn copies_do_not_alias() {
    let t = table(&["A"], &[&[Some("1")]]);
    let mut rows = t.rows();
    rows[0][0] = Value::from("2");
    let mut headers = t.headers();
    headers[0] = None;
    assert_eq!(t.cell_value(0, 0).unwrap(), Value::from("1"));
    assert_eq!(t.header(0).unwrap(), Some("A".into()));
}

fn cell() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[a-z ,\"\n]{1,10}".prop_map(Some),
    ]
}

fn tables() -> impl Strategy<Value = TabularData> {
    (2usize..4, 0usize..5).prop_flat_map(|(cols, rows)| {
        (
            prop::collection::vec("[A-Za-z_\" ,]{1,6}", cols),
            prop::collection::vec(prop::collection::vec(cell(), cols), rows),
        )
            .prop_map(|(headers, rows)| {
                TabularData::from_parts(
                    headers.into_iter().map(Some).collect(),
                    rows.into_iter()
                        .map(|r| r.into_iter().map(Value::from).collect())
                        .collect(),
                )
                .unwrap()
            })
    })
}

proptest! {
    #[test]
    fn round_trip_law(t in tables()) {
        prop_assert_eq!(decode(&encode(&t).unwrap()).unwrap(), t);
    }

    #[test]
    fn crlf_line_endings_decode_the_same(t in tables()) {
        let csv = encode(&t).unwrap();
        // Only row breaks become CRLF; newlines inside quoted cells stay.
        let mut crlf = String::new();
        let mut quotes = 0usize;
        for c in csv.chars() {
            if c == '"' {
                quotes += 1;
            }
            if c == '\n' && quotes % 2 == 0 {
                crlf.push('\r');
            }
            crlf.push(c);
        }
        prop_assert_eq!(decode(&crlf).unwrap(), t);
    }
}
