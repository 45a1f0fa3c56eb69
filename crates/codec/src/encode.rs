//! TabularData -> CSV text

use tablebridge_core::{Error, Result, TabularData, Value};

use crate::{DELIMITER, NEWLINE, QUOTE};

/// Serialize a table into the wire grammar.
///
/// Every header and string cell is quoted with embedded quotes doubled, null
/// cells are written as nothing, and the output always ends with a newline
/// (a header-only table yields just the header row).
///
/// The codec never stringifies: cells must already be strings or null.
///
/// # Errors
///
/// - `NullHeader` / `EmptyHeader` for a missing or empty header name
/// - `UnsupportedCellType` for a bool or integer cell
pub fn encode(table: &TabularData) -> Result<String> {
    let mut out = String::new();

    for (column, header) in table.iter_headers().enumerate() {
        let name = header.ok_or(Error::NullHeader { column })?;
        if name.is_empty() {
            return Err(Error::EmptyHeader);
        }
        if column > 0 {
            out.push(DELIMITER);
        }
        push_quoted(&mut out, name);
    }
    out.push(NEWLINE);

    for (row, cells) in table.iter_rows().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            if column > 0 {
                out.push(DELIMITER);
            }
            match cell {
                Value::Null => {}
                Value::String(s) => push_quoted(&mut out, s),
                other => {
                    return Err(Error::UnsupportedCellType {
                        row,
                        column,
                        kind: other.type_name().to_string(),
                    })
                }
            }
        }
        out.push(NEWLINE);
    }

    Ok(out)
}

fn push_quoted(out: &mut String, s: &str) {
    out.push(QUOTE);
    for c in s.chars() {
        if c == QUOTE {
            out.push(QUOTE);
        }
        out.push(c);
    }
    out.push(QUOTE);
}
