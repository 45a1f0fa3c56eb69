//! CSV text -> TabularData

use tablebridge_core::{Error, Result, TabularData, Value};

use crate::{count_quotes, DELIMITER, NEWLINE, QUOTE};

/// Parse CSV text into a table.
///
/// The first logical row becomes the headers; cells are raw strings or null,
/// with no type inference.
///
/// # Errors
///
/// - `MalformedInput` for empty text or an odd number of quote characters,
///   checked before any row is split
/// - `EmptyHeader` when the first logical row is blank
/// - `UnescapedCell` for a non-empty field not wrapped in quotes
/// - `RowCellCountMismatch` when a data row's field count differs from the
///   header's; `row` is the 0-based index among non-blank data rows
pub fn decode(csv: &str) -> Result<TabularData> {
    if csv.is_empty() {
        return Err(Error::malformed("csv text is empty"));
    }
    if count_quotes(csv) % 2 != 0 {
        return Err(Error::malformed("odd number of quote characters"));
    }

    let mut lines = logical_lines(csv).into_iter();

    let header_line = lines.next().unwrap_or_default();
    if header_line.is_empty() {
        return Err(Error::EmptyHeader);
    }
    let headers: Vec<Option<String>> = extract_fields(&header_line)?
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect();

    let mut rows = Vec::new();
    for line in lines.filter(|l| !l.is_empty()) {
        let cells = extract_fields(&line)?;
        if cells.len() != headers.len() {
            return Err(Error::RowCellCountMismatch {
                row: rows.len(),
                found: cells.len(),
                expected: headers.len(),
            });
        }
        rows.push(cells);
    }

    tracing::trace!(
        target: "tablebridge::codec",
        columns = headers.len(),
        rows = rows.len(),
        "decoded csv"
    );

    TabularData::from_parts(headers, rows)
}

/// Merge physical lines until quotes balance, trimming each logical line.
fn logical_lines(csv: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;
    let mut quotes = 0usize;

    for physical in csv.split(NEWLINE) {
        match current.as_mut() {
            Some(line) => {
                line.push(NEWLINE);
                line.push_str(physical);
            }
            None => current = Some(physical.to_string()),
        }
        quotes += count_quotes(physical);
        if quotes % 2 == 0 {
            if let Some(line) = current.take() {
                lines.push(line.trim().to_string());
            }
            quotes = 0;
        }
    }
    // Only reachable with unbalanced quotes, which decode rejects up front.
    if let Some(line) = current {
        lines.push(line.trim().to_string());
    }
    lines
}

/// Split one logical line into cells, keeping commas that sit inside quotes.
fn extract_fields(line: &str) -> Result<Vec<Value>> {
    let mut fields = Vec::new();
    let mut current: Option<String> = None;
    let mut quotes = 0usize;

    for piece in line.split(DELIMITER) {
        match current.as_mut() {
            Some(field) => {
                field.push(DELIMITER);
                field.push_str(piece);
            }
            None => current = Some(piece.to_string()),
        }
        quotes += count_quotes(piece);
        if quotes % 2 == 0 {
            if let Some(field) = current.take() {
                fields.push(unescape_field(&field)?);
            }
            quotes = 0;
        }
    }
    if let Some(field) = current {
        return Err(Error::UnescapedCell {
            cell: field.trim().to_string(),
        });
    }
    Ok(fields)
}

fn unescape_field(raw: &str) -> Result<Value> {
    let field = raw.trim();
    if field.is_empty() {
        return Ok(Value::Null);
    }
    if field.len() < 2 || !field.starts_with(QUOTE) || !field.ends_with(QUOTE) {
        return Err(Error::UnescapedCell {
            cell: field.to_string(),
        });
    }
    let inner = &field[1..field.len() - 1];
    Ok(Value::String(inner.replace("\"\"", "\"")))
}
