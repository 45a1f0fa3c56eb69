//! Helpers shared by every adapter implementation
//!
//! - Identifier sanitizing and quoting
//! - Literal escaping for ANSI-style string literals
//! - Uniform stringification of native cell values for `get_data_table`
//! - Cell classification for statement parameters
//! - Semantic type -> SQL type mapping and the additive schema diff

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tablebridge_core::{Error, FieldDescriptor, RecordSchema, Result, SemanticType, Value};

use crate::adapter::ColumnInfo;

/// Output format for date/time cells on the wire.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TIMESTAMP_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ============================================================================
// Identifiers and literals
// ============================================================================

/// Strip whitespace, quotes, backticks and semicolons from a table or column name.
///
/// # Errors
///
/// `InvalidName` when nothing is left.
pub fn sanitize_identifier(name: &str) -> Result<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '"' | '\'' | '`' | ';'))
        .collect();
    if cleaned.is_empty() {
        return Err(Error::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(cleaned)
}

/// Sanitize and double-quote an identifier.
pub fn quote_identifier(name: &str) -> Result<String> {
    Ok(format!("\"{}\"", sanitize_identifier(name)?))
}

/// Render a value as an ANSI SQL literal.
///
/// Strings are single-quoted with embedded quotes doubled; dialects without
/// backslash escapes need nothing more.
pub fn escape_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
        Value::Int(i) => i.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

// ============================================================================
// Stringification
// ============================================================================

/// A cell as the driver reported it, before wire stringification.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue<'a> {
    /// SQL NULL
    Null,
    /// Boolean column value
    Bool(bool),
    /// Integer
    Integer(i64),
    /// Floating point
    Real(f64),
    /// Text
    Text(&'a str),
    /// Date/time
    Timestamp(NaiveDateTime),
}

/// Convert a native value into its wire string (or null).
///
/// Two engines holding the same logical content must produce identical
/// strings, so every adapter funnels its result cells through here.
pub fn stringify(value: NativeValue<'_>) -> Value {
    match value {
        NativeValue::Null => Value::Null,
        NativeValue::Bool(b) => Value::String(if b { "1" } else { "0" }.to_string()),
        NativeValue::Integer(i) => Value::String(i.to_string()),
        NativeValue::Real(f) => Value::String(f.to_string()),
        NativeValue::Text(s) => Value::String(s.to_string()),
        NativeValue::Timestamp(dt) => Value::String(format_timestamp(&dt)),
    }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse the date/time text forms databases commonly store.
///
/// A bare date is read as midnight.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    TIMESTAMP_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Timestamp for a unix epoch in seconds.
pub fn timestamp_from_epoch(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

/// How a declared column type affects stringification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// BOOL / BOOLEAN / BIT columns
    Boolean,
    /// DATE / TIME / DATETIME / TIMESTAMP columns
    Temporal,
    /// Anything else
    Other,
}

impl ColumnKind {
    /// Classify a declared column type.
    pub fn from_declared(declared: Option<&str>) -> Self {
        let Some(declared) = declared else {
            return ColumnKind::Other;
        };
        let upper = declared.to_ascii_uppercase();
        if upper.contains("BOOL") || upper == "BIT" {
            ColumnKind::Boolean
        } else if upper.contains("DATE") || upper.contains("TIME") {
            ColumnKind::Temporal
        } else {
            ColumnKind::Other
        }
    }
}

// ============================================================================
// Parameter binding
// ============================================================================

/// A cell typed for binding into a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    /// SQL NULL
    Null,
    /// Integer parameter
    Integer(i64),
    /// Text parameter
    Text(String),
}

/// Type a cell by inspection.
///
/// Booleans bind as 0/1, strings holding a canonical integer bind as integers
/// (`"007"` stays text), everything else binds as text.
pub fn classify_cell(value: &Value) -> BindValue {
    match value {
        Value::Null => BindValue::Null,
        Value::Bool(b) => BindValue::Integer(*b as i64),
        Value::Int(i) => BindValue::Integer(*i),
        Value::String(s) => match s.parse::<i64>() {
            Ok(i) if i.to_string() == *s => BindValue::Integer(i),
            _ => BindValue::Text(s.clone()),
        },
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Default SQL column type for a field.
pub fn sql_type(field: &FieldDescriptor) -> String {
    match field.semantic_type {
        SemanticType::Bool => "BOOLEAN".to_string(),
        SemanticType::Int => "INTEGER".to_string(),
        SemanticType::Long => "BIGINT".to_string(),
        SemanticType::String => match field.size {
            Some(size) => format!("VARCHAR({})", size),
            None => "TEXT".to_string(),
        },
    }
}

fn normalize_type(declared: &str) -> String {
    declared
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Fields of `schema` missing from an existing table.
///
/// Column names compare case-insensitively.
///
/// # Errors
///
/// `NoColumnTypeChange` when a column exists with a different declared type;
/// existing columns are never altered.
pub fn missing_fields<'s>(
    schema: &'s RecordSchema,
    existing: &[ColumnInfo],
    sql_type: impl Fn(&FieldDescriptor) -> String,
) -> Result<Vec<&'s FieldDescriptor>> {
    let mut missing = Vec::new();
    for field in schema.fields {
        let declared = sql_type(field);
        match existing
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(field.column))
        {
            Some(column) if normalize_type(&column.declared_type) != normalize_type(&declared) => {
                return Err(Error::NoColumnTypeChange {
                    table: schema.table.to_string(),
                    column: field.column.to_string(),
                    existing: column.declared_type.clone(),
                    declared,
                });
            }
            Some(_) => {}
            None => missing.push(field),
        }
    }
    Ok(missing)
}
