//! Persistable record definitions
//!
//! Each record type declares a static [`RecordSchema`]: its table and an
//! ordered list of typed fields. Adapters read that declaration directly to
//! build statements and to cast raw rows back into records.
//!
//! Raw query results are [`Row`]s, ordered column/value lists. They stay
//! untyped until a caller asks for a specific [`Record`] type.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::value::Value;

/// Column name of the primary key every record carries.
pub const UUID_COLUMN: &str = "uuid";

/// Declared size of the `uuid` field.
pub const UUID_SIZE: usize = 40;

/// The reserved primary key field.
pub const UUID_FIELD: FieldDescriptor = FieldDescriptor {
    column: UUID_COLUMN,
    semantic_type: SemanticType::String,
    size: Some(UUID_SIZE),
};

/// Generate a fresh record key.
pub fn generate_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Logical type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    /// Boolean, stored as 0/1
    Bool,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// Text, optionally size-limited
    String,
}

impl SemanticType {
    /// Name as written in schema declarations
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Bool => "bool",
            SemanticType::Int => "int",
            SemanticType::Long => "long",
            SemanticType::String => "string",
        }
    }

    /// Cast a raw database value into this type.
    ///
    /// Null stays null. Booleans accept 0/1 integers and the strings
    /// `"0"`, `"1"`, `"true"`, `"false"`; integers accept decimal strings.
    pub fn cast(&self, column: &str, value: &Value) -> Result<Value> {
        let mismatch = || Error::TypeMismatch {
            column: column.to_string(),
            expected: self.as_str().to_string(),
            actual: format!("{:?}", value),
        };
        match (self, value) {
            (_, Value::Null) => Ok(Value::Null),

            (SemanticType::Bool, Value::Bool(b)) => Ok(Value::Bool(*b)),
            (SemanticType::Bool, Value::Int(i)) => Ok(Value::Bool(*i != 0)),
            (SemanticType::Bool, Value::String(s)) => match s.trim() {
                "1" | "true" => Ok(Value::Bool(true)),
                "0" | "false" => Ok(Value::Bool(false)),
                _ => Err(mismatch()),
            },

            (SemanticType::Int | SemanticType::Long, Value::Bool(b)) => Ok(Value::Int(*b as i64)),
            (SemanticType::Int, Value::Int(i)) => i32::try_from(*i)
                .map(|_| Value::Int(*i))
                .map_err(|_| mismatch()),
            (SemanticType::Long, Value::Int(i)) => Ok(Value::Int(*i)),
            (SemanticType::Int, Value::String(s)) => s
                .trim()
                .parse::<i32>()
                .map(|i| Value::Int(i as i64))
                .map_err(|_| mismatch()),
            (SemanticType::Long, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| mismatch()),

            (SemanticType::String, Value::String(s)) => Ok(Value::String(s.clone())),
            (SemanticType::String, Value::Int(i)) => Ok(Value::String(i.to_string())),
            (SemanticType::String, Value::Bool(b)) => {
                Ok(Value::String(if *b { "1" } else { "0" }.to_string()))
            }
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bool" => Ok(SemanticType::Bool),
            "int" => Ok(SemanticType::Int),
            "long" => Ok(SemanticType::Long),
            "string" => Ok(SemanticType::String),
            _ => Err(Error::UnknownSemanticType {
                name: s.to_string(),
            }),
        }
    }
}

/// One typed field of a record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Database column name
    pub column: &'static str,
    /// Logical type
    pub semantic_type: SemanticType,
    /// Maximum length for strings (None = unbounded)
    pub size: Option<usize>,
}

impl FieldDescriptor {
    /// Declare a field.
    pub const fn new(column: &'static str, semantic_type: SemanticType, size: Option<usize>) -> Self {
        Self {
            column,
            semantic_type,
            size,
        }
    }

    /// Check a value already cast to this field's type against its size.
    pub fn check(&self, value: &Value) -> Result<()> {
        if let (Some(size), Value::String(s)) = (self.size, value) {
            let actual = s.chars().count();
            if actual > size {
                return Err(Error::ValueTooLong {
                    column: self.column.to_string(),
                    size,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Statically declared table layout of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Table name
    pub table: &'static str,
    /// Ordered fields, including `uuid`
    pub fields: &'static [FieldDescriptor],
}

impl RecordSchema {
    /// Declare a schema.
    pub const fn new(table: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { table, fields }
    }

    /// A schema must name its table and carry the `uuid` key.
    pub fn validate(&self) -> Result<()> {
        if self.table.trim().is_empty() {
            return Err(Error::MissingTableName);
        }
        self.key_index()?;
        Ok(())
    }

    /// Position of the `uuid` field.
    pub fn key_index(&self) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.column == UUID_COLUMN)
            .ok_or_else(|| Error::MissingUuidField {
                table: self.table.to_string(),
            })
    }

    /// Field named `column`.
    pub fn field(&self, column: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.column == column)
    }

    /// Cast a raw row into field-ordered values.
    ///
    /// Columns absent from the row become null.
    pub fn cast_row(&self, row: &Row) -> Result<Vec<Value>> {
        self.fields
            .iter()
            .map(|field| match row.get(field.column) {
                Some(raw) => field.semantic_type.cast(field.column, raw),
                None => Ok(Value::Null),
            })
            .collect()
    }

    /// Cast and size-check the values a record wants to persist.
    pub fn prepare_values(&self, values: &[Value]) -> Result<Vec<Value>> {
        if values.len() != self.fields.len() {
            return Err(Error::RowCellCountMismatch {
                row: 0,
                found: values.len(),
                expected: self.fields.len(),
            });
        }
        self.fields
            .iter()
            .zip(values)
            .map(|(field, value)| {
                let cast = field.semantic_type.cast(field.column, value)?;
                field.check(&cast)?;
                Ok(cast)
            })
            .collect()
    }
}

/// Untyped result row: ordered column/value pairs.
///
/// Duplicate column names are kept; lookups by name return the first match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

impl Row {
    /// Empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column
    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.entries.push((column.into(), value));
    }

    /// First value under `column`
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the row has no columns
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate column/value pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Values in column order
    pub fn into_values(self) -> Vec<Value> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A typed entity persisted through a [`RecordSchema`].
///
/// Implementors generate their `uuid` with [`generate_uuid`] when constructed
/// without one.
pub trait Record: Sized {
    /// Table layout of this record type
    fn schema() -> &'static RecordSchema;

    /// Primary key
    fn uuid(&self) -> &str;

    /// Field values, ordered like `schema().fields`
    fn to_values(&self) -> Vec<Value>;

    /// Rebuild from field-ordered values already cast to their semantic types
    fn from_values(values: Vec<Value>) -> Result<Self>;
}

/// Sequential reader over the values handed to [`Record::from_values`].
pub struct RecordValues {
    schema: &'static RecordSchema,
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl RecordValues {
    /// Wrap field-ordered values
    pub fn new(schema: &'static RecordSchema, values: Vec<Value>) -> Self {
        Self {
            schema,
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Take the next value; running past the schema's fields or past the
    /// supplied values is a `TypeMismatch`.
    fn next_value(&mut self, expected: &str) -> Result<(String, Value)> {
        let position = self.position;
        self.position += 1;
        let column = match self.schema.fields.get(position) {
            Some(field) => field.column.to_string(),
            None => {
                return Err(Error::TypeMismatch {
                    column: format!("#{}", position),
                    expected: expected.into(),
                    actual: "no such field".into(),
                })
            }
        };
        match self.values.next() {
            Some(value) => Ok((column, value)),
            None => Err(Error::TypeMismatch {
                column,
                expected: expected.into(),
                actual: "missing".into(),
            }),
        }
    }

    /// Next field as an optional string
    pub fn next_string(&mut self) -> Result<Option<String>> {
        match self.next_value("string")? {
            (_, Value::Null) => Ok(None),
            (_, Value::String(s)) => Ok(Some(s)),
            (column, other) => Err(Error::TypeMismatch {
                column,
                expected: "string".into(),
                actual: other.type_name().into(),
            }),
        }
    }

    /// Next field as an optional bool
    pub fn next_bool(&mut self) -> Result<Option<bool>> {
        match self.next_value("bool")? {
            (_, Value::Null) => Ok(None),
            (_, Value::Bool(b)) => Ok(Some(b)),
            (column, other) => Err(Error::TypeMismatch {
                column,
                expected: "bool".into(),
                actual: other.type_name().into(),
            }),
        }
    }

    /// Next field as an optional integer
    pub fn next_int(&mut self) -> Result<Option<i64>> {
        match self.next_value("int")? {
            (_, Value::Null) => Ok(None),
            (_, Value::Int(i)) => Ok(Some(i)),
            (column, other) => Err(Error::TypeMismatch {
                column,
                expected: "int".into(),
                actual: other.type_name().into(),
            }),
        }
    }
}
