//! Core types for tablebridge
//!
//! This crate defines the data model shared by every other crate:
//! - Value: a single cell (null, bool, integer, string)
//! - TabularData: headers plus rows of cells, the unit of transfer
//! - RecordSchema / Record: statically declared persistable record types
//! - Row: an untyped result row
//! - Error: the error hierarchy for codec, schema and adapter failures

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod schema;
pub mod table;
pub mod value;

pub use error::{Error, Result};
pub use schema::{
    generate_uuid, FieldDescriptor, Record, RecordSchema, RecordValues, Row, SemanticType,
    UUID_COLUMN, UUID_FIELD, UUID_SIZE,
};
pub use table::TabularData;
pub use value::Value;
