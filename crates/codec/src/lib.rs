//! CSV wire grammar for [`TabularData`]
//!
//! This grammar is what travels between servers, so both directions must stay
//! byte-compatible with it:
//!
//! - fields are separated by `,` and rows by `\n` (`\r\n` is tolerated)
//! - every field, headers included, is wrapped in `"`; an embedded `"` is
//!   written as `""`
//! - a field may span physical lines: a row continues until its quotes balance
//! - an empty field (nothing between delimiters) is null, while `""` is the
//!   empty string
//! - whitespace outside a field's quotes is ignored
//! - the first row holds the headers; blank rows after it are skipped
//!
//! ```text
//! "id","note"
//! "1","said ""hi"""
//! "2",
//! "3","two
//! lines"
//! ```

#![warn(missing_docs)]

mod decode;
mod encode;

pub use decode::decode;
pub use encode::encode;

pub use tablebridge_core::{Error, Result, TabularData};

/// Field delimiter
pub const DELIMITER: char = ',';
/// Quote character
pub const QUOTE: char = '"';
/// Row delimiter
pub const NEWLINE: char = '\n';

fn count_quotes(s: &str) -> usize {
    s.matches(QUOTE).count()
}
