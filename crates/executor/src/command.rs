//! Transfer protocol requests.
//!
//! A request body is plain text whose first line names the action:
//!
//! ```text
//! execute
//! <SQL, one or more lines, forwarded verbatim>
//! ```
//!
//! ```text
//! save
//! <table name>
//! <CSV payload, header row first>
//! ```

use tablebridge_core::TabularData;

use crate::{Error, Result};

/// Action token for remote query execution
pub const EXECUTE: &str = "execute";
/// Action token for remote table upsert
pub const SAVE: &str = "save";

/// A parsed transfer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a statement and return its result set as CSV.
    Execute {
        /// SQL text, possibly spanning several lines
        query: String,
    },
    /// Upsert rows into a table keyed by its primary key.
    Save {
        /// Target table name, trimmed but not yet sanitized
        table: String,
        /// Decoded rows
        data: TabularData,
    },
}

impl Command {
    /// Parse a request body.
    ///
    /// The action token and the table name are trimmed so `\r\n` line endings
    /// are accepted; the SQL and the CSV payload are passed on as they are.
    ///
    /// # Errors
    ///
    /// - `MissingSecondLine` when the body has a single line
    /// - `UnknownAction` when the first line is neither `execute` nor `save`
    /// - `MissingThirdLine` for a `save` without payload
    /// - codec errors from decoding the payload
    pub fn parse(body: &str) -> Result<Self> {
        let (action, rest) = body.split_once('\n').ok_or(Error::MissingSecondLine)?;
        match action.trim() {
            EXECUTE => Ok(Command::Execute {
                query: rest.to_string(),
            }),
            SAVE => {
                let (table, csv) = rest.split_once('\n').ok_or(Error::MissingThirdLine)?;
                let data = tablebridge_codec::decode(csv)?;
                Ok(Command::Save {
                    table: table.trim().to_string(),
                    data,
                })
            }
            other => Err(Error::UnknownAction {
                action: other.to_string(),
            }),
        }
    }

    /// Render the request body this command parses from.
    ///
    /// # Errors
    ///
    /// Codec errors when a `Save` payload cannot be encoded.
    pub fn to_body(&self) -> Result<String> {
        match self {
            Command::Execute { query } => Ok(format!("{}\n{}", EXECUTE, query)),
            Command::Save { table, data } => Ok(format!(
                "{}\n{}\n{}",
                SAVE,
                table,
                tablebridge_codec::encode(data)?
            )),
        }
    }

    /// Action token of this command.
    pub fn action(&self) -> &'static str {
        match self {
            Command::Execute { .. } => EXECUTE,
            Command::Save { .. } => SAVE,
        }
    }
}
