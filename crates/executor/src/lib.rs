//! # tablebridge Executor
//!
//! The execute/save transfer protocol. A server hands each request body to an
//! [`Executor`], which parses it into a [`Command`], runs it against a
//! [`PersistenceAdapter`](tablebridge_engine::PersistenceAdapter) and returns
//! an [`Output`] to send back.
//!
//! ## Quick Start
//!
//! ```text
//! use std::sync::Arc;
//! use tablebridge_engine::SqliteAdapter;
//! use tablebridge_executor::Executor;
//!
//! let executor = Executor::new(Arc::new(SqliteAdapter::in_memory()));
//! let body = executor.handle("execute\nselect 1")?.into_body();
//! assert_eq!(body, "\"1\"\n\"1\"\n");
//! ```
//!
//! ## Actions
//!
//! | Action | Body | Output |
//! |--------|------|--------|
//! | `execute` | SQL | CSV of the result set, or empty for DML |
//! | `save` | table name, then CSV | empty |

#![warn(missing_docs)]

mod command;
mod error;
mod executor;
mod output;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

pub use command::{Command, EXECUTE, SAVE};
pub use error::Error;
pub use executor::Executor;
pub use output::Output;

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
