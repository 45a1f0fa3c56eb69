//! The Executor - single entry point to the transfer protocol.
//!
//! The Executor is a stateless dispatcher that routes parsed requests to the
//! handlers, which run them against a persistence adapter.

use std::sync::Arc;

use tablebridge_engine::PersistenceAdapter;

use crate::handlers;
use crate::{Command, Output, Result};

/// The command executor.
///
/// The Executor is **stateless**: it holds a handle to the adapter but keeps
/// no state of its own, so requests never see each other beyond what the
/// database itself records.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across request threads; the
/// adapter serializes access to its connection.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use tablebridge_engine::SqliteAdapter;
/// use tablebridge_executor::{Executor, Output};
///
/// let executor = Executor::new(Arc::new(SqliteAdapter::in_memory()));
/// let output = executor.handle("execute\nselect 1")?;
/// assert_eq!(output, Output::Table("\"1\"\n\"1\"\n".into()));
/// ```
#[derive(Clone)]
pub struct Executor {
    adapter: Arc<dyn PersistenceAdapter>,
}

impl Executor {
    /// Create a new executor over an adapter.
    pub fn new(adapter: Arc<dyn PersistenceAdapter>) -> Self {
        Self { adapter }
    }

    /// The adapter requests run against.
    pub fn adapter(&self) -> &Arc<dyn PersistenceAdapter> {
        &self.adapter
    }

    /// Execute a single command.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        tracing::debug!(
            target: "tablebridge::executor",
            action = cmd.action(),
            dialect = self.adapter.dialect(),
            "executing command"
        );
        match cmd {
            Command::Execute { query } => handlers::execute::execute_query(&*self.adapter, &query),
            Command::Save { table, data } => {
                handlers::save::save_table(&*self.adapter, &table, &data)
            }
        }
    }

    /// Parse a request body and execute it.
    pub fn handle(&self, body: &str) -> Result<Output> {
        let cmd = Command::parse(body)?;
        self.execute(cmd)
    }
}
