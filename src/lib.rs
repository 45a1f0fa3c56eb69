//! tablebridge - move SQL query results between servers as CSV
//!
//! A server hosts the execute/save transfer protocol over one local database;
//! a client runs queries on it and upserts tables into it.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tablebridge::{ClientConfig, Executor, RemoteTransferClient, SqliteAdapter};
//!
//! // Server side: hand request bodies to an executor
//! let executor = Executor::new(Arc::new(SqliteAdapter::in_memory()));
//! assert_eq!(executor.handle("execute\nselect 1")?.into_body(), "\"1\"\n\"1\"\n");
//!
//! // Client side: talk to a running endpoint
//! let client = RemoteTransferClient::new(ClientConfig {
//!     endpoint: "http://127.0.0.1:8080/transfer".into(),
//!     timeout_ms: 30_000,
//! });
//! let table = client.execute("SELECT * FROM items")?;
//! ```
//!
//! # Architecture
//!
//! | Layer | Crate |
//! |-------|-------|
//! | Tabular data, values, record schemas | `tablebridge-core` |
//! | CSV wire grammar | `tablebridge-codec` |
//! | Persistence adapters, config | `tablebridge-engine` |
//! | Transfer protocol | `tablebridge-executor` |
//! | HTTP endpoint and client | `tablebridge-wire` |

pub use tablebridge_core::{
    generate_uuid, Error, FieldDescriptor, Record, RecordSchema, RecordValues, Result, Row,
    SemanticType, TabularData, Value, UUID_COLUMN, UUID_FIELD,
};

pub use tablebridge_codec::{decode, encode};

pub use tablebridge_engine::{
    ColumnInfo, EngineConfig, PersistenceAdapter, RecordStore, ServerConfig, SqliteAdapter,
};

pub use tablebridge_executor::{Command, Executor, Output};

pub use tablebridge_wire::{
    configure, pull_table, push_table, run_server, ClientConfig, ClientError,
    RemoteTransferClient,
};

/// Protocol-level errors, distinct from [`Error`].
pub use tablebridge_executor::Error as ProtocolError;
