//! Persistence layer for tablebridge
//!
//! This crate owns everything that touches a database:
//! - [`PersistenceAdapter`]: the vendor-neutral contract the transfer protocol runs on
//! - [`SqliteAdapter`]: the reference implementation
//! - [`RecordStore`]: typed record CRUD and additive schema management
//! - [`EngineConfig`]: `tablebridge.toml`
//!
//! Dialect-independent pieces (name sanitizing, stringification, cell typing)
//! live in [`common`] so every adapter produces identical wire data.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod common;
pub mod config;
pub mod records;
pub mod sqlite;

pub use adapter::{ColumnInfo, PersistenceAdapter};
pub use config::{
    ClientDefaults, DatabaseConfig, EngineConfig, LoggingConfig, ServerConfig, CONFIG_FILE_NAME,
};
pub use records::RecordStore;
pub use sqlite::SqliteAdapter;
