//! HTTP transport for the tablebridge transfer protocol
//!
//! - [`server`]: actix-web route that hands request bodies to an
//!   [`Executor`](tablebridge_executor::Executor)
//! - [`RemoteTransferClient`]: blocking `ureq` client for a remote route
//! - [`pull_table`] / [`push_table`]: whole-table copies built on both

#![warn(missing_docs)]

mod client;
mod error;
pub mod server;
mod sync;

pub use client::{ClientConfig, RemoteTransferClient, MAX_RESPONSE_BYTES};
pub use error::{ClientError, Result};
pub use server::{configure, run_server};
pub use sync::{pull_table, push_table};
