//! Transfer Tests
//!
//! End-to-end tests across the tablebridge crates:
//! - CSV grammar laws on the public codec
//! - the execute/save protocol against a SQLite adapter
//! - a live HTTP endpoint driven by the remote client and the sync helpers

mod common;

mod codec_laws;
mod endpoint;
mod protocol;
