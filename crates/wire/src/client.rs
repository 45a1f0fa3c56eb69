//! Blocking client for a remote transfer endpoint.
//!
//! Provides:
//! - [`ClientConfig`] endpoint URL and whole-request timeout
//! - [`RemoteTransferClient`] with `execute` and `save`
//!
//! Each call is one synchronous HTTP POST; there are no retries.

use std::time::Duration;

use tablebridge_core::TabularData;
use tablebridge_engine::ClientDefaults;
use tablebridge_executor::Command;

use crate::{ClientError, Result};

/// Largest response body the client reads.
pub const MAX_RESPONSE_BYTES: u64 = 1 << 30;

const CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Where and how to reach a remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the transfer route, e.g. `http://host:8080/transfer`
    pub endpoint: String,
    /// Whole-request timeout
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Config for `endpoint` using the `[client]` defaults.
    pub fn from_defaults(endpoint: impl Into<String>, defaults: &ClientDefaults) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_ms: defaults.timeout_ms,
        }
    }
}

/// Client side of the transfer protocol.
pub struct RemoteTransferClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl RemoteTransferClient {
    /// Create a client; no connection is made until the first call.
    pub fn new(config: ClientConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_millis(config.timeout_ms)))
            .http_status_as_error(false)
            .build();
        Self {
            endpoint: config.endpoint,
            agent: ureq::Agent::new_with_config(agent_config),
        }
    }

    /// Endpoint URL this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `sql` on the remote.
    ///
    /// Returns `None` when the statement produced no result set.
    pub fn execute(&self, sql: &str) -> Result<Option<TabularData>> {
        let body = self.send(&Command::Execute {
            query: sql.to_string(),
        })?;
        if body.is_empty() {
            return Ok(None);
        }
        Ok(Some(tablebridge_codec::decode(&body)?))
    }

    /// Upsert `data` into `table` on the remote.
    pub fn save(&self, table: &str, data: &TabularData) -> Result<()> {
        self.send(&Command::Save {
            table: table.to_string(),
            data: data.clone(),
        })?;
        Ok(())
    }

    fn send(&self, cmd: &Command) -> Result<String> {
        let body = cmd.to_body()?;
        tracing::debug!(
            target: "tablebridge::wire::client",
            endpoint = %self.endpoint,
            action = cmd.action(),
            bytes = body.len(),
            "sending request"
        );

        let mut response = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", CONTENT_TYPE)
            .send(body.as_bytes())?;

        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_string()?;

        if !(200..300).contains(&status) {
            tracing::warn!(
                target: "tablebridge::wire::client",
                endpoint = %self.endpoint,
                status,
                "remote rejected request"
            );
            return Err(ClientError::Remote { status, body: text });
        }
        Ok(text)
    }
}
