//! Client-side transfer errors.

use std::fmt;

/// Failures of a remote transfer, from transport up to the local database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The remote answered with a non-2xx status
    #[error("remote returned {status}: {body}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Response body, usually the remote error message
        body: String,
    },

    /// The remote could not be reached or the exchange broke off
    #[error("remote unreachable: {reason}")]
    Unreachable {
        /// Transport error message
        reason: String,
    },

    /// The request exceeded its timeout
    #[error("request timed out")]
    Timeout,

    /// A payload could not be encoded or decoded
    #[error(transparent)]
    Codec(#[from] tablebridge_core::Error),

    /// The local side of a table sync failed
    #[error("local database: {0}")]
    Local(tablebridge_core::Error),
}

impl ClientError {
    pub(crate) fn unreachable(reason: impl fmt::Display) -> Self {
        ClientError::Unreachable {
            reason: reason.to_string(),
        }
    }
}

impl From<ureq::Error> for ClientError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Timeout(_) => ClientError::Timeout,
            other => ClientError::unreachable(other),
        }
    }
}

impl From<tablebridge_executor::Error> for ClientError {
    fn from(e: tablebridge_executor::Error) -> Self {
        match e {
            tablebridge_executor::Error::Core(core) => ClientError::Codec(core),
            other => ClientError::Codec(tablebridge_core::Error::malformed(other.to_string())),
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
