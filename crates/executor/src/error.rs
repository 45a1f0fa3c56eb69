//! Error types for protocol handling.
//!
//! Protocol errors (a request body that is not a well-formed `execute` or
//! `save` request) have their own variants; everything raised below the
//! protocol (codec, adapter, database) passes through unchanged as
//! [`Error::Core`].
//!
//! # Categories
//!
//! | Category | Variants | Description |
//! |----------|----------|-------------|
//! | Protocol | `MissingSecondLine`, `MissingThirdLine`, `UnknownAction` | Malformed request body |
//! | Downstream | `Core` | Codec, schema, statement-shape and database errors |

/// Transfer protocol errors.
///
/// # Example
///
/// ```ignore
/// use tablebridge_executor::{Error, Executor};
///
/// match executor.handle(body) {
///     Ok(output) => { /* send output.into_body() */ }
///     Err(Error::UnknownAction { action }) => {
///         println!("unsupported action '{}'", action);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // ==================== Protocol ====================
    /// Request body is a single line
    #[error("request has no second line")]
    MissingSecondLine,

    /// `save` request without a CSV payload line
    #[error("save request has no third line")]
    MissingThirdLine,

    /// First line is neither `execute` nor `save`
    #[error("unknown action: {action}")]
    UnknownAction {
        /// The rejected token
        action: String,
    },

    // ==================== Downstream ====================
    /// Codec, adapter or database failure
    #[error(transparent)]
    Core(#[from] tablebridge_core::Error),
}
