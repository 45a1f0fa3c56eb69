//! Command handlers.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `execute` | `Execute` |
//! | `save` | `Save` |

pub mod execute;
pub mod save;
