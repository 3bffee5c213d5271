//! # error
//!
//! Boundary error type.
//!
//! The decision core never fails: missing or malformed market data always
//! resolves to a NO_TRADE / WAIT decision.  [`EngineError`] only exists at the
//! edges, where feed files are read and raw records are validated into typed
//! ones.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Feed file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Feed file is not valid JSON or does not match the expected schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally valid input that violates a record invariant.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value could not be interpreted.
    #[error("Config error: {0}")]
    Config(String),
}
