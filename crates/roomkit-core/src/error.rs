//! Error handling for RoomKit
//!
//! The geometry core itself never fails: invalid edits clamp or become
//! no-ops. Errors only arise at the edges of the system, when text is parsed
//! into typed values (grid steps, unit types, canvas keys) or when data is
//! read from or written to disk.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for RoomKit
#[derive(Error, Debug)]
pub enum Error {
    /// Grid step is not one of the supported millimetre steps
    #[error("Invalid grid step {0} mm (expected 10, 25, 50, 100 or 200)")]
    InvalidGridStep(u32),

    /// Unit type name could not be parsed
    #[error("Unknown unit type: {0}")]
    UnknownUnitType(String),

    /// Canvas key text is malformed
    #[error("Invalid canvas key '{key}': {reason}")]
    InvalidCanvasKey {
        /// The text that failed to parse.
        key: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Length text could not be parsed
    #[error("Invalid length '{0}'")]
    InvalidLength(String),

    /// Floor-plan scale is zero, negative or not finite
    #[error("Invalid scale {0} mm/px: must be a positive number")]
    InvalidScale(f64),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error came from parsing user-supplied text
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidGridStep(_)
                | Error::UnknownUnitType(_)
                | Error::InvalidCanvasKey { .. }
                | Error::InvalidLength(_)
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
