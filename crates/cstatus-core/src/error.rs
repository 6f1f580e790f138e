//! Error types for cstatus
//!
//! This module defines the error types used throughout the cstatus crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! Note that transcript problems never surface here: the metrics facade
//! absorbs them and reports empty metrics instead. These errors cover the
//! glue around it (stdin, arguments, the settings file).
//!
//! # Example
//!
//! ```
//! use cstatus_core::error::{CstatusError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to CstatusError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cstatus operations
#[derive(Error, Debug)]
pub enum CstatusError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing arrived on stdin
    #[error("no input received")]
    NoInput,

    /// Invalid input from the host application
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unknown widget name in the widget list
    #[error("Unknown widget: {0}")]
    UnknownWidget(String),

    /// Settings file could not be updated
    #[error("Settings error in {file}: {error}")]
    Settings {
        /// The settings file involved
        file: PathBuf,
        /// The error message
        error: String,
    },
}

/// Convenience type alias for Results in cstatus
///
/// # Example
///
/// ```
/// use cstatus_core::Result;
///
/// fn render() -> Result<String> {
///     Ok("statusline".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CstatusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(CstatusError::NoInput.to_string(), "no input received");
        assert_eq!(
            CstatusError::UnknownWidget("clock".to_string()).to_string(),
            "Unknown widget: clock"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: CstatusError = io_error.into();
        assert!(matches!(error, CstatusError::Io(_)));
    }

    #[test]
    fn test_settings_error_display() {
        let error = CstatusError::Settings {
            file: PathBuf::from("/tmp/settings.json"),
            error: "top-level value is not an object".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Settings error in /tmp/settings.json: top-level value is not an object"
        );
    }
}
