//! Error types for Lookout operations.
//!
//! This module defines [`LookoutError`], the error enum shared by the core
//! crate. Errors are designed for visibility: no silent failures, clear
//! actionable messages surfaced to the user.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`LookoutError`].
pub type Result<T> = std::result::Result<T, LookoutError>;

/// Error type for core Lookout operations.
#[derive(Debug, Error)]
pub enum LookoutError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration file not found
    #[error("Configuration not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file is invalid YAML
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Generic I/O error with context
    #[error("I/O error {operation}: {path}")]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory creation failed
    #[error("Failed to create directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Fetch/Sync Errors
    // =========================================================================
    /// A remote fetch failed; carries the one-line message shown to the user
    #[error("Fetch failed for {source_name}: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },

    /// A polling source was used after deactivation
    #[error("Polling source {source_name} is no longer active")]
    SourceDetached { source_name: String },

    // =========================================================================
    // TUI Errors
    // =========================================================================
    /// Terminal initialization failed
    #[error("Terminal initialization failed: {message}")]
    TerminalInit { message: String },

    /// Terminal restore failed
    #[error("Failed to restore terminal: {message}")]
    TerminalRestore { message: String },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal error (bug in Lookout)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl LookoutError {
    /// Create a ConfigNotFound error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound {
            path: path.into(),
            source: None,
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a fetch error
    pub fn fetch(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is recoverable (retry can succeed).
    ///
    /// Fetch failures are always transient at this layer: the next poll tick
    /// or a manual retry re-enters the same flow.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::SourceDetached { .. })
    }

    /// Returns true if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. } | Self::ConfigInvalid { .. } | Self::ConfigValidation { .. }
        )
    }

    /// Returns actionable guidance for the user
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound { .. } => {
                Some("Create ~/.lookout/config.yaml or pass --base-url on the command line")
            }
            Self::ConfigInvalid { .. } => Some("Check YAML syntax in ~/.lookout/config.yaml"),
            Self::Fetch { .. } => Some("Check network connectivity; the next poll will retry"),
            Self::TerminalInit { .. } => Some("Try running in a different terminal"),
            _ => None,
        }
    }
}
