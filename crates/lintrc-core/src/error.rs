//! Error types for configuration loading and resolution

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lintrc operations
#[derive(Debug, Error)]
pub enum LintrcError {
    /// A preset named in `extends` could not be resolved
    #[error("Cannot resolve preset '{preset}': {message}")]
    ResolutionError { preset: String, message: String },

    /// A recognized field holds a structurally invalid value
    #[error("Invalid value at '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// The document is not valid JSON, YAML or TOML
    #[error("Cannot parse '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    /// Configuration discovery or loading errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Resolution,
    Validation,
    Parse,
    Config,
    Io,
}

impl LintrcError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LintrcError::ResolutionError { .. } => ErrorKind::Resolution,
            LintrcError::ValidationError { .. } => ErrorKind::Validation,
            LintrcError::ParseError { .. } => ErrorKind::Parse,
            LintrcError::ConfigError { .. } => ErrorKind::Config,
            LintrcError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Create a resolution error for a preset
    pub fn resolution_error(preset: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResolutionError {
            preset: preset.into(),
            message: message.into(),
        }
    }

    /// Create a validation error at a key path
    pub fn validation_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a parse error for a file
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for LintrcError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}
