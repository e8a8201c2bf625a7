//! Error types for agriweb-core
//!
//! Every failure the controller can meet while talking to the records API,
//! with stable codes for logging and severities for choosing a log level.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request never completed
    Transport,
    /// Server answered with a non-success status
    HttpStatus,
    /// Response body could not be decoded
    InvalidResponse,
    /// Resource name is not one of the four known pages
    UnknownResource,
    /// No rendered row carries the requested id
    RecordNotFound,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::Transport => write!(f, "TRANSPORT"),
            ErrorCode::HttpStatus => write!(f, "HTTP_STATUS"),
            ErrorCode::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            ErrorCode::UnknownResource => write!(f, "UNKNOWN_RESOURCE"),
            ErrorCode::RecordNotFound => write!(f, "RECORD_NOT_FOUND"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for agriweb-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("{message}")]
    Transport { message: String },

    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Unknown resource type: {name}")]
    UnknownResource { name: String },

    #[error("Record not found: {id}")]
    RecordNotFound { id: i64 },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Transport { .. } => ErrorCode::Transport,
            CoreError::HttpStatus { .. } => ErrorCode::HttpStatus,
            CoreError::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            CoreError::UnknownResource { .. } => ErrorCode::UnknownResource,
            CoreError::RecordNotFound { .. } => ErrorCode::RecordNotFound,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Transport { .. } => ErrorSeverity::Error,
            CoreError::HttpStatus { status } if *status >= 500 => ErrorSeverity::Error,
            CoreError::HttpStatus { .. } => ErrorSeverity::Warning,
            CoreError::InvalidResponse { .. } => ErrorSeverity::Error,
            CoreError::UnknownResource { .. } => ErrorSeverity::Warning,
            CoreError::RecordNotFound { .. } => ErrorSeverity::Info,
        }
    }

    /// Log this error at the level its severity calls for
    pub fn log(&self, operation: &str) {
        match self.severity() {
            ErrorSeverity::Info => log::info!(target: "agriweb::error", "[{}] {} - {}", self.code(), operation, self),
            ErrorSeverity::Warning => log::warn!(target: "agriweb::error", "[{}] {} - {}", self.code(), operation, self),
            ErrorSeverity::Error => log::error!(target: "agriweb::error", "[{}] {} - {}", self.code(), operation, self),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
