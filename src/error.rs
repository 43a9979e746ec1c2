//! Unified error handling for the athletics-mcp crate
//!
//! This module provides a unified error type that consolidates the
//! domain-specific errors into a single `Error` enum.
//!
//! # Architecture
//!
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! Extraction mismatches never surface here: missing DOM elements degrade
//! to empty values inside the parser.

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::utils::error::FetchError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout)
    Network,
    /// Serialization errors
    Parsing,
    /// Stdio transport I/O errors
    Io,
    /// Configuration and validation errors
    Config,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Io => "io",
            Self::Config => "config",
        }
    }
}

/// Unified error type for the athletics-mcp crate
#[derive(Error, Debug)]
pub enum Error {
    /// Page load errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this error is transient
    ///
    /// Nothing in the crate retries; the flag is reported to callers so they
    /// can decide for themselves.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Io(_) => true,
            Self::Json(_) | Self::Config(_) => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(_) => ErrorCategory::Network,
            Self::Io(_) => ErrorCategory::Io,
            Self::Json(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
