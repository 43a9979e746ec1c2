//! Error types for page fetching
//!
//! This module defines the low-level error types raised while loading pages
//! from the athletics site.

use thiserror::Error;

/// Errors that can occur while loading a page
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport error (DNS, connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Navigation did not settle within the configured budget
    #[error("Navigation timeout of {secs}s exceeded for {url}")]
    Timeout { url: String, secs: u64 },

    /// Target URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Page session could not be opened
    #[error("Failed to open page session: {0}")]
    ClientBuild(String),
}

impl FetchError {
    /// Timeouts and transport failures are transient, malformed URLs are not
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Timeout { .. } => true,
            Self::InvalidUrl(_) | Self::ClientBuild(_) => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }
}
