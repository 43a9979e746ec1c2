//! Error types for tool invocation

use thiserror::Error;

use crate::error::Error;

/// JSON-RPC error code: request body is not valid JSON
pub const PARSE_ERROR: i64 = -32700;
/// JSON-RPC error code: valid JSON that is not a request object
pub const INVALID_REQUEST: i64 = -32600;
/// JSON-RPC error code: unknown method or unknown tool
pub const METHOD_NOT_FOUND: i64 = -32601;
/// JSON-RPC error code: missing or mistyped argument
pub const INVALID_PARAMS: i64 = -32602;
/// JSON-RPC error code: the tool failed while running
pub const INTERNAL_ERROR: i64 = -32603;

/// Result type for tool operations
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Errors raised while resolving or running a tool call
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error(transparent)]
    Execution(#[from] Error),
}

impl ToolError {
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// JSON-RPC error code for this error
    pub fn code(&self) -> i64 {
        match self {
            Self::UnknownMethod(_) | Self::UnknownTool(_) => METHOD_NOT_FOUND,
            Self::MissingArgument(_) | Self::InvalidArgument { .. } => INVALID_PARAMS,
            Self::Execution(_) => INTERNAL_ERROR,
        }
    }

    /// Whether the caller, not the site, is at fault
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Execution(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FetchError;

    #[test]
    fn test_error_codes() {
        assert_eq!(ToolError::UnknownMethod("x".into()).code(), -32601);
        assert_eq!(ToolError::UnknownTool("x".into()).code(), -32601);
        assert_eq!(ToolError::MissingArgument("sport".into()).code(), -32602);
        assert_eq!(ToolError::invalid_argument("limit", "expected a number").code(), -32602);

        let exec = ToolError::from(Error::from(FetchError::InvalidUrl("bad".into())));
        assert_eq!(exec.code(), -32603);
        assert!(!exec.is_client_error());
    }

    #[test]
    fn test_client_errors() {
        assert!(ToolError::UnknownTool("get_weather".into()).is_client_error());
        assert!(ToolError::MissingArgument("sport".into()).is_client_error());
        assert!(ToolError::invalid_argument("limit", "expected a number").is_client_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ToolError::UnknownTool("get_weather".into()).to_string(),
            "Unknown tool: get_weather"
        );
        assert_eq!(
            ToolError::MissingArgument("sport".into()).to_string(),
            "Missing required argument: sport"
        );
    }

    #[test]
    fn test_execution_keeps_underlying_message() {
        let fetch = FetchError::Timeout {
            url: "https://gobuffsgo.com/sports/football/roster".into(),
            secs: 30,
        };
        let err = ToolError::from(Error::from(fetch));
        assert!(err.to_string().contains("Navigation timeout of 30s exceeded"));
    }
}
