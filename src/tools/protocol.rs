//! JSON-RPC 2.0 request handling for the tool protocol
//!
//! Two transports share this handler and differ only in how a failing tool
//! call is reported. Over HTTP it becomes a JSON-RPC error object. Over stdio
//! it becomes a successful result flagged with `isError`, so the client can
//! show the message to the model.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::dispatch::ToolDispatcher;
use super::error::{ToolError, INVALID_REQUEST, PARSE_ERROR};

/// Protocol version announced by `initialize`
pub const PROTOCOL_VERSION: &str = "0.1.0";

/// Server name announced by `initialize`
pub const SERVER_NAME: &str = "athletics-mcp";

/// Incoming JSON-RPC request or notification
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Absent for notifications
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl RpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Outgoing JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }

    /// Response for a body that is not valid JSON-RPC
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::error(Value::Null, PARSE_ERROR, message)
    }

    /// Response for a message that could not be decoded as a request
    ///
    /// Malformed JSON is a parse error; well-formed JSON of the wrong shape
    /// is an invalid request.
    pub fn decode_error(err: &serde_json::Error) -> Self {
        let code = if err.is_syntax() || err.is_eof() {
            PARSE_ERROR
        } else {
            INVALID_REQUEST
        };
        Self::error(Value::Null, code, err.to_string())
    }

    pub fn error_code(&self) -> Option<i64> {
        self.error.as_ref().map(|e| e.code)
    }
}

/// How failed tool calls are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStyle {
    /// JSON-RPC error object
    RpcError,
    /// Successful result with `isError: true`
    ToolResult,
}

/// Method router for the tool protocol
#[derive(Clone)]
pub struct ProtocolHandler {
    dispatcher: ToolDispatcher,
    style: ErrorStyle,
}

impl ProtocolHandler {
    pub fn new(dispatcher: ToolDispatcher, style: ErrorStyle) -> Self {
        Self { dispatcher, style }
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    /// Handle one request and build its response
    pub async fn handle(&self, request: RpcRequest) -> RpcResponse {
        let id = request.id.clone().unwrap_or(Value::Null);

        match self.route(&request).await {
            Ok(result) => RpcResponse::success(id, result),
            Err(e) => {
                if e.is_client_error() {
                    tracing::debug!(method = %request.method, error = %e, "Request rejected");
                } else {
                    tracing::error!(method = %request.method, error = %e, "Request failed");
                }
                RpcResponse::error(id, e.code(), e.to_string())
            }
        }
    }

    async fn route(&self, request: &RpcRequest) -> Result<Value, ToolError> {
        match request.method.as_str() {
            "initialize" => Ok(initialize_result()),
            "tools/list" => Ok(json!({ "tools": self.dispatcher.list() })),
            "tools/call" => self.call_tool(request.params.as_ref()).await,
            other => Err(ToolError::UnknownMethod(other.to_string())),
        }
    }

    async fn call_tool(&self, params: Option<&Value>) -> Result<Value, ToolError> {
        let params = params.cloned().unwrap_or(Value::Null);
        let name = match params.get("name") {
            Some(Value::String(name)) => name.as_str(),
            Some(_) => return Err(ToolError::invalid_argument("name", "expected a string")),
            None => return Err(ToolError::MissingArgument("name".to_string())),
        };

        let result = self.dispatcher.call(name, params.get("arguments")).await;

        match (result, self.style) {
            (Ok(content), _) => Ok(content),
            (Err(e), ErrorStyle::ToolResult) => Ok(error_content(&e)),
            (Err(e), ErrorStyle::RpcError) => Err(e),
        }
    }
}

/// Result of the `initialize` method
pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

fn error_content(error: &ToolError) -> Value {
    json!({
        "content": [{ "type": "text", "text": format!("Error: {error}") }],
        "isError": true,
    })
}
