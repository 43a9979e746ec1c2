//! Tool-call protocol surface
//!
//! - [`registry`]: the tool inventory and its input schemas
//! - [`dispatch`]: argument handling and execution against the aggregator
//! - [`protocol`]: JSON-RPC 2.0 method routing shared by both transports

pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod registry;

pub use dispatch::{ToolArgs, ToolDispatcher};
pub use error::{ToolError, ToolResult};
pub use protocol::{ErrorStyle, ProtocolHandler, RpcError, RpcRequest, RpcResponse};
pub use registry::{Tool, ToolSet, ToolSpec};
