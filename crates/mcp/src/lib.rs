//! # Actuator MCP
//!
//! JSON-RPC protocol layer: envelope types, a correlating client with an
//! injectable transport, an in-process server, and the HTTP/local transports
//! that connect them. The method namespace is `initialize`,
//! `resources/list`, `resources/read`, `tools/list`, `tools/call`.

pub mod client;
pub mod protocol;
pub mod server;
pub mod transport;

// Re-export key types at crate root for ergonomics
pub use client::{McpClient, McpTransport};
pub use protocol::{
    INTERNAL_ERROR, METHOD_NOT_FOUND, McpRequest, McpResource, McpResponse, McpToolSpec,
    PROTOCOL_VERSION, RpcError,
};
pub use server::McpServer;
pub use transport::{HttpTransport, LocalTransport};
