pub mod protocol;
pub mod transport;
pub mod types;

pub use protocol::McpProtocol;
pub use transport::LineTransport;
pub use types::{
    InitializeResult, InputSchema, McpContentItem, McpError, McpRequest, McpResponse, McpTool,
    PropertySchema, ServerCapabilities, ServerInfo, ToolCallResult, ToolsCapability,
    ToolsListResult, PROTOCOL_VERSION,
};
