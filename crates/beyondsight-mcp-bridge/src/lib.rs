//! BeyondSight MCP Bridge
//!
//! Translates line-delimited JSON-RPC on stdio into calls against the
//! BeyondSight HTTP tool backend.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod mcp;
pub mod router;
pub mod server;

// Re-exports
pub use config::{BridgeConfig, Cli};
pub use error::BridgeError;
pub use router::{MethodHandler, MethodRouter};
pub use server::McpBridgeServer;

pub type Result<T> = std::result::Result<T, BridgeError>;
