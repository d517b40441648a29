//! BeyondSight tool backend client
//!
//! This crate provides the HTTP side of the MCP bridge: tool discovery via
//! `GET <base>` and tool invocation via `POST <base>/<tool>`.

pub mod client;
pub mod config;
pub mod error;
pub mod types;


// Re-exports
pub use client::ToolsClient;
pub use config::{Config, DEFAULT_BASE_URL};
pub use error::ToolsApiError;
pub use types::{ToolCatalog, ToolDescriptor};

pub type Result<T> = std::result::Result<T, ToolsApiError>;
