//! MCP method handlers

pub mod initialize;
pub mod tools;

// Re-export handler structs for easy registration in the router
pub use initialize::Initialize;
pub use tools::{CallTool, ListTools};
