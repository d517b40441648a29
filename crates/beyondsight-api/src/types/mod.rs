//! Type exports

pub mod tool;

pub use tool::{ToolCatalog, ToolDescriptor};
