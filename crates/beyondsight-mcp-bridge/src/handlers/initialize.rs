use crate::mcp::{InitializeResult, ServerCapabilities, ServerInfo, PROTOCOL_VERSION};
use crate::router::MethodHandler;
use async_trait::async_trait;
use beyondsight_api::ToolsClient;
use serde_json::Value;

pub const SERVER_NAME: &str = "beyondsight-mcp-server";
pub const SERVER_VERSION: &str = "1.0.0";

/// Answers `initialize` with a fixed descriptor; client params are ignored.
pub struct Initialize;

#[async_trait]
impl MethodHandler for Initialize {
    async fn handle(&self, _client: &ToolsClient, _params: Option<Value>) -> crate::Result<Value> {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities::default(),
        };
        Ok(serde_json::to_value(result)?)
    }
}
