use crate::error::BridgeError;
use crate::mcp::{
    InputSchema, McpContentItem, McpTool, PropertySchema, ToolCallResult, ToolsListResult,
};
use crate::router::MethodHandler;
use async_trait::async_trait;
use beyondsight_api::{ToolDescriptor, ToolsClient};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

// --- ListTools ---

/// Answers `tools/list` from the backend's discovery endpoint.
pub struct ListTools;

#[async_trait]
impl MethodHandler for ListTools {
    async fn handle(&self, client: &ToolsClient, _params: Option<Value>) -> crate::Result<Value> {
        let catalog = client.list_tools().await?;
        debug!(count = catalog.tools.len(), "discovered backend tools");

        let tools = catalog
            .tools
            .into_iter()
            .map(|(name, descriptor)| to_mcp_tool(name, descriptor))
            .collect();

        Ok(serde_json::to_value(ToolsListResult { tools })?)
    }
}

/// Every backend parameter is exposed as a required string.
pub fn to_mcp_tool(name: String, descriptor: ToolDescriptor) -> McpTool {
    let required = descriptor.parameters.keys().cloned().collect();
    let properties = descriptor
        .parameters
        .into_iter()
        .map(|(param, description)| {
            let schema = PropertySchema {
                property_type: "string".to_string(),
                description,
            };
            (param, schema)
        })
        .collect();

    McpTool {
        name,
        description: descriptor
            .description
            .unwrap_or_else(|| Value::String(String::new())),
        input_schema: InputSchema {
            schema_type: "object".to_string(),
            properties,
            required,
        },
    }
}

// --- CallTool ---

#[derive(Debug, Deserialize)]
struct CallToolParams {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Answers `tools/call` by POSTing the arguments to the named backend tool.
pub struct CallTool;

#[async_trait]
impl MethodHandler for CallTool {
    async fn handle(&self, client: &ToolsClient, params: Option<Value>) -> crate::Result<Value> {
        let params = params
            .ok_or_else(|| BridgeError::InvalidParams("tools/call requires params".to_string()))?;
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| BridgeError::InvalidParams(e.to_string()))?;

        let name = params
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| BridgeError::InvalidParams("tools/call requires a tool name".to_string()))?;
        let arguments = params
            .arguments
            .filter(|a| !a.is_null())
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        debug!(tool = %name, "invoking backend tool");
        let payload = client.call_tool(&name, &arguments).await?;

        let result = ToolCallResult {
            content: vec![McpContentItem::Text {
                text: render_tool_output(payload)?,
            }],
        };
        Ok(serde_json::to_value(result)?)
    }
}

/// Pretty-prints the backend's `result` field, or the whole payload when the
/// field is missing or null.
pub fn render_tool_output(payload: Value) -> crate::Result<String> {
    let output = match payload.get("result") {
        Some(result) if !result.is_null() => result,
        _ => &payload,
    };
    Ok(serde_json::to_string_pretty(output)?)
}
