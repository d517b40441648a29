use crate::handlers;
use crate::mcp::{McpError, McpProtocol, McpRequest, McpResponse};
use async_trait::async_trait;
use beyondsight_api::ToolsClient;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Methods under this prefix are notifications and never get a reply.
pub const NOTIFICATION_PREFIX: &str = "notifications/";

/// A JSON-RPC method the bridge answers.
#[async_trait]
pub trait MethodHandler: Send + Sync {
    async fn handle(&self, client: &ToolsClient, params: Option<Value>) -> crate::Result<Value>;
}

/// Dispatch table from method name to handler.
pub struct MethodRouter {
    client: ToolsClient,
    handlers: RwLock<HashMap<String, Arc<dyn MethodHandler>>>,
}

impl MethodRouter {
    /// Creates an empty `MethodRouter`.
    pub fn new(client: ToolsClient) -> Self {
        Self {
            client,
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a router answering `initialize`, `tools/list` and `tools/call`.
    pub fn with_default_handlers(client: ToolsClient) -> Self {
        let router = Self::new(client);
        router.add_handler("initialize", Arc::new(handlers::Initialize));
        router.add_handler("tools/list", Arc::new(handlers::ListTools));
        router.add_handler("tools/call", Arc::new(handlers::CallTool));
        router
    }

    pub fn add_handler(&self, method: &str, handler: Arc<dyn MethodHandler>) {
        self.handlers.write().insert(method.to_string(), handler);
    }

    /// Handles one raw input line, producing at most one response.
    ///
    /// Lines that are not a JSON-RPC object yield an internal error with a
    /// null id.
    pub async fn handle_line(&self, line: &str) -> Option<McpResponse> {
        match McpProtocol::deserialize(line) {
            Ok(request) => {
                info!("Received request: {}", request.method_name());
                self.dispatch(request).await
            }
            Err(e) => {
                error!("Error handling message: {}", e);
                Some(McpResponse::error(Value::Null, McpError::internal_error(e)))
            }
        }
    }

    pub async fn dispatch(&self, request: McpRequest) -> Option<McpResponse> {
        let method = request.method_name();
        let McpRequest { id, params, .. } = request;

        if method.starts_with(NOTIFICATION_PREFIX) {
            if method == "notifications/initialized" {
                info!("Received notifications/initialized");
            } else {
                debug!(%method, "ignoring notification");
            }
            return None;
        }

        let handler = {
            let handlers = self.handlers.read();
            handlers.get(&method).cloned()
        };

        let Some(handler) = handler else {
            warn!("Unknown method: {}", method);
            return Some(McpResponse::error(
                id.unwrap_or(Value::Null),
                McpError::method_not_found(&method),
            ));
        };

        match handler.handle(&self.client, params).await {
            Ok(result) => Some(McpResponse::success(id.unwrap_or(Value::Null), result)),
            Err(e) => {
                error!("Error handling message: {}", e);
                Some(McpResponse::error(Value::Null, McpError::internal_error(e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BridgeError;
    use beyondsight_api::Config;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl MethodHandler for Echo {
        async fn handle(&self, _client: &ToolsClient, params: Option<Value>) -> crate::Result<Value> {
            Ok(params.unwrap_or(Value::Null))
        }
    }

    struct Failing;

    #[async_trait]
    impl MethodHandler for Failing {
        async fn handle(&self, _client: &ToolsClient, _params: Option<Value>) -> crate::Result<Value> {
            Err(BridgeError::InvalidParams("nope".to_string()))
        }
    }

    fn router() -> MethodRouter {
        let client = ToolsClient::new(Config::default()).unwrap();
        let router = MethodRouter::new(client);
        router.add_handler("echo", Arc::new(Echo));
        router.add_handler("fail", Arc::new(Failing));
        router
    }

    #[tokio::test]
    async fn routes_by_method_name() {
        let response = router()
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"echo","params":{"a":1}}"#)
            .await
            .unwrap();
        assert_eq!(response, McpResponse::success(json!(3), json!({ "a": 1 })));
    }

    #[tokio::test]
    async fn unknown_method_echoes_id() {
        let response = router()
            .handle_line(r#"{"jsonrpc":"2.0","id":"x-1","method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(response.id, json!("x-1"));
        let error = response.error.unwrap();
        assert_eq!(error.code, McpError::METHOD_NOT_FOUND);
        assert_eq!(error.message, "Method not found: resources/list");
    }

    #[tokio::test]
    async fn handler_failure_is_internal_error_with_null_id() {
        let response = router()
            .handle_line(r#"{"jsonrpc":"2.0","id":9,"method":"fail"}"#)
            .await
            .unwrap();
        assert_eq!(response.id, Value::Null);
        let error = response.error.unwrap();
        assert_eq!(error.code, McpError::INTERNAL_ERROR);
        assert_eq!(error.message, "Internal error: Invalid params: nope");
    }

    #[tokio::test]
    async fn non_string_jsonrpc_is_ignored() {
        let response = router()
            .handle_line(r#"{"jsonrpc":2,"id":1,"method":"echo","params":"hi"}"#)
            .await
            .unwrap();
        assert_eq!(response, McpResponse::success(json!(1), json!("hi")));
    }

    #[tokio::test]
    async fn null_method_is_not_found_with_id() {
        let response = router()
            .handle_line(r#"{"id":2,"method":null}"#)
            .await
            .unwrap();
        assert_eq!(response.id, json!(2));
        let error = response.error.unwrap();
        assert_eq!(error.code, McpError::METHOD_NOT_FOUND);
        assert_eq!(error.message, "Method not found: null");
    }

    #[tokio::test]
    async fn notifications_are_silent() {
        let router = router();
        assert!(router
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await
            .is_none());
        assert!(router
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/cancelled","params":{}}"#)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn unparsable_line_is_internal_error() {
        let response = router().handle_line("not json").await.unwrap();
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, McpError::INTERNAL_ERROR);
    }
}
