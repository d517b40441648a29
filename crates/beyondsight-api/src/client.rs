use crate::{config::Config, error::ToolsApiError, types::ToolCatalog, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, trace};

/// Client for the tool backend's discovery and invocation endpoints.
#[derive(Debug, Clone)]
pub struct ToolsClient {
    http_client: Client,
    base_url: String,
}

impl ToolsClient {
    /// Creates a new `ToolsClient` from a given configuration.
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;
        Ok(Self::with_client(http_client, &config.base_url))
    }

    /// Creates a new `ToolsClient` with a custom `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            http_client: client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tool_url(&self, tool_name: &str) -> String {
        format!("{}/{}", self.base_url, tool_name)
    }

    /// Issues a discovery GET when `tool_name` is `None`, otherwise POSTs
    /// `params` (or `{}`) to `<base>/<tool_name>`.
    ///
    /// The status code is not inspected; whatever body comes back must be JSON.
    pub async fn request(&self, tool_name: Option<&str>, params: Option<&Value>) -> Result<Value> {
        let (url, builder) = match tool_name {
            None => (self.base_url.clone(), self.http_client.get(&self.base_url)),
            Some(name) => {
                if name.is_empty() {
                    return Err(ToolsApiError::InvalidToolName(name.to_string()));
                }
                let url = self.tool_url(name);
                let empty = Value::Object(serde_json::Map::new());
                let builder = self.http_client.post(&url).json(params.unwrap_or(&empty));
                (url, builder)
            }
        };

        debug!(%url, "sending backend request");
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        trace!(%url, %status, len = body.len(), "received backend response");

        serde_json::from_str(&body).map_err(|source| ToolsApiError::Parse { url, source })
    }

    pub async fn list_tools(&self) -> Result<ToolCatalog> {
        let payload = self.request(None, None).await?;
        serde_json::from_value(payload).map_err(|source| ToolsApiError::Parse {
            url: self.base_url.clone(),
            source,
        })
    }

    pub async fn call_tool(&self, tool_name: &str, arguments: &Value) -> Result<Value> {
        self.request(Some(tool_name), Some(arguments)).await
    }
}
