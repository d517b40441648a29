use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolsApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid tool name: {0:?}")]
    InvalidToolName(String),
}
