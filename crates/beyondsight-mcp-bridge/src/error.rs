use beyondsight_api::ToolsApiError;
use thiserror::Error;

/// Failures while handling a single request. All of them surface to the
/// client as JSON-RPC internal errors.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Api(#[from] ToolsApiError),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
