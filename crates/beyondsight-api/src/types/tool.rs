use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of the discovery endpoint: tool name to descriptor, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tools: IndexMap<String, ToolDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Usually a string, but passed through whatever the backend sends.
    #[serde(default)]
    pub description: Option<Value>,
    /// Parameter name to its human-readable description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: IndexMap<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
