use crate::mcp::types::{McpRequest, McpResponse};

pub struct McpProtocol;

impl McpProtocol {
    pub fn serialize(response: &McpResponse) -> serde_json::Result<String> {
        serde_json::to_string(response)
    }

    pub fn deserialize(line: &str) -> serde_json::Result<McpRequest> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::McpError;
    use serde_json::{json, Value};

    #[test]
    fn notification_has_no_id() {
        let request =
            McpProtocol::deserialize(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .unwrap();
        assert_eq!(request.id, None);
        assert_eq!(request.method_name(), "notifications/initialized");
        assert_eq!(request.params, None);
    }

    #[test]
    fn string_and_numeric_ids_survive() {
        let request = McpProtocol::deserialize(r#"{"id":"abc","method":"initialize"}"#).unwrap();
        assert_eq!(request.id, Some(json!("abc")));
        assert_eq!(request.jsonrpc, None);

        let request = McpProtocol::deserialize(r#"{"id":7,"method":"tools/list"}"#).unwrap();
        assert_eq!(request.id, Some(json!(7)));
    }

    #[test]
    fn loose_envelope_fields_are_accepted() {
        let request =
            McpProtocol::deserialize(r#"{"jsonrpc":2,"id":1,"method":"initialize"}"#).unwrap();
        assert_eq!(request.jsonrpc, Some(json!(2)));
        assert_eq!(request.method_name(), "initialize");

        let request = McpProtocol::deserialize(r#"{"id":2,"method":null}"#).unwrap();
        assert_eq!(request.method_name(), "null");

        let request = McpProtocol::deserialize(r#"{"id":3,"method":7}"#).unwrap();
        assert_eq!(request.method_name(), "7");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(McpProtocol::deserialize("not json").is_err());
        assert!(McpProtocol::deserialize("[1,2]").is_err());
    }

    #[test]
    fn error_response_keeps_null_id() {
        let response = McpResponse::error(Value::Null, McpError::internal_error("boom"));
        let line = McpProtocol::serialize(&response).unwrap();
        assert_eq!(
            line,
            r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal error: boom"}}"#
        );
    }
}
