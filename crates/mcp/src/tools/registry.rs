// MCP tool registry: the Folo tool catalog bound to a query forwarder

use crate::protocol::{CallToolResult, ToolSchema};
use folo_core::{
    ApiRoute, ArgumentError, FoloTool, ParamKind, ParamSpec, ToolArguments, TransportKind,
};
use folo_sdk::{FoloClient, FoloResult, QueryOutcome};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Sends a tool's arguments to its upstream route
#[async_trait::async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, route: ApiRoute, args: &ToolArguments) -> FoloResult<QueryOutcome>;
}

#[async_trait::async_trait]
impl Forwarder for FoloClient {
    async fn forward(&self, route: ApiRoute, args: &ToolArguments) -> FoloResult<QueryOutcome> {
        FoloClient::forward(self, route, args).await
    }
}

/// Tool calls that never reach the forwarder
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool {0} not found")]
    UnknownTool(String),

    #[error(transparent)]
    InvalidArguments(#[from] ArgumentError),
}

/// Tool registry for the tools exposed on one transport
pub struct ToolRegistry {
    tools: Vec<FoloTool>,
    forwarder: Arc<dyn Forwarder>,
}

impl ToolRegistry {
    pub fn new(transport: TransportKind, forwarder: Arc<dyn Forwarder>) -> Self {
        Self::with_tools(FoloTool::for_transport(transport), forwarder)
    }

    pub fn with_tools(tools: Vec<FoloTool>, forwarder: Arc<dyn Forwarder>) -> Self {
        Self { tools, forwarder }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<FoloTool> {
        self.tools.iter().copied().find(|tool| tool.name() == name)
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().copied().map(tool_schema).collect()
    }

    /// Validate arguments and forward the call.
    ///
    /// Upstream and network failures come back as a result with
    /// `isError: true`; only unknown tools and bad arguments are errors.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> Result<CallToolResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let args = tool.validate_arguments(arguments)?;

        info!(tool = %tool, "Tool called");
        let outcome = self.forwarder.forward(tool.route(), &args).await;

        match outcome.and_then(QueryOutcome::into_text) {
            Ok(text) => {
                info!(tool = %tool, "Tool completed successfully");
                Ok(CallToolResult::text(text))
            }
            Err(e) => {
                warn!(tool = %tool, error = %e, "Tool failed");
                Ok(CallToolResult::failure(e.to_string()))
            }
        }
    }
}

/// MCP schema for a catalog tool
pub fn tool_schema(tool: FoloTool) -> ToolSchema {
    let mut properties = serde_json::Map::new();
    for param in tool.params() {
        properties.insert(param.name.to_string(), param_schema(param));
    }

    ToolSchema {
        name: tool.name().to_string(),
        description: tool.description().to_string(),
        input_schema: json_schema_object(serde_json::Value::Object(properties), vec![]),
    }
}

fn param_schema(param: &ParamSpec) -> serde_json::Value {
    let description = param.description;
    match param.kind {
        ParamKind::String => json_schema_string(description),
        ParamKind::Number => json_schema_number(description),
        ParamKind::Boolean => json_schema_boolean(description),
        ParamKind::StringArray => {
            json_schema_array(serde_json::json!({"type": "string"}), description)
        }
        ParamKind::DateTime => with_format(json_schema_string(description), "date-time"),
        ParamKind::Url => with_format(json_schema_string(description), "uri"),
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: Option<&str>) -> serde_json::Value {
    with_description(serde_json::json!({ "type": "string" }), description)
}

pub fn json_schema_number(description: Option<&str>) -> serde_json::Value {
    with_description(serde_json::json!({ "type": "number" }), description)
}

pub fn json_schema_boolean(description: Option<&str>) -> serde_json::Value {
    with_description(serde_json::json!({ "type": "boolean" }), description)
}

pub fn json_schema_array(items: serde_json::Value, description: Option<&str>) -> serde_json::Value {
    with_description(
        serde_json::json!({
            "type": "array",
            "items": items
        }),
        description,
    )
}

fn with_description(mut schema: serde_json::Value, description: Option<&str>) -> serde_json::Value {
    if let (Some(description), Some(map)) = (description, schema.as_object_mut()) {
        map.insert("description".to_string(), description.into());
    }
    schema
}

fn with_format(mut schema: serde_json::Value, format: &str) -> serde_json::Value {
    if let Some(map) = schema.as_object_mut() {
        map.insert("format".to_string(), format.into());
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use folo_sdk::FoloError;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records calls and replays a canned outcome
    struct FakeForwarder {
        calls: Mutex<Vec<(ApiRoute, ToolArguments)>>,
        reply: fn() -> FoloResult<QueryOutcome>,
    }

    impl FakeForwarder {
        fn new(reply: fn() -> FoloResult<QueryOutcome>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply,
            })
        }
    }

    #[async_trait::async_trait]
    impl Forwarder for FakeForwarder {
        async fn forward(&self, route: ApiRoute, args: &ToolArguments) -> FoloResult<QueryOutcome> {
            self.calls.lock().unwrap().push((route, args.clone()));
            (self.reply)()
        }
    }

    #[test]
    fn test_registry_per_transport() {
        let forwarder = FakeForwarder::new(|| Ok(QueryOutcome::Success));
        let stdio = ToolRegistry::new(TransportKind::Stdio, forwarder.clone());
        let http = ToolRegistry::new(TransportKind::Http, forwarder);

        assert_eq!(stdio.len(), 5);
        assert!(!stdio.contains("http_stream"));
        assert_eq!(http.len(), 6);
        assert!(http.contains("http_stream"));
    }

    #[test]
    fn test_tool_schema_shape() {
        let schema = tool_schema(FoloTool::FeedInfo);

        assert_eq!(schema.name, "feed_info");
        assert_eq!(
            schema.input_schema,
            json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string", "description": "Feed ID"},
                    "url": {"type": "string", "description": "Feed URL", "format": "uri"}
                },
                "required": []
            })
        );
    }

    #[test]
    fn test_undocumented_param_has_no_description() {
        let schema = tool_schema(FoloTool::MarkRead);
        assert_eq!(
            schema.input_schema["properties"]["startTime"],
            json!({"type": "number"})
        );
        assert_eq!(
            schema.input_schema["properties"]["feedIdList"]["items"],
            json!({"type": "string"})
        );
    }

    #[tokio::test]
    async fn test_call_forwards_validated_arguments() {
        let forwarder = FakeForwarder::new(|| Ok(QueryOutcome::Data(json!({"x": 1}))));
        let registry = ToolRegistry::new(TransportKind::Stdio, forwarder.clone());

        let result = registry
            .call("subscription_list", Some(json!({"view": 1, "extra": "dropped"})))
            .await
            .unwrap();

        assert_eq!(result, CallToolResult::text("{\n  \"x\": 1\n}"));

        let calls = forwarder.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, ApiRoute::get("/subscriptions"));
        assert_eq!(serde_json::Value::Object(calls[0].1.clone()), json!({"view": 1}));
    }

    #[tokio::test]
    async fn test_upstream_error_is_tool_failure() {
        let forwarder = FakeForwarder::new(|| {
            Err(FoloError::Upstream {
                code: Some(1),
                message: Some("bad request".to_string()),
            })
        });
        let registry = ToolRegistry::new(TransportKind::Stdio, forwarder);

        let result = registry.call("feed_info", None).await.unwrap();
        assert_eq!(result, CallToolResult::failure("Error: bad request"));
    }

    #[tokio::test]
    async fn test_missing_token_is_not_failure() {
        let forwarder = FakeForwarder::new(|| Ok(QueryOutcome::MissingSessionToken));
        let registry = ToolRegistry::new(TransportKind::Stdio, forwarder);

        let result = registry.call("unread_count", None).await.unwrap();
        assert_eq!(result, CallToolResult::text(folo_sdk::MISSING_TOKEN_MESSAGE));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let forwarder = FakeForwarder::new(|| Ok(QueryOutcome::Success));
        let registry = ToolRegistry::new(TransportKind::Stdio, forwarder.clone());

        let err = registry.call("http_stream", None).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(ref name) if name == "http_stream"));
        assert!(forwarder.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_arguments_not_forwarded() {
        let forwarder = FakeForwarder::new(|| Ok(QueryOutcome::Success));
        let registry = ToolRegistry::new(TransportKind::Stdio, forwarder.clone());

        let err = registry
            .call("entry_list", Some(json!({"read": "yes"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(forwarder.calls.lock().unwrap().is_empty());
    }
}
