//! Tool source abstraction: list tools and call a tool.
//!
//! The agent graph reaches its tools through [`ToolSource`] rather than a concrete registry.
//! Each tool implements [`Tool`]; [`SecurityToolsSource`] aggregates the built-in investigation
//! tools:
//!
//! - [`IpReputationTool`] (`check_ip_reputation`): AbuseIPDB-style lookup over a fixed table.
//! - [`CurrentTimeTool`] (`get_current_time`): current UTC time.

mod clock;
mod ip_reputation;

pub use clock::{CurrentTimeTool, TOOL_GET_CURRENT_TIME};
pub use ip_reputation::{IpReputationTool, IP_NOT_FOUND, TOOL_CHECK_IP_REPUTATION};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool specification, aligned with MCP `tools/list` result item.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: Option<String>,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

/// Result of a single tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallContent {
    pub text: String,
}

/// Errors from listing or calling tools.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
}

/// Tool source: list tools and call one by name with JSON arguments.
#[async_trait]
pub trait ToolSource: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError>;
}

/// A single callable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name; used to route `call_tool`.
    fn name(&self) -> &str;

    fn spec(&self) -> ToolSpec;

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError>;
}

/// Reads a required string argument.
pub(crate) fn string_arg<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolSourceError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolSourceError::InvalidInput(format!("missing string field `{key}`")))
}

/// Tool source over a fixed, ordered set of tools.
pub struct SecurityToolsSource {
    tools: Vec<Box<dyn Tool>>,
}

impl SecurityToolsSource {
    /// Source with `check_ip_reputation` and `get_current_time`.
    pub fn new() -> Self {
        Self {
            tools: vec![Box::new(IpReputationTool), Box::new(CurrentTimeTool)],
        }
    }

    /// Adds a tool; a tool with the same name replaces the earlier one.
    pub fn with_tool(mut self, tool: Box<dyn Tool>) -> Self {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
        self
    }
}

impl Default for SecurityToolsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolSource for SecurityToolsSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.tools.iter().map(|t| t.spec()).collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tracing::debug!(tool = name, args = %arguments, "calling tool");
        tool.call(arguments).await
    }
}
