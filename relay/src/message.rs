//! Engine message types.
//!
//! A [`Message`] is one entry of the graph's message list: a stable id assigned by the
//! execution engine, a [`Role`], and [`MessageContent`] that is either plain text or a list of
//! typed [`ContentPart`]s. Assistant messages may carry [`ToolCall`]s; tool messages answer
//! one call through `tool_call_id`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Semantic origin of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
            Role::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    /// Accepts Responses/Chat role names; `developer` maps to [`Role::System`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "human" => Ok(Role::User),
            "assistant" | "ai" => Ok(Role::Assistant),
            "tool" => Ok(Role::Tool),
            "system" | "developer" => Ok(Role::System),
            other => Err(other.to_string()),
        }
    }
}

/// One typed part of structured content, e.g. `{"type":"text","text":"..."}` or
/// `{"type":"reasoning","summary":[...]}`. Fields other than `type` and `text` are kept in `extra`.
/// A part without `type` has an empty `kind`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
            extra: Map::new(),
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == "text"
    }
}

/// Message content: plain text or a list of typed parts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// The string variant as-is, or the concatenation of every part's `text`.
    pub fn as_text(&self) -> String {
        match self {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Parts(parts) => {
                parts.iter().filter_map(|p| p.text.as_deref()).collect()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(s) => s.is_empty(),
            MessageContent::Parts(parts) => parts.is_empty(),
        }
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Text(String::new())
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        MessageContent::Text(s.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        MessageContent::Text(s)
    }
}

/// A tool invocation requested by an assistant message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// JSON-encoded arguments.
    pub arguments: String,
}

/// A single message of the graph's conversation state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Stable id assigned by the execution engine; used for de-duplication.
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub content: MessageContent,
    /// Name of the agent that produced the message (multi-agent graphs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn new(id: impl Into<String>, role: Role, content: impl Into<MessageContent>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            name: None,
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn user(id: impl Into<String>, content: impl Into<MessageContent>) -> Self {
        Self::new(id, Role::User, content)
    }

    pub fn assistant(id: impl Into<String>, content: impl Into<MessageContent>) -> Self {
        Self::new(id, Role::Assistant, content)
    }

    pub fn system(id: impl Into<String>, content: impl Into<MessageContent>) -> Self {
        Self::new(id, Role::System, content)
    }

    /// Tool result answering `call_id`.
    pub fn tool(
        id: impl Into<String>,
        call_id: impl Into<String>,
        content: impl Into<MessageContent>,
    ) -> Self {
        let mut m = Self::new(id, Role::Tool, content);
        m.tool_call_id = Some(call_id.into());
        m
    }

    pub fn with_tool_calls(mut self, calls: Vec<ToolCall>) -> Self {
        self.tool_calls = calls;
        self
    }
}
