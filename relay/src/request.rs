//! Responses-style request and response DTOs, and conversion to engine messages.
//!
//! Input items follow the Responses API shape: role messages
//! (`{"role":"user","content":"..."}`, content may be a string or a part list), `function_call`
//! and `function_call_output` items.
//! [`to_chat_completions_input`] turns them into the [`Message`] list handed to the engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::message::{Message, MessageContent, Role, ToolCall};
use crate::stream::OutputItem;

/// Error converting request input items.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("unsupported input item type: {0}")]
    UnsupportedItem(String),
    #[error("{item} item is missing `{field}`")]
    MissingField { item: String, field: &'static str },
}

/// One Responses input item. Which fields are set depends on `type`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputItem {
    /// `message` (or absent), `function_call`, `function_call_output`, `reasoning`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl InputItem {
    pub fn message(role: &str, content: impl Into<MessageContent>) -> Self {
        Self {
            role: Some(role.to_string()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self::message("user", content)
    }

    fn kind_str(&self) -> &str {
        self.kind.as_deref().unwrap_or("message")
    }
}

/// Request accepted by `predict` / `predict_stream`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsesAgentRequest {
    pub input: Vec<InputItem>,
    /// Opaque caller data, echoed back as `custom_outputs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_inputs: Option<Value>,
}

impl ResponsesAgentRequest {
    pub fn new(input: Vec<InputItem>) -> Self {
        Self {
            input,
            custom_inputs: None,
        }
    }

    pub fn with_custom_inputs(mut self, custom_inputs: Value) -> Self {
        self.custom_inputs = Some(custom_inputs);
        self
    }
}

/// Aggregated result of `predict`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsesAgentResponse {
    pub output: Vec<OutputItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_outputs: Option<Value>,
}

fn required<'a>(
    item: &'a InputItem,
    field: &'static str,
    value: &'a Option<String>,
) -> Result<&'a str, RequestError> {
    value.as_deref().ok_or_else(|| RequestError::MissingField {
        item: item.kind_str().to_string(),
        field,
    })
}

fn fresh_id(item: &InputItem) -> String {
    item.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Converts Responses input items to engine messages, in order.
///
/// Items without an id get a fresh one. A `function_call` is attached to the preceding
/// assistant message when there is one, so consecutive calls fold into a single assistant
/// turn. `reasoning` items carry nothing the engine consumes and are skipped.
pub fn to_chat_completions_input(items: &[InputItem]) -> Result<Vec<Message>, RequestError> {
    let mut messages: Vec<Message> = Vec::with_capacity(items.len());

    for item in items {
        match item.kind_str() {
            "message" => {
                let role_name = required(item, "role", &item.role)?;
                let role: Role = role_name.parse().map_err(RequestError::UnknownRole)?;
                let content = match item.content.clone().unwrap_or_default() {
                    MessageContent::Parts(parts) if role != Role::Assistant => {
                        MessageContent::Parts(parts).as_text().into()
                    }
                    content => content,
                };
                messages.push(Message::new(fresh_id(item), role, content));
            }
            "function_call" => {
                let call = ToolCall {
                    id: required(item, "call_id", &item.call_id)?.to_string(),
                    name: required(item, "name", &item.name)?.to_string(),
                    arguments: item.arguments.clone().unwrap_or_else(|| "{}".to_string()),
                };
                match messages.last_mut() {
                    Some(last) if last.role == Role::Assistant => last.tool_calls.push(call),
                    _ => {
                        let turn = Message::assistant(fresh_id(item), "");
                        messages.push(turn.with_tool_calls(vec![call]));
                    }
                }
            }
            "function_call_output" => {
                let call_id = required(item, "call_id", &item.call_id)?;
                let output = item.output.clone().unwrap_or_default();
                messages.push(Message::tool(fresh_id(item), call_id, output));
            }
            "reasoning" => {
                tracing::debug!("skipping reasoning input item");
            }
            other => return Err(RequestError::UnsupportedItem(other.to_string())),
        }
    }
    Ok(messages)
}
