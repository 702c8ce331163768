//! Output items: the externally consumable units of a response.
//!
//! Shapes follow the Responses API output array: `message`, `function_call`,
//! `function_call_output` and `reasoning`, tagged by `type`.

use serde::{Deserialize, Serialize};

/// One item of response output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    /// Textual block from a role (normally `assistant`).
    Message {
        id: String,
        role: String,
        content: Vec<OutputContent>,
    },
    /// Tool invocation requested by the model.
    FunctionCall {
        id: String,
        call_id: String,
        name: String,
        arguments: String,
    },
    /// Result of a tool invocation, keyed by the call it answers.
    FunctionCallOutput { call_id: String, output: String },
    /// Reasoning trace summary.
    Reasoning {
        id: String,
        summary: Vec<SummaryText>,
    },
}

/// Content part of a [`OutputItem::Message`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputContent {
    OutputText { text: String },
}

/// One summary entry of a reasoning item (`{"type": "summary_text", "text": ...}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryText {
    #[serde(rename = "type", default = "summary_text_type")]
    pub kind: String,
    pub text: String,
}

fn summary_text_type() -> String {
    "summary_text".to_string()
}

impl SummaryText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: summary_text_type(),
            text: text.into(),
        }
    }
}

impl OutputItem {
    /// Assistant text item with a single `output_text` part.
    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::message(id, "assistant", text)
    }

    /// Text item for an arbitrary role.
    pub fn message(
        id: impl Into<String>,
        role: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        OutputItem::Message {
            id: id.into(),
            role: role.into(),
            content: vec![OutputContent::OutputText { text: text.into() }],
        }
    }

    /// Concatenated text of a message item; `None` for other item kinds.
    pub fn message_text(&self) -> Option<String> {
        match self {
            OutputItem::Message { content, .. } => Some(
                content
                    .iter()
                    .map(|c| match c {
                        OutputContent::OutputText { text } => text.as_str(),
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Item type tag as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            OutputItem::Message { .. } => "message",
            OutputItem::FunctionCall { .. } => "function_call",
            OutputItem::FunctionCallOutput { .. } => "function_call_output",
            OutputItem::Reasoning { .. } => "reasoning",
        }
    }
}
