//! Output item translation: normalized messages → Responses stream events.
//!
//! The relay calls an [`OutputItemTranslator`] once per non-empty group of new messages and
//! forwards every event it yields, in order. [`ResponsesItemTranslator`] is the default and
//! maps each message to `response.output_item.done` events:
//!
//! | message | items |
//! |---|---|
//! | assistant | `reasoning` (per reasoning part), `message` (text), `function_call` (per call) |
//! | tool | `function_call_output` |
//! | user / system | `message` with that role |

use futures::stream;
use serde_json::Value;
use stream_event::SummaryText;

use crate::message::{ContentPart, Message, MessageContent, Role};
use crate::stream::{BoxStream, OutputItem, StreamEvent};

/// Converts an ordered list of normalized messages into a lazy stream of output events.
pub trait OutputItemTranslator: Send + Sync {
    fn translate(&self, messages: Vec<Message>) -> BoxStream<'_, StreamEvent>;
}

impl<T: OutputItemTranslator + ?Sized> OutputItemTranslator for Box<T> {
    fn translate(&self, messages: Vec<Message>) -> BoxStream<'_, StreamEvent> {
        (**self).translate(messages)
    }
}

/// Default translator producing Responses API output items.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponsesItemTranslator;

impl ResponsesItemTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Output items for one message, in emission order.
    pub fn items_for(&self, message: Message) -> Vec<OutputItem> {
        match message.role {
            Role::Assistant => assistant_items(message),
            Role::Tool => vec![OutputItem::FunctionCallOutput {
                call_id: message.tool_call_id.unwrap_or_default(),
                output: message.content.as_text(),
            }],
            Role::User | Role::System => {
                let text = message.content.as_text();
                vec![OutputItem::message(message.id, message.role.as_str(), text)]
            }
        }
    }
}

fn assistant_items(message: Message) -> Vec<OutputItem> {
    let mut items = Vec::new();

    let text = match &message.content {
        MessageContent::Text(s) => s.clone(),
        MessageContent::Parts(parts) => {
            let summary: Vec<SummaryText> = parts
                .iter()
                .filter(|p| p.kind == "reasoning")
                .flat_map(reasoning_summary)
                .collect();
            if !summary.is_empty() {
                items.push(OutputItem::Reasoning {
                    id: format!("{}-reasoning", message.id),
                    summary,
                });
            }
            parts
                .iter()
                .filter(|p| p.is_text() || p.kind == "output_text")
                .filter_map(|p| p.text.as_deref())
                .collect()
        }
    };

    if !text.is_empty() {
        items.push(OutputItem::text(message.id.clone(), text));
    }

    for call in message.tool_calls {
        items.push(OutputItem::FunctionCall {
            id: format!("fc-{}", call.id),
            call_id: call.id,
            name: call.name,
            arguments: call.arguments,
        });
    }
    items
}

/// Summary entries of a reasoning part; a malformed `summary` yields none.
fn reasoning_summary(part: &ContentPart) -> Vec<SummaryText> {
    match part.extra.get("summary") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|e| e.get("text").and_then(Value::as_str))
            .map(SummaryText::new)
            .collect(),
        _ => Vec::new(),
    }
}

impl OutputItemTranslator for ResponsesItemTranslator {
    fn translate(&self, messages: Vec<Message>) -> BoxStream<'_, StreamEvent> {
        let events = messages
            .into_iter()
            .flat_map(move |m| self.items_for(m))
            .map(|item| Ok(StreamEvent::item_done(item)));
        Box::pin(stream::iter(events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ToolCall;
    use futures::TryStreamExt;
    use serde_json::json;

    fn items(messages: Vec<Message>) -> Vec<OutputItem> {
        futures::executor::block_on(async {
            ResponsesItemTranslator
                .translate(messages)
                .try_collect::<Vec<_>>()
                .await
                .unwrap()
                .into_iter()
                .filter_map(StreamEvent::into_done_item)
                .collect()
        })
    }

    /// **Scenario**: assistant tool-call turn, tool result, then final answer map to
    /// function_call, function_call_output and message items in order.
    #[test]
    fn tool_round_trip_items_in_order() {
        let out = items(vec![
            Message::assistant("a1", "").with_tool_calls(vec![ToolCall {
                id: "call-1".into(),
                name: "check_ip_reputation".into(),
                arguments: r#"{"ip":"3.92.45.47"}"#.into(),
            }]),
            Message::tool("t1", "call-1", r#"{"abuseConfidenceScore":100}"#),
            Message::assistant("a2", "The IP is malicious."),
        ]);
        let kinds: Vec<_> = out.iter().map(OutputItem::kind).collect();
        assert_eq!(kinds, ["function_call", "function_call_output", "message"]);
        match &out[0] {
            OutputItem::FunctionCall { call_id, name, .. } => {
                assert_eq!(call_id, "call-1");
                assert_eq!(name, "check_ip_reputation");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(
            out[2].message_text().as_deref(),
            Some("The IP is malicious.")
        );
    }

    /// **Scenario**: structured assistant content yields a reasoning item before the text item.
    #[test]
    fn reasoning_parts_become_reasoning_item() {
        let parts: Vec<ContentPart> = serde_json::from_value(json!([
            {"type": "reasoning", "summary": [{"type": "summary_text", "text": "think"}]},
            {"type": "text", "text": "answer"}
        ]))
        .unwrap();
        let out = items(vec![Message::assistant("a1", MessageContent::Parts(parts))]);
        assert_eq!(out.len(), 2);
        match &out[0] {
            OutputItem::Reasoning { id, summary } => {
                assert_eq!(id, "a1-reasoning");
                assert_eq!(summary, &[SummaryText::new("think")]);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(out[1].message_text().as_deref(), Some("answer"));
    }

    /// **Scenario**: an empty assistant message without tool calls produces nothing.
    #[test]
    fn empty_assistant_yields_no_items() {
        assert!(items(vec![Message::assistant("a1", "")]).is_empty());
    }

    #[test]
    fn user_message_keeps_role() {
        let out = items(vec![Message::user("u1", "hello")]);
        match &out[0] {
            OutputItem::Message { role, id, .. } => {
                assert_eq!(role, "user");
                assert_eq!(id, "u1");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
