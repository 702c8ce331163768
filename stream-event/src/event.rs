//! Stream event types (type + payload).
//! Envelope fields (response_id, sequence_number) are applied separately by [`crate::envelope`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::item::OutputItem;

/// Event kind carrying a finished output item; the only kind aggregated by `predict`.
pub const OUTPUT_ITEM_DONE: &str = "response.output_item.done";

/// Event kind carrying an incremental text delta.
pub const OUTPUT_TEXT_DELTA: &str = "response.output_text.delta";

/// Stream event: wire shape for one event of a Responses stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StreamEvent {
    #[serde(rename = "response.output_item.done")]
    OutputItemDone { item: OutputItem },
    #[serde(rename = "response.output_text.delta")]
    OutputTextDelta { item_id: String, delta: String },
}

impl StreamEvent {
    pub fn item_done(item: OutputItem) -> Self {
        StreamEvent::OutputItemDone { item }
    }

    /// The `type` tag of this event.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::OutputItemDone { .. } => OUTPUT_ITEM_DONE,
            StreamEvent::OutputTextDelta { .. } => OUTPUT_TEXT_DELTA,
        }
    }

    /// Returns the completed item for `response.output_item.done`, `None` otherwise.
    pub fn into_done_item(self) -> Option<OutputItem> {
        match self {
            StreamEvent::OutputItemDone { item } => Some(item),
            _ => None,
        }
    }

    /// Serializes this event to a JSON object (type + payload only; no envelope).
    ///
    /// Use crate-level [`crate::to_json`] when you need envelope fields injected.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_done_uses_dotted_type() {
        let event = StreamEvent::item_done(OutputItem::text("m1", "hi"));
        let value = event.to_value().unwrap();
        assert_eq!(value["type"], OUTPUT_ITEM_DONE);
        assert_eq!(value["item"]["type"], "message");
        assert_eq!(event.kind(), OUTPUT_ITEM_DONE);
    }

    #[test]
    fn delta_is_not_a_done_item() {
        let event = StreamEvent::OutputTextDelta {
            item_id: "m1".into(),
            delta: "h".into(),
        };
        assert_eq!(event.to_value().unwrap()["type"], OUTPUT_TEXT_DELTA);
        assert!(event.into_done_item().is_none());
    }

    #[test]
    fn parses_back_from_wire() {
        let raw = r#"{
            "type": "response.output_item.done",
            "item": {"type": "function_call_output", "call_id": "c1", "output": "42"}
        }"#;
        let event: StreamEvent = serde_json::from_str(raw).unwrap();
        match event.into_done_item() {
            Some(OutputItem::FunctionCallOutput { call_id, output }) => {
                assert_eq!(call_id, "c1");
                assert_eq!(output, "42");
            }
            other => panic!("unexpected item: {:?}", other),
        }
    }
}
