//! Envelope (response_id, sequence_number) for rendered stream events.
//! EnvelopeState numbers each event of one response in emission order.

use crate::event::StreamEvent;
use serde_json::Value;

/// Envelope fields added to each rendered event.
#[derive(Clone, Debug, Default)]
pub struct Envelope {
    /// Response ID; constant within one stream.
    pub response_id: Option<String>,
    /// Per-event sequence number; monotonically increasing within a stream.
    pub sequence_number: Option<u64>,
}

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response_id(mut self, id: impl Into<String>) -> Self {
        self.response_id = Some(id.into());
        self
    }

    pub fn with_sequence_number(mut self, n: u64) -> Self {
        self.sequence_number = Some(n);
        self
    }

    /// Merges envelope fields into the given JSON object (top-level only).
    /// Does not overwrite existing keys.
    pub fn inject_into(&self, obj: &mut Value) {
        let Some(obj) = obj.as_object_mut() else {
            return;
        };
        if let Some(ref id) = self.response_id {
            obj.entry("response_id")
                .or_insert_with(|| Value::String(id.clone()));
        }
        if let Some(n) = self.sequence_number {
            obj.entry("sequence_number")
                .or_insert_with(|| Value::Number(serde_json::Number::from(n)));
        }
    }
}

/// Envelope state for one response stream: response id and next sequence number.
pub struct EnvelopeState {
    pub response_id: String,
    pub next_sequence_number: u64,
}

impl EnvelopeState {
    pub fn new(response_id: impl Into<String>) -> Self {
        Self {
            response_id: response_id.into(),
            next_sequence_number: 0,
        }
    }

    /// Injects envelope into the event value and advances the sequence.
    pub fn inject_into(&mut self, value: &mut Value) {
        let env = Envelope::new()
            .with_response_id(&self.response_id)
            .with_sequence_number(self.next_sequence_number);
        self.next_sequence_number += 1;
        env.inject_into(value);
    }
}

/// Converts a stream event to JSON and injects envelope using the given state.
/// Returns the final value (type + payload + response_id, sequence_number).
pub fn to_json(event: &StreamEvent, state: &mut EnvelopeState) -> Result<Value, serde_json::Error> {
    let mut value = event.to_value()?;
    state.inject_into(&mut value);
    Ok(value)
}
