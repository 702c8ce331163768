//! Replay of recorded update batches.
//!
//! [`ScriptedSource`] is an [`UpdateSource`] that yields a fixed list of batches, optionally
//! echoing the caller's input into the first batch the way a graph engine does, and optionally
//! failing at a given step. [`Transcript`] is its on-disk JSON form:
//!
//! ```json
//! {
//!   "input": [{"role": "user", "content": "Hi"}],
//!   "echo_input": true,
//!   "batches": [
//!     [{"node": "supervisor", "messages": [{"id": "2", "role": "assistant", "content": "Hey"}]}]
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::RelayError;
use crate::message::Message;
use crate::request::{InputItem, ResponsesAgentRequest};
use crate::stream::{BoxStream, StreamMode, UpdateBatch, UpdateSource};

/// Node name used when the input echo has no recorded batch to join.
pub const START_NODE: &str = "__start__";

/// Replays recorded batches in order.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    batches: Vec<UpdateBatch>,
    echo_input: bool,
    fail_at: Option<(usize, String)>,
}

impl ScriptedSource {
    pub fn new(batches: Vec<UpdateBatch>) -> Self {
        Self {
            batches,
            ..Self::default()
        }
    }

    /// Prepends the input messages to the first node of the first batch on each run.
    pub fn echoing_input(mut self) -> Self {
        self.echo_input = true;
        self
    }

    /// Yields `RelayError::Source(message)` instead of batch `step` (0-based), then ends.
    pub fn fail_at(mut self, step: usize, message: impl Into<String>) -> Self {
        self.fail_at = Some((step, message.into()));
        self
    }

    pub fn batches(&self) -> &[UpdateBatch] {
        &self.batches
    }

    fn first_batch_with_echo(&self, input: Vec<Message>) -> UpdateBatch {
        match self.batches.first() {
            Some(first) if !first.nodes.is_empty() => {
                let mut batch = first.clone();
                let node = &mut batch.nodes[0];
                let recorded = std::mem::take(&mut node.messages);
                node.messages = input.into_iter().chain(recorded).collect();
                batch
            }
            _ => UpdateBatch::single(START_NODE, input),
        }
    }
}

impl UpdateSource for ScriptedSource {
    fn stream(
        &self,
        input: Vec<Message>,
        mode: StreamMode,
    ) -> BoxStream<'_, (StreamMode, UpdateBatch)> {
        if mode != StreamMode::Updates {
            tracing::debug!(?mode, "scripted source only records updates; replaying them anyway");
        }
        let echo = self.echo_input.then(|| self.first_batch_with_echo(input));
        let skip_first =
            echo.is_some() && self.batches.first().is_some_and(|b| !b.nodes.is_empty());

        Box::pin(async_stream::stream! {
            let recorded = self.batches.iter().skip(usize::from(skip_first)).cloned();
            let batches = echo.into_iter().chain(recorded);
            for (step, batch) in batches.enumerate() {
                if let Some((fail_step, message)) = &self.fail_at {
                    if *fail_step == step {
                        yield Err(RelayError::Source(message.clone()));
                        return;
                    }
                }
                tracing::debug!(step, nodes = batch.nodes.len(), "replaying batch");
                yield Ok((mode, batch));
            }
        })
    }
}

/// Error loading a transcript.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to read transcript {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid transcript: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A recorded conversation: request input plus the batches the engine produced for it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub input: Vec<InputItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_inputs: Option<Value>,
    /// When true, the input is echoed into the first batch at replay time.
    #[serde(default)]
    pub echo_input: bool,
    pub batches: Vec<UpdateBatch>,
}

impl Transcript {
    pub fn from_json(json: &str) -> Result<Self, TranscriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TranscriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TranscriptError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn request(&self) -> ResponsesAgentRequest {
        ResponsesAgentRequest {
            input: self.input.clone(),
            custom_inputs: self.custom_inputs.clone(),
        }
    }

    pub fn source(&self) -> ScriptedSource {
        let source = ScriptedSource::new(self.batches.clone());
        if self.echo_input {
            source.echoing_input()
        } else {
            source
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn replay(source: &ScriptedSource, input: Vec<Message>) -> Vec<Result<UpdateBatch, String>> {
        futures::executor::block_on(
            source
                .stream(input, StreamMode::Updates)
                .map(|r| r.map(|(_, b)| b).map_err(|e| e.to_string()))
                .collect(),
        )
    }

    /// **Scenario**: echoed input lands ahead of the recorded messages of the first node.
    #[test]
    fn echo_prepends_to_first_node() {
        let recorded = UpdateBatch::single("agent", vec![Message::assistant("a", "hello")]);
        let source = ScriptedSource::new(vec![recorded]).echoing_input();
        let out = replay(&source, vec![Message::user("u", "hi")]);
        assert_eq!(out.len(), 1);
        let messages = &out[0].as_ref().unwrap().nodes[0].messages;
        let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["u", "a"]);
    }

    /// **Scenario**: with nothing recorded, the echo becomes its own start batch.
    #[test]
    fn echo_without_batches_uses_start_node() {
        let source = ScriptedSource::default().echoing_input();
        let out = replay(&source, vec![Message::user("u", "hi")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].as_ref().unwrap().nodes[0].node, START_NODE);
    }

    /// **Scenario**: a scripted failure replaces the batch at that step and ends the stream.
    #[test]
    fn fail_at_ends_stream() {
        let source = ScriptedSource::new(vec![
            UpdateBatch::single("a", vec![]),
            UpdateBatch::single("b", vec![]),
            UpdateBatch::single("c", vec![]),
        ])
        .fail_at(1, "engine down");
        let out = replay(&source, vec![]);
        assert_eq!(out.len(), 2);
        assert!(out[0].is_ok());
        assert!(out[1].as_ref().unwrap_err().contains("engine down"));
    }

    #[test]
    fn transcript_parses_and_builds_request() {
        let raw = r#"{
            "input": [{"role": "user", "content": "Hi"}],
            "custom_inputs": {"k": 1},
            "echo_input": true,
            "batches": [[{"node": "supervisor", "messages": [
                {"id": "2", "role": "assistant", "content": "Hey"}
            ]}]]
        }"#;
        let t = Transcript::from_json(raw).unwrap();
        assert_eq!(t.batches.len(), 1);
        let expected = serde_json::json!({"k": 1});
        assert_eq!(t.request().custom_inputs, Some(expected));
        assert!(t.source().echo_input);
    }

    #[test]
    fn transcript_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"batches":[[],[{"node":"supervisor"}]]}"#).unwrap();
        let t = Transcript::from_path(&path).unwrap();
        assert_eq!(t.batches.len(), 2);
        assert!(t.input.is_empty());
        assert!(!t.echo_input);
    }

    #[test]
    fn transcript_missing_file_reports_path() {
        let path = "/nonexistent/relay/transcript.json";
        let err = Transcript::from_path(path).unwrap_err();
        assert!(err.to_string().contains(path), "{}", err);
    }
}
