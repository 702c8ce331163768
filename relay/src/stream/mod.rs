//! Streaming types for Relay.
//!
//! Defines the input side of the relay: the [`UpdateSource`] trait implemented by a graph
//! execution engine, the [`UpdateBatch`] it yields once per executed step, and the
//! [`StreamMode`] tag that accompanies every batch. The output side is the
//! [`StreamEvent`] protocol from the `stream-event` crate.
//!
//! # Update batches
//!
//! One batch is one step of graph execution. It lists, in arrival order, every node that
//! reported state in that step together with the messages visible in that node's state.
//! Engines typically re-report already delivered messages on later steps and echo the
//! caller's input as the first messages of the first step; [`crate::dedup`] handles both.
//!
//! ```rust
//! use relay::{Message, UpdateBatch};
//!
//! let batch = UpdateBatch::single("supervisor", vec![Message::assistant("m-2", "Hey")]);
//! assert_eq!(batch.node_names().collect::<Vec<_>>(), ["supervisor"]);
//! ```

use std::fmt::Debug;
use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::message::Message;

pub use stream_event::{OutputItem, StreamEvent};

/// Boxed, fallible, lazily pulled stream used at every stage of the relay.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T, RelayError>> + Send + 'a>>;

/// Stream mode selector requested from the engine; echoed back as the tag of each batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamMode {
    /// Per-step node updates (the mode the relay consumes).
    Updates,
    /// Full state after each step.
    Values,
    /// Token-level message chunks.
    Messages,
}

/// State reported by one node in one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeUpdate {
    /// Node name, e.g. `supervisor` or a sub-agent name.
    pub node: String,
    /// Messages in the node's reported state; absent means none.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// One step of graph execution: node updates in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateBatch {
    pub nodes: Vec<NodeUpdate>,
}

impl UpdateBatch {
    pub fn new(nodes: Vec<NodeUpdate>) -> Self {
        Self { nodes }
    }

    /// Batch with a single reporting node.
    pub fn single(node: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            nodes: vec![NodeUpdate {
                node: node.into(),
                messages,
            }],
        }
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.node.as_str())
    }

    /// Total number of messages across all nodes (before any filtering).
    pub fn message_count(&self) -> usize {
        self.nodes.iter().map(|n| n.messages.len()).sum()
    }
}

/// Incremental update source: the graph execution engine as seen by the relay.
///
/// Given the initial message list and a stream mode, returns a finite, non-restartable stream
/// of `(mode, batch)` pairs in execution order. Errors are yielded as items and end the run.
pub trait UpdateSource: Send + Sync {
    fn stream(
        &self,
        input: Vec<Message>,
        mode: StreamMode,
    ) -> BoxStream<'_, (StreamMode, UpdateBatch)>;
}

impl<T: UpdateSource + ?Sized> UpdateSource for Box<T> {
    fn stream(
        &self,
        input: Vec<Message>,
        mode: StreamMode,
    ) -> BoxStream<'_, (StreamMode, UpdateBatch)> {
        (**self).stream(input, mode)
    }
}

impl<T: UpdateSource + ?Sized> UpdateSource for std::sync::Arc<T> {
    fn stream(
        &self,
        input: Vec<Message>,
        mode: StreamMode,
    ) -> BoxStream<'_, (StreamMode, UpdateBatch)> {
        (**self).stream(input, mode)
    }
}
