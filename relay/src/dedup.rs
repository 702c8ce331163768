//! Stream de-duplication and event translation.
//!
//! Turns the engine's per-step [`UpdateBatch`]es into an ordered, non-redundant stream of
//! [`StreamEvent`]s:
//!
//! 1. Messages whose id was already emitted (or consumed as input echo) are dropped.
//! 2. On the first batch, the first `echo_len` new messages are the engine's echo of the
//!    caller's input: they are marked seen and never emitted.
//! 3. On every later batch, each reporting node gets a synthetic node-entered marker
//!    (`<name>{node}</name>` text item), even when it contributed no new message.
//! 4. New messages are normalized ([`normalize_message`]) and handed to the translator.
//!
//! State lives in a [`DeduplicationState`] owned by one stream; nothing is shared between
//! calls.

use std::collections::HashSet;

use futures::StreamExt;
use uuid::Uuid;

use crate::message::Message;
use crate::normalize::normalize_message;
use crate::stream::{BoxStream, OutputItem, StreamEvent, StreamMode, UpdateBatch};
use crate::translate::OutputItemTranslator;

/// Renders the marker text announcing that execution entered `node`.
pub fn node_marker_text(node: &str) -> String {
    format!("<name>{node}</name>")
}

/// Synthetic node-entered event: a completed text item with a fresh id.
pub fn node_marker(node: &str) -> StreamEvent {
    StreamEvent::item_done(OutputItem::text(
        Uuid::new_v4().to_string(),
        node_marker_text(node),
    ))
}

/// New messages of one step, grouped by the node that reported them.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStep {
    /// Node to announce before the messages; `None` on the first batch (no marker).
    pub node: Option<String>,
    /// Messages never seen before, in arrival order.
    pub messages: Vec<Message>,
}

/// Per-stream de-duplication state.
#[derive(Debug)]
pub struct DeduplicationState {
    seen_ids: HashSet<String>,
    first_batch: bool,
    echo_len: usize,
}

impl DeduplicationState {
    /// State for a stream whose initial input had `echo_len` messages.
    pub fn new(echo_len: usize) -> Self {
        Self {
            seen_ids: HashSet::new(),
            first_batch: true,
            echo_len,
        }
    }

    pub fn is_first_batch(&self) -> bool {
        self.first_batch
    }

    pub fn has_seen(&self, id: &str) -> bool {
        self.seen_ids.contains(id)
    }

    /// Admits one batch: filters seen ids, strips the input echo on the first batch, and
    /// marks every returned message as seen.
    ///
    /// The first batch yields one unannounced step. Later batches yield one step per node,
    /// in arrival order; a batch with no node yields nothing.
    pub fn admit(&mut self, batch: UpdateBatch) -> Vec<NodeStep> {
        let seen = &mut self.seen_ids;

        if self.first_batch {
            self.first_batch = false;
            let mut fresh: Vec<Message> = batch
                .nodes
                .into_iter()
                .flat_map(|n| n.messages)
                .filter(|m| seen.insert(m.id.clone()))
                .collect();
            let echoed = self.echo_len.min(fresh.len());
            fresh.drain(..echoed);
            tracing::debug!(
                echoed,
                fresh = fresh.len(),
                "first batch: input echo dropped"
            );
            return vec![NodeStep {
                node: None,
                messages: fresh,
            }];
        }

        if batch.nodes.is_empty() {
            tracing::warn!("update batch reported no node; nothing to announce");
            return Vec::new();
        }
        if batch.nodes.len() > 1 {
            tracing::debug!(
                nodes = batch.nodes.len(),
                "update batch reported several nodes"
            );
        }

        batch
            .nodes
            .into_iter()
            .map(|update| NodeStep {
                messages: update
                    .messages
                    .into_iter()
                    .filter(|m| seen.insert(m.id.clone()))
                    .collect(),
                node: Some(update.node),
            })
            .collect()
    }
}

/// Relays `batches` as de-duplicated, translated events.
///
/// Pull-based: nothing runs until the returned stream is polled, and at most one batch is
/// held at a time. The first error from the source or the translator is yielded and ends
/// the stream.
pub fn dedup_stream<'a, T>(
    echo_len: usize,
    mut batches: BoxStream<'a, (StreamMode, UpdateBatch)>,
    translator: &'a T,
) -> BoxStream<'a, StreamEvent>
where
    T: OutputItemTranslator + ?Sized,
{
    Box::pin(async_stream::stream! {
        let mut state = DeduplicationState::new(echo_len);
        let mut steps = 0usize;

        while let Some(next) = batches.next().await {
            let batch = match next {
                Ok((_mode, batch)) => batch,
                Err(e) => {
                    tracing::debug!(error = %e, steps, "update source failed");
                    yield Err(e);
                    return;
                }
            };
            steps += 1;

            for step in state.admit(batch) {
                if let Some(node) = step.node.as_deref() {
                    tracing::debug!(node, new_messages = step.messages.len(), "node entered");
                    yield Ok(node_marker(node));
                }
                if step.messages.is_empty() {
                    continue;
                }
                let normalized: Vec<Message> =
                    step.messages.into_iter().map(normalize_message).collect();
                let mut items = translator.translate(normalized);
                while let Some(item) = items.next().await {
                    let failed = item.is_err();
                    yield item;
                    if failed {
                        return;
                    }
                }
            }
        }
        tracing::info!(steps, "update stream complete");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::NodeUpdate;

    fn ids(step: &NodeStep) -> Vec<&str> {
        step.messages.iter().map(|m| m.id.as_str()).collect()
    }

    /// **Scenario**: first batch of only the echo yields no messages and marks the echo seen.
    #[test]
    fn echo_only_first_batch() {
        let mut state = DeduplicationState::new(1);
        let batch = UpdateBatch::single("supervisor", vec![Message::user("1", "Hi")]);
        let steps = state.admit(batch);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].node, None);
        assert!(steps[0].messages.is_empty());
        assert!(state.has_seen("1"));
        assert!(!state.is_first_batch());
    }

    /// **Scenario**: output produced in the same step as the echo survives, unannounced.
    #[test]
    fn first_batch_keeps_messages_after_echo() {
        let mut state = DeduplicationState::new(2);
        let steps = state.admit(UpdateBatch::single(
            "agent",
            vec![
                Message::system("s", "sys"),
                Message::user("u", "Hi"),
                Message::assistant("a", "Hello"),
            ],
        ));
        assert_eq!(ids(&steps[0]), ["a"]);
        assert!(state.has_seen("a"));
    }

    /// **Scenario**: a shorter-than-echo first batch drops everything it has.
    #[test]
    fn first_batch_shorter_than_echo() {
        let mut state = DeduplicationState::new(3);
        let batch = UpdateBatch::single("agent", vec![Message::user("u", "Hi")]);
        let steps = state.admit(batch);
        assert!(steps[0].messages.is_empty());
    }

    /// **Scenario**: a repeated id is dropped, a new one kept, and the node still announced.
    #[test]
    fn repeated_id_filtered_new_kept() {
        let mut state = DeduplicationState::new(0);
        state.admit(UpdateBatch::default());
        let reply = Message::assistant("2", "a");
        state.admit(UpdateBatch::single("supervisor", vec![reply]));
        let steps = state.admit(UpdateBatch::single(
            "supervisor",
            vec![Message::assistant("2", "a"), Message::assistant("3", "b")],
        ));
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].node.as_deref(), Some("supervisor"));
        assert_eq!(ids(&steps[0]), ["3"]);
    }

    /// **Scenario**: every node of a multi-node batch gets its own step, in arrival order;
    /// an id reported by two nodes is kept only under the first.
    #[test]
    fn multi_node_batch_one_step_per_node() {
        let mut state = DeduplicationState::new(0);
        state.admit(UpdateBatch::default());
        let steps = state.admit(UpdateBatch::new(vec![
            NodeUpdate {
                node: "triage".into(),
                messages: vec![Message::assistant("x", "a")],
            },
            NodeUpdate {
                node: "investigator".into(),
                messages: vec![Message::assistant("x", "a"), Message::assistant("y", "b")],
            },
        ]));
        let nodes: Vec<_> = steps.iter().map(|s| s.node.as_deref()).collect();
        assert_eq!(nodes, [Some("triage"), Some("investigator")]);
        assert_eq!(ids(&steps[0]), ["x"]);
        assert_eq!(ids(&steps[1]), ["y"]);
    }

    /// **Scenario**: a later batch without any node produces no step.
    #[test]
    fn empty_later_batch_yields_nothing() {
        let mut state = DeduplicationState::new(0);
        state.admit(UpdateBatch::default());
        assert!(state.admit(UpdateBatch::default()).is_empty());
    }

    #[test]
    fn marker_text_format() {
        assert_eq!(node_marker_text("supervisor"), "<name>supervisor</name>");
        let item = node_marker("tools").into_done_item().unwrap();
        assert_eq!(
            item.message_text().as_deref(),
            Some("<name>tools</name>")
        );
    }
}
