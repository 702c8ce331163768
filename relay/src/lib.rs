//! # Relay
//!
//! Turns the incremental update stream of a multi-node agent graph into a clean, ordered,
//! de-duplicated stream of Responses-style output events.
//!
//! A graph engine ([`UpdateSource`]) reports, once per executed step, every node's view of the
//! conversation. Those views overlap: already delivered messages are reported again and the
//! caller's own input is echoed back on the first step. Relay keeps what is new, announces
//! each node as execution enters it, unwraps structured model replies to their text, and
//! hands the result to an [`OutputItemTranslator`].
//!
//! ## Main modules
//!
//! - [`stream`]: [`UpdateSource`], [`UpdateBatch`], [`StreamMode`], [`BoxStream`].
//! - [`dedup`]: [`DeduplicationState`], [`dedup_stream`], node markers.
//! - [`normalize`]: [`normalize_message`], [`ParsedContent`].
//! - [`translate`]: [`OutputItemTranslator`], [`ResponsesItemTranslator`].
//! - [`agent`]: [`ResponsesAgent`] with `predict` / `predict_stream`.
//! - [`request`]: [`ResponsesAgentRequest`], [`to_chat_completions_input`].
//! - [`scripted`]: [`ScriptedSource`] and [`Transcript`] for replaying recorded runs.
//! - [`tool_source`]: [`ToolSource`] and the built-in investigation tools.
//!
//! ## Example
//!
//! ```rust
//! use relay::{
//!     InputItem, Message, ResponsesAgent, ResponsesAgentRequest, ScriptedSource, UpdateBatch,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let source = ScriptedSource::new(vec![
//!     UpdateBatch::single("supervisor", vec![Message::user("1", "Hi")]),
//!     UpdateBatch::single("supervisor", vec![Message::assistant("2", "Hey there!")]),
//! ]);
//! let agent = ResponsesAgent::new(source);
//! let response = agent
//!     .predict(ResponsesAgentRequest::new(vec![InputItem::user("Hi")]))
//!     .await
//!     .unwrap();
//! assert_eq!(response.output.len(), 2); // marker + reply
//! # }
//! ```

pub mod agent;
pub mod dedup;
pub mod error;
pub mod message;
pub mod normalize;
pub mod request;
pub mod scripted;
pub mod stream;
pub mod tool_source;
pub mod translate;

pub use agent::ResponsesAgent;
pub use dedup::{dedup_stream, node_marker, node_marker_text, DeduplicationState, NodeStep};
pub use error::RelayError;
pub use message::{ContentPart, Message, MessageContent, Role, ToolCall};
pub use normalize::{normalize_message, parse_content, ParsedContent};
pub use request::{
    to_chat_completions_input, InputItem, RequestError, ResponsesAgentRequest,
    ResponsesAgentResponse,
};
pub use scripted::{ScriptedSource, Transcript, TranscriptError, START_NODE};
pub use stream::{
    BoxStream, NodeUpdate, OutputItem, StreamEvent, StreamMode, UpdateBatch, UpdateSource,
};
pub use tool_source::{
    CurrentTimeTool, IpReputationTool, SecurityToolsSource, Tool, ToolCallContent, ToolSource,
    ToolSourceError, ToolSpec, TOOL_CHECK_IP_REPUTATION, TOOL_GET_CURRENT_TIME,
};
pub use translate::{OutputItemTranslator, ResponsesItemTranslator};

/// When running `cargo test -p relay`, initializes tracing from `RUST_LOG` so that unit tests
/// in `src/**` can print logs with `--nocapture`.
#[cfg(test)]
mod test_logging {
    use ctor::ctor;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::Layer;

    #[ctor]
    fn init() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_filter(filter),
            )
            .try_init();
    }
}
