//! Request/response adapter over an [`UpdateSource`].
//!
//! [`ResponsesAgent::predict_stream`] converts the request, asks the source for `updates`
//! batches and runs them through [`dedup_stream`]. [`ResponsesAgent::predict`] drains that
//! stream and keeps the completed output items.

use futures::{stream, StreamExt};

use crate::dedup::dedup_stream;
use crate::error::RelayError;
use crate::request::{to_chat_completions_input, ResponsesAgentRequest, ResponsesAgentResponse};
use crate::stream::{BoxStream, StreamEvent, StreamMode, UpdateSource};
use crate::translate::{OutputItemTranslator, ResponsesItemTranslator};

/// Responses-style agent wrapping a graph execution engine.
///
/// Holds no per-call state; concurrent `predict_stream` calls each own their de-duplication
/// state.
pub struct ResponsesAgent<S, T = ResponsesItemTranslator> {
    source: S,
    translator: T,
}

impl<S: UpdateSource> ResponsesAgent<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            translator: ResponsesItemTranslator,
        }
    }
}

impl<S, T> ResponsesAgent<S, T>
where
    S: UpdateSource,
    T: OutputItemTranslator,
{
    /// Replaces the output item translator.
    pub fn with_translator<U: OutputItemTranslator>(self, translator: U) -> ResponsesAgent<S, U> {
        ResponsesAgent {
            source: self.source,
            translator,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs the request to completion and returns every `response.output_item.done` item in
    /// stream order. Other event types are dropped. The first stream error is returned.
    pub async fn predict(
        &self,
        request: ResponsesAgentRequest,
    ) -> Result<ResponsesAgentResponse, RelayError> {
        let custom_outputs = request.custom_inputs.clone();
        let mut events = self.predict_stream(request);
        let mut output = Vec::new();
        while let Some(event) = events.next().await {
            if let Some(item) = event?.into_done_item() {
                output.push(item);
            }
        }
        Ok(ResponsesAgentResponse {
            output,
            custom_outputs,
        })
    }

    /// Lazily streams output events for the request.
    ///
    /// An input conversion failure is the single item of the returned stream.
    pub fn predict_stream(&self, request: ResponsesAgentRequest) -> BoxStream<'_, StreamEvent> {
        let messages = match to_chat_completions_input(&request.input) {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!(error = %e, "request conversion failed");
                return Box::pin(stream::iter([Err::<StreamEvent, _>(RelayError::from(e))]));
            }
        };
        tracing::debug!(messages = ?messages, "engine input");

        let echo_len = messages.len();
        let batches = self.source.stream(messages, StreamMode::Updates);
        dedup_stream(echo_len, batches, &self.translator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::request::InputItem;
    use crate::scripted::ScriptedSource;
    use crate::stream::UpdateBatch;

    /// **Scenario**: node markers are completed items, so predict returns them in order with
    /// the messages.
    #[tokio::test]
    async fn predict_keeps_markers_and_messages() {
        let source = ScriptedSource::new(vec![
            UpdateBatch::single("supervisor", vec![Message::user("1", "Hi")]),
            UpdateBatch::single("supervisor", vec![Message::assistant("2", "Hello")]),
        ]);
        let agent = ResponsesAgent::new(source);
        let response = agent
            .predict(ResponsesAgentRequest::new(vec![InputItem::user("Hi")]))
            .await
            .unwrap();
        let texts: Vec<_> = response
            .output
            .iter()
            .filter_map(|i| i.message_text())
            .collect();
        assert_eq!(texts, ["<name>supervisor</name>", "Hello"]);
        assert_eq!(response.custom_outputs, None);
    }

    /// **Scenario**: a request that cannot be converted yields exactly one error item.
    #[tokio::test]
    async fn invalid_request_single_error_item() {
        let agent = ResponsesAgent::new(ScriptedSource::new(vec![]));
        let request = ResponsesAgentRequest::new(vec![InputItem::message("robot", "x")]);
        let items: Vec<_> = agent.predict_stream(request).collect().await;
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(RelayError::Request(_))));
    }
}
