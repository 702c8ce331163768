//! `relay replay`: run a recorded transcript through the relay.

use std::path::PathBuf;

use futures_util::StreamExt;
use relay::{InputItem, ResponsesAgent, ResponsesAgentResponse, Transcript};
use serde_json::Value;
use stream_event::EnvelopeState;
use tracing::Instrument;

use crate::{parse_json_arg, CliError};

/// Options for one replay.
#[derive(Clone, Debug, Default)]
pub struct ReplayOptions {
    pub transcript: PathBuf,
    /// Extra user turn appended to the transcript's input.
    pub message: Option<String>,
    /// JSON object replacing the transcript's `custom_inputs`.
    pub custom_inputs: Option<String>,
    /// Response id stamped on streamed events; a fresh one when `None`.
    pub response_id: Option<String>,
}

impl ReplayOptions {
    fn load(&self) -> Result<Transcript, CliError> {
        let mut transcript = Transcript::from_path(&self.transcript)?;
        if let Some(message) = &self.message {
            transcript.input.push(InputItem::user(message.as_str()));
        }
        if let Some(raw) = &self.custom_inputs {
            transcript.custom_inputs = Some(parse_json_arg("--custom-inputs", raw)?);
        }
        tracing::debug!(
            path = %self.transcript.display(),
            batches = transcript.batches.len(),
            "transcript loaded"
        );
        Ok(transcript)
    }
}

/// Replays the transcript with `predict` and returns the aggregated response.
pub async fn replay(opts: &ReplayOptions) -> Result<ResponsesAgentResponse, CliError> {
    let transcript = opts.load()?;
    let agent = ResponsesAgent::new(transcript.source());
    Ok(agent.predict(transcript.request()).await?)
}

/// Replays the transcript with `predict_stream`, handing each event (with `response_id` and
/// `sequence_number`) to `sink` as it is produced. Returns the number of events.
pub async fn replay_events<F>(opts: &ReplayOptions, mut sink: F) -> Result<u64, CliError>
where
    F: FnMut(Value) -> Result<(), CliError>,
{
    let transcript = opts.load()?;
    let agent = ResponsesAgent::new(transcript.source());
    let response_id = opts
        .response_id
        .clone()
        .unwrap_or_else(|| format!("resp_{}", uuid::Uuid::new_v4().simple()));
    let mut envelope = EnvelopeState::new(response_id);

    let span = tracing::info_span!("replay", response_id = %envelope.response_id);

    async {
        let mut events = agent.predict_stream(transcript.request());
        while let Some(event) = events.next().await {
            sink(stream_event::to_json(&event?, &mut envelope)?)?;
        }
        Ok::<_, CliError>(())
    }
    .instrument(span)
    .await?;
    Ok(envelope.next_sequence_number)
}
