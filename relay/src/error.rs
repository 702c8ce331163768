//! Relay error types.
//!
//! A failure anywhere in the pull chain surfaces as one [`RelayError`] item on the output
//! stream, after which the stream ends.

use thiserror::Error;

use crate::request::RequestError;

/// Error surfaced by `predict` / `predict_stream`.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request could not be converted into engine messages.
    #[error("invalid request: {0}")]
    Request(#[from] RequestError),

    /// The update source (graph execution engine) failed mid-stream.
    #[error("update source failed: {0}")]
    Source(String),

    /// The output item translator failed.
    #[error("translator failed: {0}")]
    Translator(String),

    /// A transcript or event could not be (de)serialized.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
