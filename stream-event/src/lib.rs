//! Responses stream event protocol: type + payload + envelope.
//!
//! This crate defines the wire shape of a single output item, the stream events that carry
//! them, and sequence-number envelope injection. It does not depend on relay; relay produces
//! [`StreamEvent`] values and callers render them with [`to_json`].

pub mod envelope;
pub mod event;
pub mod item;

pub use envelope::{to_json, Envelope, EnvelopeState};
pub use event::{StreamEvent, OUTPUT_ITEM_DONE, OUTPUT_TEXT_DELTA};
pub use item::{OutputContent, OutputItem, SummaryText};
