//! Event formatter that prefixes each log line with the active span path.
//!
//! Used by `logging::init()`. A line emitted inside `replay{response_id=..}` reads
//! `TIMESTAMP [replay#1] DEBUG relay::dedup: node entered node="supervisor"`, so the events of
//! one replay can be grepped out of a shared log file by span id.

use std::fmt;

use tracing_core::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

/// Plain-text formatter: `TIMESTAMP [root#id > child#id] LEVEL target: fields`.
///
/// The bracketed span path is omitted for events outside any span.
#[derive(Default)]
pub struct SpanPathFormat {
    timer: SystemTime,
}

impl SpanPathFormat {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, N> FormatEvent<S, N> for SpanPathFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        self.timer.format_time(&mut writer)?;

        if let Some(scope) = ctx.event_scope() {
            let path: Vec<String> = scope
                .from_root()
                .map(|span| format!("{}#{}", span.name(), span.id().into_u64()))
                .collect();
            write!(writer, " [{}]", path.join(" > "))?;
        }

        let meta = event.metadata();
        write!(writer, " {} {}: ", meta.level(), meta.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
