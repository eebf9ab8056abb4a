// crates/logging/src/json_format.rs

use serde_json::{Map, Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{Event, Subscriber};
use tracing_serde::{AsSerde, fields::AsMap};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, format::Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::formatter::thread_label;

/// Writes each event as one JSON object per line.
///
/// The event message is lifted to a top-level `message` key; every other
/// field stays under `fields`. `thread` names the thread that emitted the
/// event, so worker output can be told apart from the launching thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormatter;

fn record(event: &Event<'_>) -> serde_json::Result<Value> {
    let meta = event.metadata();
    let mut fields = match serde_json::to_value(event.field_map())? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let message = fields.remove("message").unwrap_or(Value::Null);
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    Ok(json!({
        "timestamp": timestamp,
        "level": meta.level().as_serde(),
        "target": meta.target(),
        "thread": thread_label(),
        "message": message,
        "fields": fields,
    }))
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let line = record(event)
            .and_then(|v| serde_json::to_string(&v))
            .map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{line}")
    }
}
