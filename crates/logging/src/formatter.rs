// crates/logging/src/formatter.rs
use std::collections::BTreeMap;
use std::fmt;
use time::{OffsetDateTime, macros::format_description};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, format::Writer};
use tracing_subscriber::registry::LookupSpan;

/// Plain-text event format: `[thread] message key=value ...`, optionally
/// prefixed with a local timestamp.
#[derive(Clone, Debug, Default)]
pub struct ForkitFormatter {
    timestamps: bool,
}

impl ForkitFormatter {
    pub fn new(timestamps: bool) -> Self {
        Self { timestamps }
    }
}

#[derive(Default)]
struct MsgVisitor {
    msg: String,
    fields: BTreeMap<&'static str, String>,
}

impl Visit for MsgVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.msg.push_str(value);
        } else {
            self.fields.insert(field.name(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.msg.push_str(&format!("{value:?}"));
        } else {
            self.fields.insert(field.name(), format!("{value:?}"));
        }
    }
}

pub(crate) fn format_time() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let fmt = format_description!("[year]/[month]/[day] [hour]:[minute]:[second]");
    now.format(&fmt).unwrap_or_default()
}

pub(crate) fn thread_label() -> String {
    let current = std::thread::current();
    match current.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", current.id()),
    }
}

impl<S, N> FormatEvent<S, N> for ForkitFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = MsgVisitor::default();
        event.record(&mut visitor);
        if self.timestamps {
            write!(writer, "{} ", format_time())?;
        }
        write!(writer, "[{}] ", thread_label())?;
        if visitor.msg.is_empty() {
            writer.write_str(event.metadata().target())?;
        } else {
            writer.write_str(&visitor.msg)?;
        }
        for (name, value) in &visitor.fields {
            write!(writer, " {name}={value}")?;
        }
        writer.write_char('\n')
    }
}
