// crates/logging/src/lib.rs

//! `tracing` setup shared by the debug launcher.
//!
//! Events are filtered by verbosity and per-target flags, then written to the
//! console, an optional log file and, on Unix, syslog or journald.

mod flags;
mod formatter;
mod json_format;
mod sink;
mod subscriber;

pub use flags::{
    DebugFlag, InfoFlag, LogFile, LogFormat, StderrMode, SubscriberConfig,
    SubscriberConfigBuilder,
};
pub use formatter::ForkitFormatter;
pub use json_format::JsonFormatter;
pub use subscriber::{init, subscriber};
