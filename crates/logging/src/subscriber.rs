// crates/logging/src/subscriber.rs
#![allow(missing_docs)]

use crate::flags::{LogFile, LogFormat, SubscriberConfig};
use crate::formatter::ForkitFormatter;
use crate::json_format::JsonFormatter;
use crate::sink::{FileWriter, LogWriter};
use std::fs::OpenOptions;
use std::io;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, filter::Directive, fmt as tracing_fmt, layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[cfg(all(unix, any(feature = "syslog", feature = "journald")))]
mod datagram {
    use std::fmt;
    use std::os::unix::net::UnixDatagram;
    use std::path::PathBuf;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer};

    pub(super) const IDENTIFIER: &str = "forkit";

    #[derive(Clone, Copy, Debug)]
    pub(super) enum Framing {
        #[cfg(feature = "syslog")]
        Syslog,
        #[cfg(feature = "journald")]
        Journald,
    }

    impl Framing {
        fn socket_path(self) -> PathBuf {
            let (var, default) = match self {
                #[cfg(feature = "syslog")]
                Framing::Syslog => ("FORKIT_SYSLOG_PATH", "/dev/log"),
                #[cfg(feature = "journald")]
                Framing::Journald => ("FORKIT_JOURNALD_PATH", "/run/systemd/journal/socket"),
            };
            std::env::var_os(var)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        }

        pub(super) fn frame(self, level: Level, msg: &str) -> String {
            match self {
                #[cfg(feature = "syslog")]
                Framing::Syslog => format!(
                    "<{}>{IDENTIFIER}[{}]: {msg}",
                    8 + severity(level),
                    std::process::id()
                ),
                #[cfg(feature = "journald")]
                Framing::Journald => format!(
                    "PRIORITY={}\nSYSLOG_IDENTIFIER={IDENTIFIER}\nMESSAGE={msg}\n",
                    severity(level)
                ),
            }
        }
    }

    fn severity(level: Level) -> u8 {
        match level {
            Level::ERROR => 3,
            Level::WARN => 4,
            Level::INFO => 6,
            Level::DEBUG | Level::TRACE => 7,
        }
    }

    struct MessageVisitor {
        msg: String,
    }

    impl MessageVisitor {
        fn push(&mut self, name: &str, value: &str) {
            if !self.msg.is_empty() {
                self.msg.push(' ');
            }
            if name != "message" {
                self.msg.push_str(name);
                self.msg.push('=');
            }
            self.msg.push_str(value);
        }
    }

    impl Visit for MessageVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.push(field.name(), value);
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.push(field.name(), &format!("{value:?}"));
        }
    }

    /// Forwards every event as one datagram to a local log daemon.
    pub(super) struct DatagramLayer {
        sock: UnixDatagram,
        framing: Framing,
    }

    impl DatagramLayer {
        pub(super) fn connect(framing: Framing) -> std::io::Result<Self> {
            let sock = UnixDatagram::unbound()?;
            sock.connect(framing.socket_path())?;
            Ok(Self { sock, framing })
        }
    }

    impl<S> Layer<S> for DatagramLayer
    where
        S: Subscriber,
    {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut v = MessageVisitor { msg: String::new() };
            event.record(&mut v);
            if v.msg.is_empty() {
                v.msg.push_str(event.metadata().target());
            }
            let data = self.framing.frame(*event.metadata().level(), &v.msg);
            let _ = self.sock.send(data.as_bytes());
        }
    }
}

fn level_for(cfg: &SubscriberConfig) -> LevelFilter {
    let mut level = if cfg.quiet {
        LevelFilter::ERROR
    } else if cfg.verbose > 2 {
        LevelFilter::TRACE
    } else if cfg.verbose > 1 {
        LevelFilter::DEBUG
    } else if cfg.verbose > 0 {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    if !cfg.quiet {
        if !cfg.debug.is_empty() && level < LevelFilter::DEBUG {
            level = LevelFilter::DEBUG;
        } else if !cfg.info.is_empty() && level < LevelFilter::INFO {
            level = LevelFilter::INFO;
        }
    }
    level
}

fn directive(text: String) -> io::Result<Directive> {
    text.parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn build_filter(cfg: &SubscriberConfig) -> io::Result<EnvFilter> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(level_for(cfg).into())
        .from_env_lossy();
    if !cfg.quiet {
        for flag in &cfg.info {
            filter = filter.add_directive(directive(format!("{}=info", flag.target()))?);
        }
        for flag in &cfg.debug {
            filter = filter.add_directive(directive(format!("{}=trace", flag.target()))?);
        }
    }
    Ok(filter)
}

/// Build a [`tracing`] subscriber from `cfg`.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a flag directive does not parse.
/// Syslog and journald sockets that cannot be reached are skipped silently.
pub fn subscriber(cfg: SubscriberConfig) -> io::Result<Box<dyn tracing::Subscriber + Send + Sync>> {
    let filter = build_filter(&cfg)?;

    let base = tracing_fmt::layer()
        .with_writer(LogWriter { mode: cfg.stderr })
        .with_ansi(cfg.colored);
    let console = match cfg.format {
        LogFormat::Json => base.event_format(JsonFormatter).boxed(),
        LogFormat::Text => base
            .event_format(ForkitFormatter::new(cfg.timestamps))
            .boxed(),
    };

    let file = match &cfg.log_file {
        Some(LogFile { path, format }) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let base = tracing_fmt::layer()
                .with_writer(FileWriter { file })
                .with_ansi(false);
            Some(match format {
                LogFormat::Json => base.event_format(JsonFormatter).boxed(),
                // Files always carry timestamps.
                LogFormat::Text => base.event_format(ForkitFormatter::new(true)).boxed(),
            })
        }
        None => None,
    };

    #[cfg(all(unix, feature = "syslog"))]
    let syslog_layer = cfg
        .syslog
        .then(|| datagram::DatagramLayer::connect(datagram::Framing::Syslog).ok())
        .flatten();
    #[cfg(not(all(unix, feature = "syslog")))]
    let syslog_layer: Option<tracing_subscriber::layer::Identity> = None;

    #[cfg(all(unix, feature = "journald"))]
    let journald_layer = cfg
        .journald
        .then(|| datagram::DatagramLayer::connect(datagram::Framing::Journald).ok())
        .flatten();
    #[cfg(not(all(unix, feature = "journald")))]
    let journald_layer: Option<tracing_subscriber::layer::Identity> = None;

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .with(syslog_layer)
        .with(journald_layer);
    Ok(Box::new(registry))
}

/// Initialise the global [`tracing`] subscriber.
pub fn init(cfg: SubscriberConfig) -> io::Result<()> {
    subscriber(cfg)?
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}
