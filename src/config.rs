// src/config.rs

use logging::{DebugFlag, InfoFlag, LogFile, LogFormat, StderrMode, SubscriberConfig};

/// Name given to the worker thread that runs the entry point.
pub const DEFAULT_THREAD_NAME: &str = "debug_forkit";

/// Configuration for a launch.
#[derive(Clone, Debug)]
pub struct LaunchConfig {
    pub log_format: LogFormat,
    pub verbose: u8,
    pub info: Vec<InfoFlag>,
    pub debug: Vec<DebugFlag>,
    pub quiet: bool,
    pub stderr: StderrMode,
    pub log_file: Option<LogFile>,
    pub syslog: bool,
    pub journald: bool,
    pub colored: bool,
    pub timestamps: bool,
    pub thread_name: String,
    /// Worker stack size in bytes. `None` keeps the platform default.
    pub stack_size: Option<usize>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Text,
            verbose: 0,
            info: Vec::new(),
            debug: Vec::new(),
            quiet: false,
            stderr: StderrMode::Errors,
            log_file: None,
            syslog: false,
            journald: false,
            colored: true,
            timestamps: false,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            stack_size: None,
        }
    }
}

impl LaunchConfig {
    /// Create a new builder for [`LaunchConfig`].
    pub fn builder() -> LaunchConfigBuilder {
        LaunchConfigBuilder::default()
    }

    /// The logging half of this configuration.
    pub fn subscriber_config(&self) -> SubscriberConfig {
        SubscriberConfig::builder()
            .format(self.log_format)
            .verbose(self.verbose)
            .info(&self.info)
            .debug(&self.debug)
            .quiet(self.quiet)
            .stderr(self.stderr)
            .log_file(self.log_file.clone())
            .syslog(self.syslog)
            .journald(self.journald)
            .colored(self.colored)
            .timestamps(self.timestamps)
            .build()
    }
}

/// Builder for [`LaunchConfig`].
#[derive(Debug, Default)]
#[must_use]
pub struct LaunchConfigBuilder {
    cfg: LaunchConfig,
}

impl LaunchConfigBuilder {
    pub fn log_format(mut self, log_format: LogFormat) -> Self {
        self.cfg.log_format = log_format;
        self
    }

    pub fn verbose(mut self, verbose: u8) -> Self {
        self.cfg.verbose = verbose;
        self
    }

    pub fn info<I>(mut self, info: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<InfoFlag>,
    {
        let mut info = info.into_iter().map(Into::into).collect::<Vec<_>>();
        info.sort_by_key(|flag| flag.as_str());
        info.dedup();
        self.cfg.info = info;
        self
    }

    pub fn debug<I>(mut self, debug: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DebugFlag>,
    {
        let mut debug = debug.into_iter().map(Into::into).collect::<Vec<_>>();
        debug.sort_by_key(|flag| flag.as_str());
        debug.dedup();
        self.cfg.debug = debug;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.cfg.quiet = quiet;
        self
    }

    pub fn stderr(mut self, stderr: StderrMode) -> Self {
        self.cfg.stderr = stderr;
        self
    }

    pub fn log_file(mut self, log_file: Option<LogFile>) -> Self {
        self.cfg.log_file = log_file;
        self
    }

    pub fn syslog(mut self, enable: bool) -> Self {
        self.cfg.syslog = enable;
        self
    }

    pub fn journald(mut self, enable: bool) -> Self {
        self.cfg.journald = enable;
        self
    }

    pub fn colored(mut self, enable: bool) -> Self {
        self.cfg.colored = enable;
        self
    }

    pub fn timestamps(mut self, enable: bool) -> Self {
        self.cfg.timestamps = enable;
        self
    }

    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.cfg.thread_name = name.into();
        self
    }

    pub fn stack_size(mut self, bytes: Option<usize>) -> Self {
        self.cfg.stack_size = bytes;
        self
    }

    pub fn build(self) -> LaunchConfig {
        self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_name_the_worker() {
        let cfg = LaunchConfig::default();
        assert_eq!(cfg.thread_name, "debug_forkit");
        assert_eq!(cfg.stack_size, None);
    }

    #[test]
    fn info_dedupes_flags() {
        let cfg = LaunchConfig::builder()
            .info([InfoFlag::Exit, InfoFlag::Launch, InfoFlag::Exit])
            .build();
        assert_eq!(cfg.info, vec![InfoFlag::Exit, InfoFlag::Launch]);
    }

    #[test]
    fn debug_dedupes_flags() {
        let cfg = LaunchConfig::builder()
            .debug([DebugFlag::Thread, DebugFlag::Argv, DebugFlag::Thread])
            .build();
        assert_eq!(cfg.debug, vec![DebugFlag::Argv, DebugFlag::Thread]);
    }

    #[test]
    fn debug_repeated_calls_overwrite() {
        let cfg = LaunchConfig::builder()
            .debug([DebugFlag::Argv])
            .debug([DebugFlag::Thread])
            .build();
        assert_eq!(cfg.debug, vec![DebugFlag::Thread]);
    }

    #[test]
    fn subscriber_config_carries_logging_fields() {
        let cfg = LaunchConfig::builder()
            .log_format(LogFormat::Json)
            .verbose(2)
            .info([InfoFlag::Launch])
            .quiet(true)
            .log_file(Some(LogFile::text("forkit.log")))
            .colored(false)
            .timestamps(true)
            .thread_name("other")
            .build();
        let sub = cfg.subscriber_config();
        assert_eq!(sub.format, LogFormat::Json);
        assert_eq!(sub.verbose, 2);
        assert_eq!(sub.info, vec![InfoFlag::Launch]);
        assert!(sub.quiet);
        assert_eq!(sub.log_file, Some(LogFile::text("forkit.log")));
        assert!(!sub.colored);
        assert!(sub.timestamps);
    }

    #[test]
    fn debug_output_available() {
        let cfg = LaunchConfig::builder().quiet(true).build();
        assert!(format!("{cfg:?}").contains("quiet: true"));
        assert!(format!("{:?}", LaunchConfig::builder()).contains("LaunchConfigBuilder"));
    }
}
