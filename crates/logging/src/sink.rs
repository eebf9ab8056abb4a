// crates/logging/src/sink.rs
use std::fs::File;
use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::writer::MakeWriter;

use crate::flags::StderrMode;

/// Console writer routing each event to stdout or stderr.
pub(crate) struct LogWriter {
    pub(crate) mode: StderrMode,
}

pub(crate) enum ConsoleWriter {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            ConsoleWriter::Stdout(out) => out.write(buf),
            ConsoleWriter::Stderr(err) => err.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ConsoleWriter::Stdout(out) => out.flush(),
            ConsoleWriter::Stderr(err) => err.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::Stderr(io::stderr())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        match self.mode {
            StderrMode::All => ConsoleWriter::Stderr(io::stderr()),
            StderrMode::Errors if *meta.level() <= Level::WARN => {
                ConsoleWriter::Stderr(io::stderr())
            }
            StderrMode::Errors => ConsoleWriter::Stdout(io::stdout()),
        }
    }
}

/// Append-mode file writer shared by every event.
pub(crate) struct FileWriter {
    pub(crate) file: File,
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = &'a File;

    fn make_writer(&'a self) -> Self::Writer {
        &self.file
    }
}
