// src/lib.rs

//! In-process debug launcher for the forkit supervisor.
//!
//! In production the supervisor runs as its own exec'd process. For debugging
//! it can instead be linked in and started with [`create_forkit`], which
//! copies the arguments into a C `argv`, calls the entry point on a dedicated
//! worker thread, waits for it and hands back its exit status.
//!
//! ```
//! use debug_forkit::{create_forkit, ArgVector};
//!
//! let entry = |argv: &mut ArgVector| argv.argc();
//! let code = create_forkit("/opt/app/forkit", ["forkit", "--pipe=foo"], &entry).unwrap();
//! assert_eq!(code, 2);
//! ```

use std::io;

use thiserror::Error;

mod config;
mod entry;
mod ffi;
mod invoke;
mod run;

pub use argv::{ArgVector, ArgvError};
pub use config::{DEFAULT_THREAD_NAME, LaunchConfig, LaunchConfigBuilder};
#[cfg(feature = "forkit")]
pub use entry::ForkitMain;
pub use entry::{EntryPoint, ForeignEntry, RawEntryFn};
pub use ffi::collect_c_args;
pub use invoke::Invoker;
pub use logging::{DebugFlag, InfoFlag, LogFile, LogFormat, StderrMode};
pub use run::{create_forkit, create_forkit_with_config};

/// Error type for launch operations.
#[derive(Debug, Error)]
pub enum ForkitError {
    #[error(transparent)]
    Argv(#[from] ArgvError),
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("failed to set up logging: {0}")]
    Logging(#[source] io::Error),
}

/// Result type for launch operations.
pub type Result<T> = std::result::Result<T, ForkitError>;
