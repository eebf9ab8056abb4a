// src/run.rs

use std::path::Path;

use libc::c_int;
use tracing::subscriber::with_default;

use crate::config::LaunchConfig;
use crate::entry::EntryPoint;
use crate::invoke::Invoker;
use crate::{ForkitError, Result};
use logging::subscriber;

/// Run `entry` on a worker thread with `cfg` applied.
///
/// The logging configuration in `cfg` is installed for the duration of the
/// call only, on both the calling and the worker thread.
pub fn create_forkit_with_config<P, I, S, E>(
    path: P,
    args: I,
    entry: &E,
    cfg: &LaunchConfig,
) -> Result<c_int>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    E: EntryPoint + ?Sized,
{
    let sub = subscriber(cfg.subscriber_config()).map_err(ForkitError::Logging)?;
    let invoker = Invoker::new(cfg);
    with_default(sub, || invoker.invoke(path, args, entry))
}

/// Run `entry` on a worker thread named `debug_forkit` and return its status.
///
/// Events go to whichever `tracing` subscriber is already active.
pub fn create_forkit<P, I, S, E>(path: P, args: I, entry: &E) -> Result<c_int>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    E: EntryPoint + ?Sized,
{
    Invoker::default().invoke(path, args, entry)
}
