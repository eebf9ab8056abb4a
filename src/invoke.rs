// src/invoke.rs

use std::io;
use std::panic;
use std::path::Path;
use std::thread;

use argv::ArgVector;
use libc::c_int;
use tracing::{debug, info};

use crate::config::{DEFAULT_THREAD_NAME, LaunchConfig};
use crate::entry::EntryPoint;
use crate::{ForkitError, Result};

/// Runs an entry point on a dedicated, named worker thread and waits for it.
#[derive(Clone, Debug)]
pub struct Invoker {
    thread_name: String,
    stack_size: Option<usize>,
}

impl Default for Invoker {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            stack_size: None,
        }
    }
}

impl Invoker {
    pub fn new(cfg: &LaunchConfig) -> Self {
        Self {
            thread_name: cfg.thread_name.clone(),
            stack_size: cfg.stack_size,
        }
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// Marshal `args` and run `entry` with them on a worker thread.
    ///
    /// `path` is only logged. The call blocks until the worker finishes and
    /// returns the entry point's status unchanged. There is no timeout: an
    /// entry point that never returns blocks the caller forever.
    ///
    /// # Errors
    ///
    /// Returns [`ForkitError::Argv`] if an argument cannot be marshaled, in
    /// which case `entry` is never run, and [`ForkitError::Spawn`] if the
    /// worker thread cannot be created, including when the configured thread
    /// name contains a NUL byte.
    ///
    /// # Panics
    ///
    /// A panic inside `entry` is re-raised on the calling thread once the
    /// worker has been joined and the argument vector released.
    pub fn invoke<P, I, S, E>(&self, path: P, args: I, entry: &E) -> Result<c_int>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: EntryPoint + ?Sized,
    {
        let path = path.as_ref();
        info!(target: "info::launch", path = %path.display(), "forkit path");
        let argv = ArgVector::new(args)?;
        self.invoke_marshaled(path, argv, entry)
    }

    /// Like [`Invoker::invoke`] for an already marshaled argument vector.
    /// The vector is consumed and released after the worker is joined.
    pub fn invoke_marshaled<E>(&self, path: &Path, mut argv: ArgVector, entry: &E) -> Result<c_int>
    where
        E: EntryPoint + ?Sized,
    {
        if self.thread_name.contains('\0') {
            return Err(ForkitError::Spawn(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("thread name {:?} contains a NUL byte", self.thread_name),
            )));
        }
        debug!(
            target: "debug::argv",
            argc = argv.argc(),
            bytes = argv.byte_len(),
            path = %path.display(),
            "argument vector ready"
        );
        info!(
            target: "info::launch",
            thread = %self.thread_name,
            "Run forkit main on a separate thread"
        );
        let joined = self.run_on_worker(&mut argv, entry);
        drop(argv);
        let code = joined?;
        info!(target: "info::exit", result = code, "forkit thread completed");
        Ok(code)
    }

    fn run_on_worker<E>(&self, argv: &mut ArgVector, entry: &E) -> Result<c_int>
    where
        E: EntryPoint + ?Sized,
    {
        // Worker events go to whatever subscriber the caller has in scope.
        let dispatch = tracing::dispatcher::get_default(|d| d.clone());
        let mut builder = thread::Builder::new().name(self.thread_name.clone());
        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }
        thread::scope(|scope| {
            let handle = builder
                .spawn_scoped(scope, || {
                    tracing::dispatcher::with_default(&dispatch, || {
                        debug!(target: "debug::thread", argc = argv.argc(), "worker started");
                        let code = entry.run(argv);
                        debug!(target: "debug::thread", code, "worker finished");
                        code
                    })
                })
                .map_err(ForkitError::Spawn)?;
            match handle.join() {
                Ok(code) => Ok(code),
                Err(payload) => panic::resume_unwind(payload),
            }
        })
    }
}
