// src/entry.rs

use argv::ArgVector;
use libc::{c_char, c_int};

/// Signature of a C `main`-style entry point.
pub type RawEntryFn = unsafe extern "C" fn(argc: c_int, argv: *mut *mut c_char) -> c_int;

/// Something that can be run with an argument vector and yields an exit status.
///
/// The invoker calls [`EntryPoint::run`] exactly once, on the worker thread.
/// The returned status is forwarded to the caller without interpretation.
pub trait EntryPoint: Sync {
    fn run(&self, argv: &mut ArgVector) -> c_int;
}

impl<F> EntryPoint for F
where
    F: Fn(&mut ArgVector) -> c_int + Sync,
{
    fn run(&self, argv: &mut ArgVector) -> c_int {
        self(argv)
    }
}

/// An entry point reached through a raw C function pointer.
#[derive(Clone, Copy, Debug)]
pub struct ForeignEntry {
    f: RawEntryFn,
}

impl ForeignEntry {
    /// # Safety
    ///
    /// `f` must follow the C `main` convention: read at most `argc` entries
    /// from `argv`, never free them and never keep them after returning.
    pub const unsafe fn new(f: RawEntryFn) -> Self {
        Self { f }
    }
}

impl EntryPoint for ForeignEntry {
    fn run(&self, argv: &mut ArgVector) -> c_int {
        // SAFETY: `argv` is a valid null-terminated table of `argc` owned C
        // strings for the whole call, and `new` requires `f` to honour it.
        unsafe { (self.f)(argv.argc(), argv.as_mut_ptr()) }
    }
}

#[cfg(feature = "forkit")]
unsafe extern "C" {
    fn forkit_main(argc: c_int, argv: *mut *mut c_char) -> c_int;
}

/// The linked `forkit_main` supervisor entry point.
#[cfg(feature = "forkit")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ForkitMain;

#[cfg(feature = "forkit")]
impl EntryPoint for ForkitMain {
    fn run(&self, argv: &mut ArgVector) -> c_int {
        // SAFETY: forkit_main is a C main-style function taking (argc, argv).
        unsafe { forkit_main(argv.argc(), argv.as_mut_ptr()) }
    }
}
