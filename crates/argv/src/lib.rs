// crates/argv/src/lib.rs

//! Owned C-style argument vectors.
//!
//! [`ArgVector`] turns an ordered list of strings into the `(argc, argv)` pair
//! expected by a C `main`-like entry point. Every argument is copied into its
//! own NUL-terminated heap buffer and the pointer table always ends with a
//! null entry, so `argv[argc]` is valid to read. All memory is released when
//! the vector is dropped.

use std::ffi::{CStr, CString, OsStr};
use std::fmt;
use std::ptr;

use libc::{c_char, c_int};
use thiserror::Error;

/// Error type for argument marshaling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgvError {
    #[error("argument {index} contains a NUL byte at offset {position}")]
    InteriorNul { index: usize, position: usize },
    #[error("{0} arguments exceed the C argument count range")]
    TooManyArguments(usize),
}

/// Result type for argument marshaling.
pub type Result<T> = std::result::Result<T, ArgvError>;

/// An owned, null-terminated `char **` together with its argument count.
pub struct ArgVector {
    // Each buffer holds the argument bytes followed by exactly one NUL.
    bufs: Vec<Box<[u8]>>,
    // `bufs.len() + 1` entries, the last one null.
    ptrs: Vec<*mut c_char>,
    argc: c_int,
}

// SAFETY: the pointers in `ptrs` only ever point into `bufs`, which the vector
// owns exclusively. Moving the vector to another thread moves that ownership.
unsafe impl Send for ArgVector {}

impl ArgVector {
    /// Marshal UTF-8 arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ArgvError::InteriorNul`] if an argument contains a NUL byte and
    /// [`ArgvError::TooManyArguments`] if the count does not fit a `c_int`.
    pub fn new<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_bytes(args.into_iter().map(|s| s.as_ref().as_bytes().to_vec()))
    }

    /// Marshal platform strings, preserving their raw bytes on Unix.
    pub fn from_os_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self::from_bytes(args.into_iter().map(|s| os_bytes(s.as_ref())))
    }

    /// Marshal arbitrary byte strings.
    pub fn from_bytes<I, B>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        let mut bufs = Vec::new();
        for (index, arg) in args.into_iter().enumerate() {
            let c = CString::new(arg).map_err(|e| ArgvError::InteriorNul {
                index,
                position: e.nul_position(),
            })?;
            bufs.push(c.into_bytes_with_nul().into_boxed_slice());
        }
        let argc = c_int::try_from(bufs.len())
            .map_err(|_| ArgvError::TooManyArguments(bufs.len()))?;
        let mut ptrs: Vec<*mut c_char> = bufs
            .iter_mut()
            .map(|b| b.as_mut_ptr().cast::<c_char>())
            .collect();
        ptrs.push(ptr::null_mut());
        tracing::trace!(target: "debug::argv", argc, "marshaled argument vector");
        Ok(Self { bufs, ptrs, argc })
    }

    /// Number of arguments, excluding the trailing null entry.
    pub fn argc(&self) -> c_int {
        self.argc
    }

    pub fn len(&self) -> usize {
        self.bufs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bufs.is_empty()
    }

    /// Total bytes held by the argument buffers, terminators included.
    pub fn byte_len(&self) -> usize {
        self.bufs.iter().map(|b| b.len()).sum()
    }

    /// Pointer to the argument table. Never null, even for an empty vector.
    ///
    /// The pointer stays valid until the vector is dropped. Callees may write
    /// into the argument strings but must not free them or change the table.
    pub fn as_mut_ptr(&mut self) -> *mut *mut c_char {
        self.ptrs.as_mut_ptr()
    }

    /// Borrow the argument at `index` as a C string.
    pub fn get(&self, index: usize) -> Option<&CStr> {
        self.bufs.get(index).map(|_| self.cstr_at(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CStr> + '_ {
        (0..self.bufs.len()).map(move |i| self.cstr_at(i))
    }

    fn cstr_at(&self, index: usize) -> &CStr {
        // SAFETY: `ptrs[index]` points at the start of `bufs[index]`, which
        // always contains at least one NUL byte (the final one) and lives as
        // long as `self`.
        unsafe { CStr::from_ptr(self.ptrs[index]) }
    }
}

impl fmt::Debug for ArgVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgVector")
            .field("argc", &self.argc)
            .field("args", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(unix)]
fn os_bytes(s: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn os_bytes(s: &OsStr) -> Vec<u8> {
    s.to_string_lossy().into_owned().into_bytes()
}
