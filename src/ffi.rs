// src/ffi.rs

use std::ffi::CStr;
use std::path::PathBuf;

use libc::{c_char, c_int};

use argv::ArgVector;

use crate::entry::EntryPoint;
use crate::invoke::Invoker;

/// Copy a C `(argc, argv)` pair into owned byte strings.
///
/// Stops early at a null entry. A null `argv` or non-positive `argc` yields
/// an empty list.
///
/// # Safety
///
/// Unless null, `argv` must point at `argc` readable pointers, each null or a
/// valid NUL-terminated string.
pub unsafe fn collect_c_args(argc: c_int, argv: *const *const c_char) -> Vec<Vec<u8>> {
    if argv.is_null() || argc <= 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(argc as usize);
    for i in 0..argc as usize {
        // SAFETY: `i < argc` and the caller guarantees `argc` entries.
        let arg = unsafe { *argv.add(i) };
        if arg.is_null() {
            break;
        }
        // SAFETY: non-null entries are NUL-terminated strings.
        out.push(unsafe { CStr::from_ptr(arg) }.to_bytes().to_vec());
    }
    out
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Run `entry` for a C caller. Failures are logged and reported as `-1`.
///
/// # Safety
///
/// `path` must be null or a valid C string; `argv` as for [`collect_c_args`].
#[cfg_attr(not(feature = "forkit"), allow(dead_code))]
pub(crate) unsafe fn launch_from_c<E>(
    path: *const c_char,
    argc: c_int,
    argv: *const *const c_char,
    entry: &E,
) -> c_int
where
    E: EntryPoint + ?Sized,
{
    let path = if path.is_null() {
        PathBuf::new()
    } else {
        // SAFETY: checked non-null above; validity is the caller's contract.
        path_from_bytes(unsafe { CStr::from_ptr(path) }.to_bytes())
    };
    tracing::info!(target: "info::launch", path = %path.display(), "forkit path");
    // SAFETY: forwarded caller contract.
    let args = unsafe { collect_c_args(argc, argv) };
    let res = ArgVector::from_bytes(args)
        .map_err(Into::into)
        .and_then(|argv| Invoker::default().invoke_marshaled(&path, argv, entry));
    match res {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(path = %path.display(), "forkit launch failed: {err}");
            -1
        }
    }
}

/// C entry point for harnesses that link this crate as a static library.
///
/// Returns the status of `forkit_main` unchanged. A launch failure (an
/// argument with a NUL byte, or a worker that cannot be started) is logged
/// and reported as `-1`, which callers cannot tell apart from `forkit_main`
/// itself returning `-1`.
///
/// # Safety
///
/// `path` must be null or a valid C string. `argv` must be null or point at
/// `argc` pointers to valid C strings.
#[cfg(feature = "forkit")]
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn createForkit(
    path: *const c_char,
    argc: c_int,
    argv: *const *const c_char,
) -> c_int {
    // SAFETY: same contract as this function.
    unsafe { launch_from_c(path, argc, argv, &crate::entry::ForkitMain) }
}
