// tests/invoke.rs

use debug_forkit::{ArgVector, ArgvError, ForkitError, Invoker, LaunchConfig, create_forkit};
use libc::c_int;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn forwards_status_verbatim() {
    for expected in [0, 1, 42, -1, c_int::MAX, c_int::MIN] {
        let entry = move |_: &mut ArgVector| expected;
        let code = create_forkit("/opt/app/forkit", ["forkit"], &entry).unwrap();
        assert_eq!(code, expected);
    }
}

#[test]
fn entry_sees_arguments_in_order() {
    let seen = Mutex::new(Vec::new());
    let entry = |argv: &mut ArgVector| {
        let args = argv
            .iter()
            .map(|a| a.to_str().unwrap().to_string())
            .collect::<Vec<_>>();
        *seen.lock().unwrap() = args;
        argv.argc()
    };
    let code = create_forkit("/opt/app/forkit", ["forkit", "--pipe=foo"], &entry).unwrap();
    assert_eq!(code, 2);
    assert_eq!(*seen.lock().unwrap(), ["forkit", "--pipe=foo"]);
}

#[test]
fn empty_arguments_still_invoke() {
    let entry = |argv: &mut ArgVector| {
        assert_eq!(argv.argc(), 0);
        let table = argv.as_mut_ptr();
        assert!(!table.is_null());
        assert!(unsafe { *table }.is_null());
        7
    };
    let code = create_forkit("/opt/app/forkit", Vec::<String>::new(), &entry).unwrap();
    assert_eq!(code, 7);
}

#[test]
fn interior_nul_is_rejected_before_invocation() {
    let calls = AtomicUsize::new(0);
    let entry = |_: &mut ArgVector| {
        calls.fetch_add(1, Ordering::SeqCst);
        0
    };
    let err = create_forkit("forkit", ["ok", "bad\0arg"], &entry).unwrap_err();
    assert!(matches!(
        err,
        ForkitError::Argv(ArgvError::InteriorNul {
            index: 1,
            position: 3
        })
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn worker_thread_carries_configured_name() {
    let entry = |_: &mut ArgVector| {
        let name = std::thread::current().name().map(str::to_string);
        (name.as_deref() == Some("debug_forkit")) as c_int
    };
    assert_eq!(create_forkit("forkit", ["forkit"], &entry).unwrap(), 1);

    let cfg = LaunchConfig::builder().thread_name("forkit_probe").build();
    let entry = |_: &mut ArgVector| {
        (std::thread::current().name() == Some("forkit_probe")) as c_int
    };
    let code = Invoker::new(&cfg)
        .invoke("forkit", ["forkit"], &entry)
        .unwrap();
    assert_eq!(code, 1);
}

#[test]
fn sequential_calls_are_independent() {
    let calls = AtomicUsize::new(0);
    let entry = |argv: &mut ArgVector| {
        calls.fetch_add(1, Ordering::SeqCst);
        argv.get(0).unwrap().to_bytes()[0] as c_int
    };
    for (i, arg) in ["a", "b", "c", "d"].iter().enumerate() {
        let code = create_forkit("forkit", [arg], &entry).unwrap();
        assert_eq!(code, arg.as_bytes()[0] as c_int);
        assert_eq!(calls.load(Ordering::SeqCst), i + 1);
    }
}

#[test]
fn entry_may_scribble_on_its_arguments() {
    let entry = |argv: &mut ArgVector| {
        let table = argv.as_mut_ptr();
        unsafe { *(*table) = b'X' as libc::c_char };
        (argv.get(0).unwrap().to_bytes() == b"Xorkit") as c_int
    };
    assert_eq!(create_forkit("forkit", ["forkit"], &entry).unwrap(), 1);
}

#[test]
fn worker_panic_reaches_the_caller() {
    let entry = |_: &mut ArgVector| -> c_int { panic!("supervisor blew up") };
    let res = panic::catch_unwind(AssertUnwindSafe(|| {
        create_forkit("forkit", ["forkit"], &entry)
    }));
    let payload = res.unwrap_err();
    assert_eq!(
        payload.downcast_ref::<&str>().copied(),
        Some("supervisor blew up")
    );

    // The launcher is still usable afterwards.
    let ok = |_: &mut ArgVector| 0;
    assert_eq!(create_forkit("forkit", ["forkit"], &ok).unwrap(), 0);
}

#[test]
fn nul_in_thread_name_is_a_spawn_error() {
    let calls = AtomicUsize::new(0);
    let entry = |_: &mut ArgVector| {
        calls.fetch_add(1, Ordering::SeqCst);
        0
    };
    let cfg = LaunchConfig::builder().thread_name("bad\0name").build();
    let err = Invoker::new(&cfg)
        .invoke("forkit", ["forkit"], &entry)
        .unwrap_err();
    match err {
        ForkitError::Spawn(e) => assert_eq!(e.kind(), std::io::ErrorKind::InvalidInput),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
