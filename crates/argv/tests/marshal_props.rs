// crates/argv/tests/marshal_props.rs

use argv::ArgVector;
use proptest::prelude::*;

fn nul_free() -> impl Strategy<Value = String> {
    "[^\u{0}]{0,64}"
}

proptest! {
    #[test]
    fn marshaled_vector_reproduces_input(args in prop::collection::vec(nul_free(), 0..16)) {
        let mut argv = ArgVector::new(&args).unwrap();
        prop_assert_eq!(argv.len(), args.len());
        prop_assert_eq!(argv.argc() as usize, args.len());
        for (c, s) in argv.iter().zip(&args) {
            prop_assert_eq!(c.to_bytes(), s.as_bytes());
        }
        let expected: usize = args.iter().map(|s| s.len() + 1).sum();
        prop_assert_eq!(argv.byte_len(), expected);

        let table = argv.as_mut_ptr();
        prop_assert!(!table.is_null());
        let last = unsafe { *table.add(args.len()) };
        prop_assert!(last.is_null());
    }

    #[test]
    fn separate_vectors_never_alias(args in prop::collection::vec(nul_free(), 1..8)) {
        let mut first = ArgVector::new(&args).unwrap();
        let mut second = ArgVector::new(&args).unwrap();
        let (a, b) = (first.as_mut_ptr(), second.as_mut_ptr());
        for i in 0..args.len() {
            let (x, y) = unsafe { (*a.add(i), *b.add(i)) };
            prop_assert_ne!(x, y);
        }
    }
}
