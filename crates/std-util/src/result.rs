#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(e) => e,
            actual => {
                use std::fmt::Write;
                let mut msg = format!("expected `Err`; actual={:?}", actual);

                $(
                    write!(msg, ", ").unwrap();
                    write!(msg, $($t)*).unwrap();
                )?

                panic!("{}", msg);
            }
        }
    };
}

/// Asserts that `$e` is an `Err` whose error answers `true` to the given
/// predicate method, and returns the error.
///
/// ```ignore
/// assert_err_is!(table.update_fields(..).await, is_empty_update);
/// ```
#[macro_export]
macro_rules! assert_err_is {
    ($e:expr, $predicate:ident) => {{
        let err = $crate::assert_err!($e);
        assert!(
            err.$predicate(),
            "expected error satisfying `{}`; actual={}",
            stringify!($predicate),
            err
        );
        err
    }};
}

#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(e) => panic!("expected `Ok`; actual error={}", e),
        }
    };
}
