//! Macros that operate using the ParseErrorKind

/// Run a stock `nom` parser, converting its errors to use `ParseErrorKind`
macro_rules! pe_fix {
    ($i:expr, $submac:ident ! ( $($args:tt)* )) => (
        fix_error!($i, crate::ParseErrorKind, $submac!($($args)*))
    );
    ($i:expr, $f:expr) => (
        pe_fix!($i, call!($f))
    );
}
