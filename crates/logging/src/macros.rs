//! crates/logging/src/macros.rs
//!
//! Call-site macros. Each one captures `file!()`, `line!()` and
//! `module_path!()` and converts its arguments with [`Arg::from`].
//!
//! Levels above [`STATIC_MAX_LEVEL`] compile to a constant `0`; the arguments
//! are still type-checked but never evaluated.
//!
//! [`Arg::from`]: crate::Arg
//! [`STATIC_MAX_LEVEL`]: crate::STATIC_MAX_LEVEL

/// Logs a record at `level` through the process-wide logger.
///
/// Evaluates to the number of bytes produced.
///
/// ```
/// use logging::{Level, xf_log};
///
/// let written = xf_log!(Level::Error, "disk", "%s is %d%% full", "/var", 97);
/// assert_eq!(written, 0); // no sinks registered
/// ```
#[macro_export]
macro_rules! xf_log {
    ($level:expr, $tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        let level: $crate::Level = $level;
        if level <= $crate::STATIC_MAX_LEVEL {
            $crate::global::log(
                &$crate::Record::new(level, $tag, $fmt, &$crate::args![$($arg),*])
                    .with_location($crate::source_location!()),
            )
        } else {
            0usize
        }
    }};
}

/// Like [`xf_log!`] but writes through an explicit [`Logger`](crate::Logger)
/// or [`BufferedLogger`](crate::BufferedLogger).
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $level:expr, $tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        let level: $crate::Level = $level;
        if level <= $crate::STATIC_MAX_LEVEL {
            $logger.log(
                &$crate::Record::new(level, $tag, $fmt, &$crate::args![$($arg),*])
                    .with_location($crate::source_location!()),
            )
        } else {
            0usize
        }
    }};
}

/// Logs at [`Level::User`](crate::Level::User).
#[macro_export]
macro_rules! logu {
    ($tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::xf_log!($crate::Level::User, $tag, $fmt $(, $arg)*)
    };
}

/// Logs at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! loge {
    ($tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::xf_log!($crate::Level::Error, $tag, $fmt $(, $arg)*)
    };
}

/// Logs at [`Level::Warn`](crate::Level::Warn).
#[macro_export]
macro_rules! logw {
    ($tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::xf_log!($crate::Level::Warn, $tag, $fmt $(, $arg)*)
    };
}

/// Logs at [`Level::Info`](crate::Level::Info).
#[macro_export]
macro_rules! logi {
    ($tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::xf_log!($crate::Level::Info, $tag, $fmt $(, $arg)*)
    };
}

/// Logs at [`Level::Debug`](crate::Level::Debug).
#[macro_export]
macro_rules! logd {
    ($tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::xf_log!($crate::Level::Debug, $tag, $fmt $(, $arg)*)
    };
}

/// Logs at [`Level::Verbose`](crate::Level::Verbose).
#[macro_export]
macro_rules! logv {
    ($tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::xf_log!($crate::Level::Verbose, $tag, $fmt $(, $arg)*)
    };
}

/// Raw formatted output to every sink of the process-wide logger.
#[macro_export]
macro_rules! xf_printf {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::global::printf($fmt, &$crate::args![$($arg),*])
    };
}
