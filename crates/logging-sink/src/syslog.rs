//! crates/logging-sink/src/syslog.rs
//!
//! Syslog backend for the buffered logger.
//!
//! Uses libc `openlog`/`syslog`/`closelog` directly. syslog(3) takes one
//! complete message per call, so [`SyslogBackend`] stages chunks until the
//! record boundary and then sends the record with color escapes and the line
//! terminator removed. The priority comes from the record's level letter.

use std::ffi::CString;
use std::fmt;
use std::sync::OnceLock;

use logging::{Backend, BackendArgs, Level};

/// Syslog facility codes matching the POSIX syslog(3) constants.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogFacility {
    /// User-level messages (LOG_USER).
    #[default]
    User = libc::LOG_USER,
    /// System daemons (LOG_DAEMON).
    Daemon = libc::LOG_DAEMON,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    /// Parses a case-insensitive facility name.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("kern"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "daemon" => Some(Self::Daemon),
            "local0" => Some(Self::Local0),
            "local1" => Some(Self::Local1),
            "local2" => Some(Self::Local2),
            "local3" => Some(Self::Local3),
            "local4" => Some(Self::Local4),
            "local5" => Some(Self::Local5),
            "local6" => Some(Self::Local6),
            "local7" => Some(Self::Local7),
            _ => None,
        }
    }

    /// Lowercase facility name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Daemon => "daemon",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default syslog ident.
pub const DEFAULT_SYSLOG_TAG: &str = "xf-log";

/// Syslog severities used for log records.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogPriority {
    /// Error conditions (LOG_ERR).
    Error = libc::LOG_ERR,
    /// Warning conditions (LOG_WARNING).
    Warning = libc::LOG_WARNING,
    /// Normal but significant condition (LOG_NOTICE).
    Notice = libc::LOG_NOTICE,
    /// Informational messages (LOG_INFO).
    Info = libc::LOG_INFO,
    /// Debug-level messages (LOG_DEBUG).
    Debug = libc::LOG_DEBUG,
}

impl From<Level> for SyslogPriority {
    fn from(level: Level) -> Self {
        match level {
            Level::User => Self::Notice,
            Level::Error => Self::Error,
            Level::Warn => Self::Warning,
            Level::Info | Level::None => Self::Info,
            Level::Debug | Level::Verbose => Self::Debug,
        }
    }
}

/// Opens the process-wide syslog connection.
///
/// The ident is fixed by the first call; later calls reuse it. Returns a
/// guard that calls `closelog(3)` on drop.
pub fn open(facility: SyslogFacility, tag: &str) -> SyslogGuard {
    static IDENT: OnceLock<CString> = OnceLock::new();
    let ident = IDENT.get_or_init(|| {
        CString::new(tag).unwrap_or_else(|_| CString::from(c"xf-log"))
    });

    // SAFETY: the ident pointer lives in a static for the rest of the process,
    // as openlog(3) requires.
    unsafe {
        libc::openlog(ident.as_ptr(), libc::LOG_PID, facility as libc::c_int);
    }

    SyslogGuard { _private: () }
}

/// Sends one message with the given priority. Messages containing NUL are
/// dropped.
pub fn syslog_message(priority: SyslogPriority, message: &[u8]) {
    let Ok(message) = CString::new(message) else {
        return;
    };

    // SAFETY: both arguments are valid NUL-terminated strings and the "%s"
    // format consumes exactly one of them.
    unsafe {
        libc::syslog(priority as libc::c_int, c"%s".as_ptr(), message.as_ptr());
    }
}

/// Closes the syslog connection when dropped.
#[derive(Debug)]
pub struct SyslogGuard {
    _private: (),
}

impl Drop for SyslogGuard {
    fn drop(&mut self) {
        // SAFETY: closelog(3) has no preconditions.
        unsafe {
            libc::closelog();
        }
    }
}

/// Bytes staged per record; the rest of a longer record is dropped.
pub const SYSLOG_RECORD_CAPACITY: usize = 1024;

/// Buffered-logger backend forwarding each record to syslog(3).
pub struct SyslogBackend {
    staged: Box<[u8; SYSLOG_RECORD_CAPACITY]>,
    len: usize,
    sink: fn(SyslogPriority, &[u8]),
}

impl SyslogBackend {
    /// Backend sending records with [`syslog_message`]. Open the connection
    /// with [`open`] first.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(syslog_message)
    }

    /// Backend passing finished records to `sink` instead of syslog(3).
    #[must_use]
    pub fn with_sink(sink: fn(SyslogPriority, &[u8])) -> Self {
        Self {
            staged: Box::new([0; SYSLOG_RECORD_CAPACITY]),
            len: 0,
            sink,
        }
    }

    fn finish_record(&mut self) {
        let (level, text) = split_record(&self.staged[..self.len]);
        if !text.is_empty() {
            (self.sink)(SyslogPriority::from(level), text);
        }
        self.len = 0;
    }
}

impl Default for SyslogBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SyslogBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyslogBackend")
            .field("staged", &self.len)
            .finish_non_exhaustive()
    }
}

impl Backend for SyslogBackend {
    fn write(&mut self, buf: &[u8], _args: &BackendArgs) -> usize {
        if buf.is_empty() {
            self.finish_record();
            return 0;
        }
        let take = buf.len().min(SYSLOG_RECORD_CAPACITY - self.len);
        self.staged[self.len..self.len + take].copy_from_slice(&buf[..take]);
        self.len += take;
        take
    }
}

/// Strips a leading color escape, trailing reset and terminator from a
/// decorated record, and reads its level from the prompt letter.
fn split_record(record: &[u8]) -> (Level, &[u8]) {
    let mut text = record;
    if let Some(rest) = text.strip_prefix(b"\x1b[")
        && let Some(end) = rest.iter().position(|&b| b == b'm')
    {
        text = &rest[end + 1..];
    }
    loop {
        if let Some(rest) = text.strip_suffix(b"\n") {
            text = rest;
        } else if let Some(rest) = text.strip_suffix(b"\r") {
            text = rest;
        } else if let Some(rest) = text.strip_suffix(logging::RESET) {
            text = rest;
        } else {
            break;
        }
    }
    let level = match text.first() {
        Some(b'U') => Level::User,
        Some(b'E') => Level::Error,
        Some(b'W') => Level::Warn,
        Some(b'D') => Level::Debug,
        Some(b'V') => Level::Verbose,
        _ => Level::Info,
    };
    (level, text)
}
