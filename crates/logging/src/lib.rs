#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is a leveled, tagged logger for small targets. Records carry a
//! [`Level`], a tag, an optional source location and a printf-style format
//! with its arguments. They are rendered by the [`printf`] engine straight
//! into each destination, so a record is never assembled in a heap buffer.
//!
//! # Design
//!
//! Two front ends share the same decoration:
//!
//! - [`Logger`] fans each record out to up to `N` registered sinks. Every sink
//!   has a [`FilterRule`] (blacklist or whitelist on level, tag and file), a
//!   location threshold, and a color preference.
//! - [`BufferedLogger`] writes through a single [`Backend`] via a fixed
//!   staging buffer, handing the backend bounded chunks followed by one
//!   zero-length boundary call per record.
//!
//! A decorated record reads
//! `[color]<letter> (<ms>|none)-<tag>[file:line(func)]: <message>[reset]<eol>`,
//! where the location part appears only for records at or below the sink's
//! info level.
//!
//! The [`global`] module holds a process-wide [`Logger`] behind a mutex for
//! the call-site macros ([`xf_log!`], [`loge!`], [`logi!`] and friends).
//!
//! # Invariants
//!
//! - A record more verbose than the global level produces no output and
//!   returns 0.
//! - Per-sink filtering never changes what another sink receives.
//! - The buffered path makes `ceil(n / N)` non-empty backend calls for an
//!   `n`-byte record, then exactly one empty call.
//!
//! # Errors
//!
//! Configuration calls return [`LogError`]: a full registry, a stale
//! [`SinkId`], an out-of-range ordinal, or a re-entrant call into the
//! process-wide logger. Output paths never fail; they report byte counts.
//!
//! # Examples
//!
//! ```
//! use logging::{FilterMode, Level, Logger, LoggerConfig, Record, args};
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let mut logger: Logger = Logger::with_config(LoggerConfig::new().with_colors(false));
//! let id = logger
//!     .register(move |bytes: &[u8]| sink.lock().unwrap().extend_from_slice(bytes))
//!     .unwrap();
//! logger.set_filter_enabled(id, true).unwrap();
//! logger.set_filter_mode(id, FilterMode::Whitelist).unwrap();
//! logger.set_filter_tag(id, Some("net")).unwrap();
//!
//! logger.log(&Record::new(Level::Info, "disk", "ignored", &[]));
//! logger.log(&Record::new(Level::Warn, "net", "rtt=%ums", &args![42u32]));
//!
//! assert_eq!(seen.lock().unwrap().as_slice(), b"W (none)-net: rtt=42ms\n");
//! ```

mod backend;
mod buffered;
mod color;
mod config;
mod decorator;
mod emitter;
mod error;
mod filter;
pub mod global;
mod levels;
mod line_mode;
mod logger;
mod macros;
mod record;
mod registry;
mod time;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use backend::{Backend, BackendArgs, Control, DefaultBackend};
pub use buffered::BufferedLogger;
pub use color::{Color, RESET};
pub use config::LoggerConfig;
pub use decorator::{Decoration, decorate};
pub use emitter::{BufferedEmitter, EmitReport, LOG_BUFFER_SIZE};
pub use error::{LogError, LogResult};
pub use filter::{FilterDecision, FilterMode, FilterRule, MatchPolicy, SkipReason};
pub use levels::{Level, STATIC_MAX_LEVEL};
pub use line_mode::LineMode;
pub use logger::{DEFAULT_SINK_CAPACITY, DispatchReport, Logger};
pub use record::{Record, SourceLocation};
pub use registry::{LogOutput, Sink, SinkId, SinkRegistry};
pub use time::{TimeSource, uptime_millis};

pub use printf::{Arg, Emit, args};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{
    EVENT_MESSAGE_CAPACITY, XfLogLayer, init_tracing, init_tracing_with_filter,
};
