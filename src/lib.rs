#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `xf-log` bundles the workspace crates behind one dependency:
//!
//! - [`printf`]: the allocation-free format engine and its argument replayer.
//! - [`logging`]: levels, records, the multi-sink [`Logger`] with per-sink
//!   filters, the [`BufferedLogger`] and the process-wide call-site macros.
//! - [`sink`]: writer, console stream and syslog outputs.
//!
//! The most common items are re-exported at the crate root.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use xf_log::{Level, Logger, LoggerConfig, Record, args};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let mut logger: Logger = Logger::with_config(LoggerConfig::new().with_colors(false));
//! logger
//!     .register(move |bytes: &[u8]| sink.lock().unwrap().extend_from_slice(bytes))
//!     .unwrap();
//!
//! logger.log(&Record::new(Level::Warn, "fan", "%d rpm", &args![900]));
//! assert_eq!(&*seen.lock().unwrap(), b"W (none)-fan: 900 rpm\n");
//! ```

pub mod cli;
mod showcase;

pub use logging;
pub use logging_sink as sink;
pub use printf;

pub use logging::{
    Backend, BackendArgs, BufferedLogger, Control, FilterMode, FilterRule, Level, LineMode,
    LogError, LogOutput, LogResult, Logger, LoggerConfig, Record, SinkId, args, global,
};
