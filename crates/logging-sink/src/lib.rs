#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides ready-made destinations for the [`logging`] crate:
//! sink outputs for the multi-sink [`Logger`](logging::Logger) and backends
//! for the [`BufferedLogger`](logging::BufferedLogger).
//!
//! # Design
//!
//! - [`WriterSink`] adapts any [`std::io::Write`] implementor into a
//!   [`LogOutput`](logging::LogOutput), remembering the first I/O error
//!   instead of surfacing it through the byte-count interface.
//! - [`StreamSink`] targets stdout or stderr, and [`attach_stream`] registers
//!   one with color enabled only when the stream is a terminal.
//! - [`WriterBackend`] adapts a writer into a [`Backend`](logging::Backend)
//!   that flushes at every record boundary.
//! - [`FilterGuard`] temporarily overrides one sink's filter rule and restores
//!   it on drop.
//! - On Unix, [`syslog`] stages a record until its boundary and forwards it to
//!   syslog(3) with a priority derived from the record's level letter.
//!
//! # Errors
//!
//! Log outputs report byte counts rather than errors. [`WriterSink`] and
//! [`WriterBackend`] keep the first [`std::io::Error`] they see so callers can
//! inspect it with `take_error`.
//!
//! # Examples
//!
//! ```
//! use logging::{Level, Logger, LoggerConfig, Record};
//! use logging_sink::WriterSink;
//! use std::io::Write;
//! use std::sync::{Arc, Mutex};
//!
//! let shared = Arc::new(Mutex::new(Vec::new()));
//! let mut logger: Logger = Logger::with_config(LoggerConfig::new().with_colors(false));
//! logger.register(WriterSink::new(SharedVec(Arc::clone(&shared)))).unwrap();
//!
//! logger.log(&Record::new(Level::Info, "app", "started", &[]));
//! assert_eq!(shared.lock().unwrap().as_slice(), b"I (none)-app: started\n");
//!
//! struct SharedVec(Arc<Mutex<Vec<u8>>>);
//!
//! impl Write for SharedVec {
//!     fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
//!         self.0.lock().unwrap().write(buf)
//!     }
//!     fn flush(&mut self) -> std::io::Result<()> {
//!         Ok(())
//!     }
//! }
//! ```

mod backend;
mod guard;
mod stream;
mod writer;

#[cfg(unix)]
#[allow(unsafe_code)]
pub mod syslog;

pub use backend::WriterBackend;
pub use guard::FilterGuard;
pub use stream::{StdStream, StreamSink, attach_stream};
pub use writer::WriterSink;
