//! crates/logging/src/backend.rs
//!
//! Output backends for the buffered logger.
//!
//! A backend receives the contents of the emitter's buffer whenever it fills,
//! the remaining tail when a record ends, and then one zero-length call that
//! marks the record boundary. The [`Control`] value tells the two kinds of
//! non-empty flush apart.

use std::io::{self, Write};

/// Why the buffer is being handed to the backend.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Control {
    /// No request; reserved for callers that drive a backend directly.
    #[default]
    None,
    /// The buffer filled mid-record; more bytes of the same record follow.
    Store,
    /// The record is complete; this is its tail or its boundary call.
    Out,
}

/// Context passed with every backend call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct BackendArgs {
    /// Sequence number of the record being written, starting at zero.
    pub record_id: u32,
    /// Reason for the call.
    pub control: Control,
}

impl BackendArgs {
    /// Arguments for a call about `record_id`.
    #[must_use]
    pub const fn new(record_id: u32, control: Control) -> Self {
        Self {
            record_id,
            control,
        }
    }
}

/// Receiver of flushed log bytes.
///
/// An empty `buf` is the record boundary: the record is complete and the
/// backend may forward whatever it has staged. The return value is the number
/// of bytes accepted and is ignored for the boundary call.
pub trait Backend: Send {
    /// Consumes a flushed chunk or a boundary notification.
    fn write(&mut self, buf: &[u8], args: &BackendArgs) -> usize;
}

impl<F> Backend for F
where
    F: FnMut(&[u8], &BackendArgs) -> usize + Send,
{
    fn write(&mut self, buf: &[u8], args: &BackendArgs) -> usize {
        self(buf, args)
    }
}

/// Writes chunks to standard output and flushes at each record boundary.
#[derive(Debug, Default)]
pub struct DefaultBackend {
    _private: (),
}

impl DefaultBackend {
    /// Creates the stdout backend.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl Backend for DefaultBackend {
    fn write(&mut self, buf: &[u8], _args: &BackendArgs) -> usize {
        let mut stdout = io::stdout().lock();
        if buf.is_empty() {
            let _ = stdout.flush();
            return 0;
        }
        match stdout.write_all(buf) {
            Ok(()) => buf.len(),
            Err(_error) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "xf_log::backend", error = %_error, "stdout write failed");
                0
            }
        }
    }
}
