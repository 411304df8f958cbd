//! crates/logging/src/emitter.rs
//!
//! Fixed-size staging buffer between the format engine and a [`Backend`].
//!
//! Bytes accumulate until the buffer is full. The next byte flushes the full
//! buffer with [`Control::Store`] before it is stored, so a full buffer is
//! only handed over once more output is known to follow. [`finish`] flushes
//! the tail with [`Control::Out`] and then makes the zero-length boundary call.
//!
//! A record of `n` bytes therefore reaches the backend as `ceil(n / N)`
//! non-empty calls followed by exactly one empty call.
//!
//! [`finish`]: BufferedEmitter::finish

use printf::Emit;

use crate::backend::{Backend, BackendArgs, Control};

/// Default staging buffer size in bytes.
pub const LOG_BUFFER_SIZE: usize = 64;

/// Result of one emitter session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EmitReport {
    /// Bytes passed through the emitter.
    pub produced: usize,
    /// Bytes the backend reported as accepted.
    pub accepted: usize,
    /// Non-empty backend calls made.
    pub flushes: usize,
}

/// Staging buffer for one record.
pub struct BufferedEmitter<'b, B, const N: usize = LOG_BUFFER_SIZE>
where
    B: Backend + ?Sized,
{
    backend: &'b mut B,
    record_id: u32,
    buf: [u8; N],
    len: usize,
    report: EmitReport,
}

impl<'b, B, const N: usize> BufferedEmitter<'b, B, N>
where
    B: Backend + ?Sized,
{
    /// Starts a record on `backend`.
    pub const fn new(backend: &'b mut B, record_id: u32) -> Self {
        const { assert!(N > 0, "emitter buffer must hold at least one byte") };
        Self {
            backend,
            record_id,
            buf: [0; N],
            len: 0,
            report: EmitReport {
                produced: 0,
                accepted: 0,
                flushes: 0,
            },
        }
    }

    /// Stages one byte, flushing a full buffer first.
    pub fn push(&mut self, byte: u8) {
        if self.len == N {
            self.flush(Control::Store);
        }
        self.buf[self.len] = byte;
        self.len += 1;
        self.report.produced += 1;
    }

    /// Stages a run of bytes.
    pub fn extend(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            if self.len == N {
                self.flush(Control::Store);
            }
            let take = bytes.len().min(N - self.len);
            self.buf[self.len..self.len + take].copy_from_slice(&bytes[..take]);
            self.len += take;
            self.report.produced += take;
            bytes = &bytes[take..];
        }
    }

    /// Bytes currently staged.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.len
    }

    /// Flushes the tail and signals the record boundary.
    pub fn finish(mut self) -> EmitReport {
        if self.len > 0 {
            self.flush(Control::Out);
        }
        let args = BackendArgs::new(self.record_id, Control::Out);
        self.backend.write(&[], &args);
        self.report
    }

    fn flush(&mut self, control: Control) {
        let args = BackendArgs::new(self.record_id, control);
        self.report.accepted += self.backend.write(&self.buf[..self.len], &args);
        self.report.flushes += 1;
        self.len = 0;
    }
}

impl<B, const N: usize> Emit for BufferedEmitter<'_, B, N>
where
    B: Backend + ?Sized,
{
    fn emit(&mut self, bytes: &[u8]) {
        self.extend(bytes);
    }
}
