//! crates/logging-sink/src/writer.rs
//! [`LogOutput`] over an [`io::Write`] implementor.

use std::io::{self, Write};

use logging::LogOutput;

/// Sink output that streams record bytes into a writer.
///
/// Write errors are not propagated through the logger; the first one is kept
/// and the failing call reports zero bytes accepted.
#[derive(Debug, Default)]
pub struct WriterSink<W> {
    writer: W,
    error: Option<io::Error>,
}

impl<W> WriterSink<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Returns the first error seen since the last call, clearing it.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> WriterSink<W>
where
    W: Write,
{
    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W> LogOutput for WriterSink<W>
where
    W: Write + Send,
{
    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        match self.writer.write_all(bytes) {
            Ok(()) => bytes.len(),
            Err(error) => {
                self.error.get_or_insert(error);
                0
            }
        }
    }
}
