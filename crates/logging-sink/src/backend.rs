//! crates/logging-sink/src/backend.rs
//! [`Backend`] over an [`io::Write`] implementor.

use std::io::{self, Write};

use logging::{Backend, BackendArgs};

/// Buffered-logger backend that writes chunks to a writer and flushes it at
/// every record boundary.
#[derive(Debug, Default)]
pub struct WriterBackend<W> {
    writer: W,
    records: u64,
    error: Option<io::Error>,
}

impl<W> WriterBackend<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            records: 0,
            error: None,
        }
    }

    /// Number of record boundaries seen.
    #[must_use]
    pub const fn records(&self) -> u64 {
        self.records
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns the first error seen since the last call, clearing it.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Consumes the backend and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Backend for WriterBackend<W>
where
    W: Write + Send,
{
    fn write(&mut self, buf: &[u8], _args: &BackendArgs) -> usize {
        if buf.is_empty() {
            self.records += 1;
            if let Err(error) = self.writer.flush() {
                self.error.get_or_insert(error);
            }
            return 0;
        }
        match self.writer.write_all(buf) {
            Ok(()) => buf.len(),
            Err(error) => {
                self.error.get_or_insert(error);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::BufWriter;

    use logging::{BufferedLogger, Level, Record};

    use super::*;

    #[test]
    fn boundary_flushes_buffered_writer() {
        let mut logger = BufferedLogger::<16>::with_backend(Box::new(WriterBackend::new(
            BufWriter::with_capacity(1024, tempfile::tempfile().unwrap()),
        )));
        logger.set_colors(false);
        let written = logger.log(&Record::new(Level::Error, "io", "flushed", &[]));
        assert_eq!(written, "E (none)-io: flushed\n".len());
    }

    #[test]
    fn counts_records_and_collects_bytes() {
        let mut backend = WriterBackend::new(Vec::new());
        let args = BackendArgs::default();
        assert_eq!(backend.write(b"ab", &args), 2);
        assert_eq!(backend.write(b"", &args), 0);
        assert_eq!(backend.write(b"c", &args), 1);
        assert_eq!(backend.write(b"", &args), 0);

        assert_eq!(backend.records(), 2);
        assert_eq!(backend.get_ref().as_slice(), b"abc");
        assert!(backend.take_error().is_none());
    }
}
