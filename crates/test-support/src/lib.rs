#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Shared test utilities for the xf-log workspace.
//!
//! [`CaptureOutput`] records what a multi-sink logger writes to one sink, and
//! [`RecordingBackend`] records every call a buffered logger makes to its
//! backend. Both are cheap clones over shared state so a test can keep a
//! handle after moving the output into the logger.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logging::{Backend, BackendArgs, Control, LogOutput};
use tempfile::TempDir;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Sink capture
// ============================================================================

#[derive(Debug, Default)]
struct Captured {
    bytes: Vec<u8>,
    writes: usize,
}

/// Sink output that keeps every byte written to it.
#[derive(Clone, Debug, Default)]
pub struct CaptureOutput {
    inner: Arc<Mutex<Captured>>,
    limit: Option<usize>,
}

impl CaptureOutput {
    /// Empty capture accepting everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture that accepts at most `limit` bytes per call, to exercise
    /// partial writes.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Captured bytes.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        lock(&self.inner).bytes.clone()
    }

    /// Captured bytes as UTF-8, lossily.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&lock(&self.inner).bytes).into_owned()
    }

    /// Number of `write_bytes` calls received.
    #[must_use]
    pub fn writes(&self) -> usize {
        lock(&self.inner).writes
    }

    /// Discards everything captured so far.
    pub fn clear(&self) {
        let mut inner = lock(&self.inner);
        inner.bytes.clear();
        inner.writes = 0;
    }
}

impl LogOutput for CaptureOutput {
    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let take = self.limit.map_or(bytes.len(), |limit| bytes.len().min(limit));
        let mut inner = lock(&self.inner);
        inner.bytes.extend_from_slice(&bytes[..take]);
        inner.writes += 1;
        take
    }
}

// ============================================================================
// Backend recording
// ============================================================================

/// One backend call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BackendCall {
    /// Bytes passed; empty for a record boundary.
    pub bytes: Vec<u8>,
    /// Arguments passed alongside.
    pub args: BackendArgs,
}

impl BackendCall {
    /// Whether this is the zero-length boundary call.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Backend that logs every call it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<BackendCall>>>,
}

impl RecordingBackend {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxed clone, ready for `BufferedLogger::with_backend`.
    #[must_use]
    pub fn boxed(&self) -> Box<dyn Backend> {
        Box::new(self.clone())
    }

    /// Every call so far.
    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> {
        lock(&self.calls).clone()
    }

    /// Non-empty calls so far.
    #[must_use]
    pub fn chunks(&self) -> Vec<BackendCall> {
        lock(&self.calls)
            .iter()
            .filter(|call| !call.is_boundary())
            .cloned()
            .collect()
    }

    /// Number of boundary calls so far.
    #[must_use]
    pub fn boundaries(&self) -> usize {
        lock(&self.calls).iter().filter(|call| call.is_boundary()).count()
    }

    /// Concatenated bytes of every call.
    #[must_use]
    pub fn text(&self) -> String {
        let calls = lock(&self.calls);
        let bytes: Vec<u8> = calls.iter().flat_map(|call| call.bytes.iter().copied()).collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Control values of every call, in order.
    #[must_use]
    pub fn controls(&self) -> Vec<Control> {
        lock(&self.calls).iter().map(|call| call.args.control).collect()
    }

    /// Discards recorded calls.
    pub fn clear(&self) {
        lock(&self.calls).clear();
    }
}

impl Backend for RecordingBackend {
    fn write(&mut self, buf: &[u8], args: &BackendArgs) -> usize {
        lock(&self.calls).push(BackendCall {
            bytes: buf.to_vec(),
            args: *args,
        });
        buf.len()
    }
}

// ============================================================================
// Filesystem
// ============================================================================

/// Temporary directory with a path for a log file inside it.
#[derive(Debug)]
pub struct LogDir {
    dir: TempDir,
}

impl LogDir {
    /// Creates a fresh temporary directory.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Path for `name` inside the directory.
    #[must_use]
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
