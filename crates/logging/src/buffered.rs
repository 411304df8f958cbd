//! crates/logging/src/buffered.rs
//!
//! Single-backend logger that stages output in a fixed buffer.
//!
//! [`BufferedLogger`] formats each record through a [`BufferedEmitter`] so the
//! backend sees bounded chunks and a boundary call per record rather than one
//! call per formatted fragment. It has no sink table or filters; the global
//! level is the only gate.

use printf::Arg;

use crate::backend::{Backend, DefaultBackend};
use crate::decorator::{Decoration, decorate};
use crate::emitter::{BufferedEmitter, EmitReport, LOG_BUFFER_SIZE};
use crate::error::{LogError, LogResult};
use crate::levels::Level;
use crate::line_mode::LineMode;
use crate::record::Record;
use crate::time::TimeSource;

/// Logger writing through one [`Backend`] with an `N`-byte staging buffer.
pub struct BufferedLogger<const N: usize = LOG_BUFFER_SIZE> {
    backend: Box<dyn Backend>,
    custom_backend: bool,
    global_level: Level,
    time_source: Option<TimeSource>,
    line_mode: LineMode,
    colors: bool,
    info_level: Level,
    next_record: u32,
}

impl<const N: usize> BufferedLogger<N> {
    /// Stdout backend, `Info` global level, colors on, locations on `User`
    /// and `Error` records.
    #[must_use]
    pub fn new() -> Self {
        Self::build(Box::new(DefaultBackend::new()), false)
    }

    /// Same defaults as [`new`](Self::new) with a custom backend.
    #[must_use]
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self::build(backend, true)
    }

    fn build(backend: Box<dyn Backend>, custom_backend: bool) -> Self {
        Self {
            backend,
            custom_backend,
            global_level: Level::Info,
            time_source: None,
            line_mode: LineMode::WithNewline,
            colors: true,
            info_level: Level::Error,
            next_record: 0,
        }
    }

    /// Installs `backend`, or restores the stdout backend when `None`.
    pub fn set_backend(&mut self, backend: Option<Box<dyn Backend>>) {
        match backend {
            Some(backend) => {
                self.backend = backend;
                self.custom_backend = true;
            }
            None => {
                self.backend = Box::new(DefaultBackend::new());
                self.custom_backend = false;
            }
        }
    }

    /// Current backend.
    pub fn backend(&mut self) -> &mut dyn Backend {
        self.backend.as_mut()
    }

    /// Whether a backend other than the stdout default is installed.
    #[must_use]
    pub const fn has_custom_backend(&self) -> bool {
        self.custom_backend
    }

    /// Records more verbose than `level` are dropped.
    pub fn set_global_level(&mut self, level: Level) {
        self.global_level = level;
    }

    /// [`set_global_level`](Self::set_global_level) from an ordinal.
    pub fn set_global_level_raw(&mut self, level: u8) -> LogResult<()> {
        let level = Level::from_u8(level).ok_or(LogError::InvalidArgument(
            "global level ordinal out of range",
        ))?;
        self.set_global_level(level);
        Ok(())
    }

    /// Current global level.
    #[must_use]
    pub const fn global_level(&self) -> Level {
        self.global_level
    }

    /// Installs or removes the timestamp source.
    pub fn set_time_source(&mut self, source: Option<TimeSource>) {
        self.time_source = source;
    }

    /// Current timestamp source.
    #[must_use]
    pub const fn time_source(&self) -> Option<TimeSource> {
        self.time_source
    }

    /// Sets the record terminator.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.line_mode = line_mode;
    }

    /// Enables or disables color escapes.
    pub fn set_colors(&mut self, colors: bool) {
        self.colors = colors;
    }

    /// Records at or below `level` carry their source location.
    pub fn set_info_level(&mut self, level: Level) {
        self.info_level = level;
    }

    /// Sequence number the next record will carry.
    #[must_use]
    pub const fn next_record_id(&self) -> u32 {
        self.next_record
    }

    /// Writes `record` and returns the bytes produced.
    pub fn log(&mut self, record: &Record<'_>) -> usize {
        self.dispatch(record).produced
    }

    /// [`log`](Self::log) with chunk accounting. Suppressed records make no
    /// backend call at all.
    pub fn dispatch(&mut self, record: &Record<'_>) -> EmitReport {
        if !record.level().passes(self.global_level) {
            return EmitReport::default();
        }
        let decoration = Decoration {
            color: self.colors,
            info_level: self.info_level,
            timestamp: self.time_source.map(|now| now()),
            line_mode: self.line_mode,
        };
        let record_id = self.take_record_id();
        let mut emitter = BufferedEmitter::<_, N>::new(self.backend.as_mut(), record_id);
        decorate(&mut emitter, record, &decoration);
        emitter.finish()
    }

    /// Formats `fmt` undecorated as one record, ignoring the global level.
    pub fn printf(&mut self, fmt: &str, args: &[Arg<'_>]) -> usize {
        let record_id = self.take_record_id();
        let mut emitter = BufferedEmitter::<_, N>::new(self.backend.as_mut(), record_id);
        printf::format(&mut emitter, fmt, args);
        emitter.finish().produced
    }

    const fn take_record_id(&mut self) -> u32 {
        let id = self.next_record;
        self.next_record = self.next_record.wrapping_add(1);
        id
    }
}

impl<const N: usize> Default for BufferedLogger<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> std::fmt::Debug for BufferedLogger<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferedLogger")
            .field("custom_backend", &self.custom_backend)
            .field("global_level", &self.global_level)
            .field("line_mode", &self.line_mode)
            .field("colors", &self.colors)
            .field("info_level", &self.info_level)
            .field("next_record", &self.next_record)
            .finish_non_exhaustive()
    }
}
