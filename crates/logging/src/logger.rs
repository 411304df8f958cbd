//! crates/logging/src/logger.rs
//!
//! Multi-sink logger: registry, global level, time source and dispatch.
//!
//! [`Logger::dispatch`] drops records that fail the global level, then walks
//! the registered sinks in slot order. Each sink's filter rule decides whether
//! it sees the record; sinks that do get the decorated record written straight
//! to their output, with color and location detail resolved per sink.
//!
//! A `Logger` is a plain value and is not internally synchronized; every
//! mutation takes `&mut self`. The [`global`](crate::global) module wraps one
//! in a mutex for call sites that cannot thread a logger through.

use printf::{Arg, Emit};

use crate::config::LoggerConfig;
use crate::decorator::{Decoration, decorate};
use crate::error::{LogError, LogResult};
use crate::filter::{FilterMode, FilterRule, MatchPolicy};
use crate::levels::Level;
use crate::line_mode::LineMode;
use crate::record::Record;
use crate::registry::{LogOutput, Sink, SinkId, SinkRegistry};
use crate::time::TimeSource;

/// Default number of sink slots.
pub const DEFAULT_SINK_CAPACITY: usize = 4;

/// Byte accounting for one dispatched record or printf call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DispatchReport {
    produced: usize,
    accepted: usize,
    sinks: usize,
}

impl DispatchReport {
    /// Bytes handed to outputs, summed over sinks.
    #[must_use]
    pub const fn produced(&self) -> usize {
        self.produced
    }

    /// Bytes the outputs reported as accepted.
    #[must_use]
    pub const fn accepted(&self) -> usize {
        self.accepted
    }

    /// Number of sinks that received the record.
    #[must_use]
    pub const fn sinks(&self) -> usize {
        self.sinks
    }

    /// Whether some output accepted fewer bytes than it was given.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.accepted < self.produced
    }

    pub(crate) const fn add(&mut self, produced: usize, accepted: usize) {
        self.produced += produced;
        self.accepted += accepted;
        self.sinks += 1;
    }
}

/// Adapts a sink output to the format engine while counting accepted bytes.
struct OutputEmitter<'o> {
    output: &'o mut dyn LogOutput,
    accepted: usize,
}

impl Emit for OutputEmitter<'_> {
    fn emit(&mut self, bytes: &[u8]) {
        self.accepted += self.output.write_bytes(bytes);
    }
}

/// Logger with up to `N` independently filtered sinks.
pub struct Logger<const N: usize = DEFAULT_SINK_CAPACITY> {
    registry: SinkRegistry<N>,
    config: LoggerConfig,
    time_source: Option<TimeSource>,
}

impl<const N: usize> Logger<N> {
    /// Logger with no sinks, no time source, and [`LoggerConfig::new`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(LoggerConfig::new())
    }

    /// Logger with no sinks and the given configuration.
    #[must_use]
    pub const fn with_config(config: LoggerConfig) -> Self {
        Self {
            registry: SinkRegistry::new(),
            config,
            time_source: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Replaces the configuration. Existing sinks keep their own settings.
    pub fn set_config(&mut self, config: LoggerConfig) {
        self.config = config;
    }

    /// Read access to the sinks.
    #[must_use]
    pub const fn registry(&self) -> &SinkRegistry<N> {
        &self.registry
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Registers an output using the configured default info level and filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{Level, Logger, Record};
    /// use std::sync::{Arc, Mutex};
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&seen);
    ///
    /// let mut logger: Logger = Logger::new();
    /// logger.set_colors(false);
    /// logger
    ///     .register(move |bytes: &[u8]| sink.lock().unwrap().extend_from_slice(bytes))
    ///     .unwrap();
    ///
    /// logger.log(&Record::new(Level::Info, "boot", "ready", &[]));
    /// assert_eq!(seen.lock().unwrap().as_slice(), b"I (none)-boot: ready\n");
    /// ```
    pub fn register<O>(&mut self, output: O) -> LogResult<SinkId>
    where
        O: LogOutput + 'static,
    {
        self.register_boxed(Box::new(output))
    }

    /// Registers an already boxed output.
    pub fn register_boxed(&mut self, output: Box<dyn LogOutput>) -> LogResult<SinkId> {
        let sink = Sink::new(
            output,
            self.config.default_info_level,
            self.config.default_filter,
        );
        self.registry.register(sink)
    }

    /// Removes a sink and frees its slot.
    pub fn unregister(&mut self, id: SinkId) -> LogResult<()> {
        self.registry.unregister(id).map(drop)
    }

    /// Number of registered sinks.
    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of sink slots.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    // ------------------------------------------------------------------
    // Per-sink settings
    // ------------------------------------------------------------------

    /// Records at or below `level` carry their location on this sink.
    pub fn set_info_level(&mut self, id: SinkId, level: Level) -> LogResult<()> {
        self.registry.get_mut(id)?.set_info_level(level);
        Ok(())
    }

    /// Location threshold of a sink.
    pub fn info_level(&self, id: SinkId) -> LogResult<Level> {
        Ok(self.registry.get(id)?.info_level())
    }

    /// Copy of a sink's filter rule.
    pub fn filter(&self, id: SinkId) -> LogResult<FilterRule> {
        Ok(*self.registry.get(id)?.filter())
    }

    /// Replaces a sink's filter rule.
    pub fn set_filter(&mut self, id: SinkId, rule: FilterRule) -> LogResult<()> {
        self.update_filter(id, |filter| *filter = rule)
    }

    /// Turns a sink's filter rule on or off.
    pub fn set_filter_enabled(&mut self, id: SinkId, enabled: bool) -> LogResult<()> {
        self.update_filter(id, |filter| filter.enabled = enabled)
    }

    /// Whether a sink receives color escapes while its filter is enabled.
    pub fn set_colorful(&mut self, id: SinkId, colorful: bool) -> LogResult<()> {
        self.update_filter(id, |filter| filter.colorful = colorful)
    }

    /// Selects blacklist or whitelist matching.
    pub fn set_filter_mode(&mut self, id: SinkId, mode: FilterMode) -> LogResult<()> {
        self.update_filter(id, |filter| filter.mode = mode)
    }

    /// Sets the most verbose level the sink accepts while filtering.
    pub fn set_filter_level(&mut self, id: SinkId, level: Level) -> LogResult<()> {
        self.update_filter(id, |filter| filter.level_floor = level)
    }

    /// Sets or clears the tag filter.
    pub fn set_filter_tag(&mut self, id: SinkId, tag: Option<&'static str>) -> LogResult<()> {
        self.update_filter(id, |filter| filter.tag = tag)
    }

    /// Sets or clears the source file filter.
    pub fn set_filter_file(&mut self, id: SinkId, file: Option<&'static str>) -> LogResult<()> {
        self.update_filter(id, |filter| filter.file = file)
    }

    /// Chooses content or identity matching for the tag and file filters.
    pub fn set_match_policy(&mut self, id: SinkId, policy: MatchPolicy) -> LogResult<()> {
        self.update_filter(id, |filter| filter.policy = policy)
    }

    fn update_filter(
        &mut self,
        id: SinkId,
        update: impl FnOnce(&mut FilterRule),
    ) -> LogResult<()> {
        update(self.registry.get_mut(id)?.filter_mut());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Logger-wide settings
    // ------------------------------------------------------------------

    /// Records more verbose than `level` reach no sink.
    pub fn set_global_level(&mut self, level: Level) {
        self.config.global_level = level;
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
        self.config.global_level
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

    /// Sets the terminator written after each record.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.config.line_mode = line_mode;
    }

    /// Master switch for color escapes.
    pub fn set_colors(&mut self, colors: bool) {
        self.config.colors = colors;
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Writes `record` to every sink whose filter admits it and returns the
    /// bytes produced, summed over those sinks.
    pub fn log(&mut self, record: &Record<'_>) -> usize {
        self.dispatch(record).produced()
    }

    /// [`log`](Self::log) with full accounting.
    pub fn dispatch(&mut self, record: &Record<'_>) -> DispatchReport {
        let mut report = DispatchReport::default();
        let level = record.level();
        if !level.passes(self.config.global_level) {
            return report;
        }

        let timestamp = self.time_source.map(|now| now());
        let file = record.file();

        for (_, sink) in self.registry.iter_mut() {
            let filter = *sink.filter();
            if !filter.permits(level, record.tag(), file) {
                continue;
            }

            let decoration = Decoration {
                color: self.config.colors && filter.wants_color(),
                info_level: sink.info_level(),
                timestamp,
                line_mode: self.config.line_mode,
            };
            let mut out = OutputEmitter {
                output: sink.output_mut(),
                accepted: 0,
            };
            let produced = decorate(&mut out, record, &decoration);
            report.add(produced, out.accepted);
        }

        report
    }

    /// Formats `fmt` undecorated to every sink, ignoring filters and levels.
    pub fn printf(&mut self, fmt: &str, args: &[Arg<'_>]) -> usize {
        self.printf_report(fmt, args).produced()
    }

    /// [`printf`](Self::printf) with full accounting.
    pub fn printf_report(&mut self, fmt: &str, args: &[Arg<'_>]) -> DispatchReport {
        let mut report = DispatchReport::default();
        for (_, sink) in self.registry.iter_mut() {
            let mut out = OutputEmitter {
                output: sink.output_mut(),
                accepted: 0,
            };
            let produced = printf::format(&mut out, fmt, args);
            report.add(produced, out.accepted);
        }
        report
    }
}

impl<const N: usize> Default for Logger<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> std::fmt::Debug for Logger<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("sinks", &self.registry)
            .field("time_source", &self.time_source.is_some())
            .finish()
    }
}
