//! crates/logging-sink/src/stream.rs
//! Console outputs for standard output and standard error.

use std::io::{self, Write};

use is_terminal::IsTerminal;
use logging::{FilterRule, LogOutput, LogResult, Logger, SinkId};

/// Standard stream a [`StreamSink`] writes to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum StdStream {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

impl StdStream {
    /// Whether the stream is attached to a terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        match self {
            Self::Stdout => io::stdout().is_terminal(),
            Self::Stderr => io::stderr().is_terminal(),
        }
    }

    fn write_all(self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().lock().write_all(bytes),
            Self::Stderr => io::stderr().lock().write_all(bytes),
        }
    }
}

/// Sink output writing to stdout or stderr.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StreamSink {
    stream: StdStream,
}

impl StreamSink {
    /// Output to `stream`.
    #[must_use]
    pub const fn new(stream: StdStream) -> Self {
        Self { stream }
    }

    /// Target stream.
    #[must_use]
    pub const fn stream(&self) -> StdStream {
        self.stream
    }
}

impl LogOutput for StreamSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        match self.stream.write_all(bytes) {
            Ok(()) => bytes.len(),
            Err(_) => 0,
        }
    }
}

/// Registers a [`StreamSink`] and turns its color escapes off unless the
/// stream is a terminal.
///
/// The configured default filter is applied unchanged when it is enabled.
/// Otherwise a non-terminal stream gets a fresh rule that passes every
/// record, since color can only be switched off through an enabled filter.
pub fn attach_stream<const N: usize>(logger: &mut Logger<N>, stream: StdStream) -> LogResult<SinkId> {
    attach_output(logger, StreamSink::new(stream), stream.is_terminal())
}

fn attach_output<const N: usize, O>(logger: &mut Logger<N>, output: O, terminal: bool) -> LogResult<SinkId>
where
    O: LogOutput + 'static,
{
    let id = logger.register(output)?;
    if !terminal {
        let rule = logger.filter(id)?;
        let rule = if rule.enabled {
            FilterRule { colorful: false, ..rule }
        } else {
            FilterRule { enabled: true, colorful: false, ..FilterRule::new() }
        };
        logger.set_filter(id, rule)?;
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use logging::{FilterMode, Level, LoggerConfig, Record};
    use test_support::CaptureOutput;

    use super::*;

    fn quiet_default() -> LoggerConfig {
        LoggerConfig::new().with_default_filter(FilterRule {
            mode: FilterMode::Blacklist,
            level_floor: Level::Warn,
            tag: Some("noisy"),
            ..FilterRule::new()
        })
    }

    #[test]
    fn default_stream_is_stdout() {
        assert_eq!(StreamSink::default().stream(), StdStream::Stdout);
    }

    #[test]
    fn attach_stream_keeps_filter_open() {
        let mut logger: Logger = Logger::new();
        let id = attach_stream(&mut logger, StdStream::Stderr).unwrap();
        let rule = logger.filter(id).unwrap();
        assert_eq!(rule.level_floor, Level::Verbose);
        assert!(rule.tag.is_none());
        assert_eq!(rule.wants_color(), StdStream::Stderr.is_terminal());
    }

    #[test]
    fn piped_output_ignores_disabled_default_filter() {
        let mut logger: Logger = Logger::with_config(quiet_default());
        let capture = CaptureOutput::new();
        let id = attach_output(&mut logger, capture.clone(), false).unwrap();

        logger.log(&Record::new(Level::Info, "noisy", "kept", &[]));
        logger.log(&Record::new(Level::Verbose, "app", "kept too", &[]));

        assert_eq!(capture.text(), "I (none)-noisy: kept\nV (none)-app: kept too\n");
        let rule = logger.filter(id).unwrap();
        assert_eq!(rule.level_floor, Level::Verbose);
        assert!(rule.tag.is_none());
        assert!(!rule.wants_color());
    }

    #[test]
    fn piped_output_keeps_enabled_default_filter() {
        let config = quiet_default();
        let enabled = FilterRule { enabled: true, ..config.default_filter };
        let mut logger: Logger = Logger::with_config(config.with_default_filter(enabled));
        let capture = CaptureOutput::new();
        let id = attach_output(&mut logger, capture.clone(), false).unwrap();

        logger.log(&Record::new(Level::Warn, "noisy", "dropped", &[]));
        logger.log(&Record::new(Level::Error, "app", "kept", &[]));

        assert_eq!(capture.text(), "E (none)-app: kept\n");
        assert_eq!(logger.filter(id).unwrap(), FilterRule { colorful: false, ..enabled });
    }

    #[test]
    fn terminal_output_leaves_filter_alone() {
        let mut logger: Logger = Logger::with_config(quiet_default());
        let id = attach_output(&mut logger, CaptureOutput::new(), true).unwrap();
        assert_eq!(logger.filter(id).unwrap(), quiet_default().default_filter);
    }

    #[test]
    fn stream_sink_accepts_bytes() {
        let mut sink = StreamSink::new(StdStream::Stderr);
        assert_eq!(sink.write_bytes(b""), 0);
    }
}
