//! crates/logging/src/tracing_bridge.rs
//! Bridge from the `tracing` ecosystem into the process-wide logger.
//!
//! [`XfLogLayer`] is a `tracing-subscriber` layer that turns each event into a
//! [`Record`]: the event level picks the [`Level`], the target becomes the
//! tag, and the event's source position becomes the location. The message is
//! rendered into a fixed stack buffer and logged with a `%s` format, so the
//! bridge allocates nothing per event.
//!
//! Events raised while the current thread is already inside the logger (for
//! example the registry's own diagnostics) are dropped rather than deadlocking.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::init_tracing;
//!
//! init_tracing().expect("no other subscriber installed");
//! tracing::warn!(target: "net", "link down");
//! ```

use std::fmt::{self, Write as _};

use printf::Arg;
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::global;
use crate::levels::Level;
use crate::record::{Record, SourceLocation};

/// Bytes of event text kept per event; longer messages are cut at a character
/// boundary.
pub const EVENT_MESSAGE_CAPACITY: usize = 256;

/// Tracing layer forwarding events to the process-wide logger.
#[derive(Clone, Copy, Debug, Default)]
pub struct XfLogLayer {
    _private: (),
}

impl XfLogLayer {
    /// Creates the layer.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Maps a tracing level onto a log level.
    #[must_use]
    pub const fn map_level(level: &tracing::Level) -> Level {
        match *level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::TRACE => Level::Verbose,
        }
    }
}

impl<S> Layer<S> for XfLogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if global::is_active() {
            return;
        }
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let args = [Arg::Str(visitor.message.as_str())];
        let mut record = Record::new(
            Self::map_level(metadata.level()),
            metadata.target(),
            "%s",
            &args,
        );
        if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
            record = record.with_location(SourceLocation::new(
                file,
                line,
                metadata.module_path(),
            ));
        }
        let _ = global::try_log(&record);
    }
}

/// Fixed-capacity UTF-8 text buffer.
struct StackMessage {
    buf: [u8; EVENT_MESSAGE_CAPACITY],
    len: usize,
}

impl Default for StackMessage {
    fn default() -> Self {
        Self {
            buf: [0; EVENT_MESSAGE_CAPACITY],
            len: 0,
        }
    }
}

impl StackMessage {
    fn as_str(&self) -> &str {
        // Only whole characters are ever copied in.
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Write for StackMessage {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = EVENT_MESSAGE_CAPACITY - self.len;
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

/// Collects the `message` field followed by ` name=value` for other fields.
#[derive(Default)]
struct MessageVisitor {
    message: StackMessage,
}

impl MessageVisitor {
    fn separate(&mut self, field: &Field) {
        if field.name() != "message" {
            if !self.message.is_empty() {
                let _ = self.message.write_char(' ');
            }
            let _ = write!(self.message, "{}=", field.name());
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.separate(field);
        let _ = self.message.write_str(value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.separate(field);
        let _ = write!(self.message, "{value:?}");
    }
}

/// Installs a global subscriber that forwards every event to the
/// process-wide logger.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry().with(XfLogLayer::new()).try_init()
}

/// Like [`init_tracing`] with an additional filter layer in front of the
/// bridge.
///
/// # Example
///
/// ```rust,ignore
/// use logging::init_tracing_with_filter;
/// use tracing_subscriber::filter::LevelFilter;
///
/// init_tracing_with_filter(LevelFilter::WARN).expect("first subscriber");
/// ```
pub fn init_tracing_with_filter<F>(filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(XfLogLayer::new())
        .try_init()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::layer::SubscriberExt;

    use super::*;
    use crate::config::LoggerConfig;
    use crate::logger::Logger;

    fn with_captured<F: FnOnce()>(body: F) -> String {
        let _serial = global::serial();
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);

        let mut logger: Logger = Logger::with_config(LoggerConfig::new().with_colors(false));
        let id = logger
            .register(move |bytes: &[u8]| sink.lock().unwrap().extend_from_slice(bytes))
            .unwrap();
        logger.set_info_level(id, Level::None).unwrap();
        global::install(logger).unwrap();

        let subscriber = tracing_subscriber::registry().with(XfLogLayer::new());
        tracing::subscriber::with_default(subscriber, body);

        global::reset().unwrap();
        let bytes = buffer.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn maps_tracing_levels() {
        assert_eq!(XfLogLayer::map_level(&tracing::Level::ERROR), Level::Error);
        assert_eq!(XfLogLayer::map_level(&tracing::Level::WARN), Level::Warn);
        assert_eq!(XfLogLayer::map_level(&tracing::Level::INFO), Level::Info);
        assert_eq!(XfLogLayer::map_level(&tracing::Level::DEBUG), Level::Debug);
        assert_eq!(XfLogLayer::map_level(&tracing::Level::TRACE), Level::Verbose);
    }

    #[test]
    fn event_becomes_record_with_target_as_tag() {
        let text = with_captured(|| {
            tracing::warn!(target: "net", "link down");
        });
        assert_eq!(text, "W (none)-net: link down\n");
    }

    #[test]
    fn fields_follow_message() {
        let text = with_captured(|| {
            tracing::error!(target: "disk", code = 5, "write failed");
        });
        assert_eq!(text, "E (none)-disk: write failed code=5\n");
    }

    #[test]
    fn long_messages_are_truncated_on_char_boundary() {
        let mut message = StackMessage::default();
        let long = "é".repeat(EVENT_MESSAGE_CAPACITY);
        message.write_str(&long).unwrap();
        assert!(message.as_str().len() <= EVENT_MESSAGE_CAPACITY);
        assert!(message.as_str().chars().all(|c| c == 'é'));
        assert_eq!(message.as_str().len(), EVENT_MESSAGE_CAPACITY);
    }
}
