//! crates/logging/src/config.rs
//! Runtime logger configuration.

use crate::filter::FilterRule;
use crate::levels::Level;
use crate::line_mode::LineMode;

/// Settings shared by every sink of a [`Logger`](crate::Logger).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Records more verbose than this reach no sink.
    pub global_level: Level,
    /// Terminator written after each record.
    pub line_mode: LineMode,
    /// Master switch for color escapes.
    pub colors: bool,
    /// Location threshold given to newly registered sinks.
    pub default_info_level: Level,
    /// Filter rule given to newly registered sinks.
    pub default_filter: FilterRule,
}

impl LoggerConfig {
    /// Everything on: `Verbose` global level, `\n` terminator, colors,
    /// locations on `User` and `Error` records, filters disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            global_level: Level::Verbose,
            line_mode: LineMode::WithNewline,
            colors: true,
            default_info_level: Level::Error,
            default_filter: FilterRule::new(),
        }
    }

    /// Sets the global level.
    #[must_use]
    pub const fn with_global_level(mut self, level: Level) -> Self {
        self.global_level = level;
        self
    }

    /// Sets the line terminator.
    #[must_use]
    pub const fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Enables or disables color escapes.
    #[must_use]
    pub const fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Sets the location threshold for new sinks.
    #[must_use]
    pub const fn with_default_info_level(mut self, level: Level) -> Self {
        self.default_info_level = level;
        self
    }

    /// Sets the filter rule for new sinks.
    #[must_use]
    pub const fn with_default_filter(mut self, filter: FilterRule) -> Self {
        self.default_filter = filter;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new()
    }
}
