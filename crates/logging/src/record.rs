//! crates/logging/src/record.rs
//! Per-call log record and its source location.

use printf::Arg;

use crate::levels::Level;

/// Source position attached to a record.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SourceLocation<'a> {
    file: &'a str,
    line: u32,
    function: Option<&'a str>,
}

impl<'a> SourceLocation<'a> {
    /// Creates a location from its parts.
    #[must_use]
    pub const fn new(file: &'a str, line: u32, function: Option<&'a str>) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Source file path.
    #[must_use]
    pub const fn file(&self) -> &'a str {
        self.file
    }

    /// One-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Enclosing function or module, when known.
    #[must_use]
    pub const fn function(&self) -> Option<&'a str> {
        self.function
    }
}

/// Captures the invocation site as a [`SourceLocation`].
///
/// Rust has no stable name for the enclosing function, so the module path is
/// recorded in its place.
#[macro_export]
macro_rules! source_location {
    () => {
        $crate::SourceLocation::new(::core::file!(), ::core::line!(), ::core::option::Option::Some(::core::module_path!()))
    };
}

/// One log call: level, tag, optional location, format string and arguments.
///
/// Records are built on the caller's stack and borrowed by the logger for the
/// duration of the call.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    level: Level,
    tag: &'a str,
    location: Option<SourceLocation<'a>>,
    format: &'a str,
    args: &'a [Arg<'a>],
}

impl<'a> Record<'a> {
    /// Creates a record without a source location.
    #[must_use]
    pub const fn new(level: Level, tag: &'a str, format: &'a str, args: &'a [Arg<'a>]) -> Self {
        Self {
            level,
            tag,
            location: None,
            format,
            args,
        }
    }

    /// Attaches a source location.
    #[must_use]
    pub const fn with_location(mut self, location: SourceLocation<'a>) -> Self {
        self.location = Some(location);
        self
    }

    /// Severity.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Tag printed after the prompt.
    #[must_use]
    pub const fn tag(&self) -> &'a str {
        self.tag
    }

    /// Source location, if attached.
    #[must_use]
    pub const fn location(&self) -> Option<SourceLocation<'a>> {
        self.location
    }

    /// Source file, if a location is attached.
    #[must_use]
    pub fn file(&self) -> Option<&'a str> {
        self.location.map(|location| location.file())
    }

    /// User format string.
    #[must_use]
    pub const fn format(&self) -> &'a str {
        self.format
    }

    /// Arguments for the format string.
    #[must_use]
    pub const fn args(&self) -> &'a [Arg<'a>] {
        self.args
    }
}
