//! crates/logging/src/levels.rs
//! Severity levels, their prompt letters and colors, and the compile-time gate.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::LogError;

/// Record severity, ordered from silent to most verbose.
///
/// Comparisons follow the ordinal: `User < Error < ... < Verbose`. A record
/// passes a threshold when its level is less than or equal to it, so
/// `Level::None` as a threshold silences everything.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Level {
    /// No output; only meaningful as a threshold.
    None = 0,
    /// Unconditional user-facing output.
    User = 1,
    /// Errors.
    Error = 2,
    /// Warnings.
    Warn = 3,
    /// Informational messages.
    #[default]
    Info = 4,
    /// Debug diagnostics.
    Debug = 5,
    /// Everything.
    Verbose = 6,
}

impl Level {
    /// Every level in ordinal order.
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::User,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Verbose,
    ];

    /// Returns the level for an ordinal, if in range.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::User),
            2 => Some(Self::Error),
            3 => Some(Self::Warn),
            4 => Some(Self::Info),
            5 => Some(Self::Debug),
            6 => Some(Self::Verbose),
            _ => None,
        }
    }

    /// Ordinal value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Letter printed at the start of a decorated record.
    #[must_use]
    pub const fn prompt(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::User => Some('U'),
            Self::Error => Some('E'),
            Self::Warn => Some('W'),
            Self::Info => Some('I'),
            Self::Debug => Some('D'),
            Self::Verbose => Some('V'),
        }
    }

    /// Foreground color used when a sink receives color escapes.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::User => Some(Color::Blue),
            Self::Error => Some(Color::Red),
            Self::Warn => Some(Color::Yellow),
            Self::Info => Some(Color::Green),
            Self::Debug => Some(Color::Cyan),
            Self::None | Self::Verbose => None,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::User => "user",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Verbose => "verbose",
        }
    }

    /// Whether a record at this level passes `threshold`.
    #[must_use]
    pub const fn passes(self, threshold: Self) -> bool {
        !matches!(self, Self::None) && self.as_u8() <= threshold.as_u8()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Level {
    type Error = LogError;

    fn try_from(value: u8) -> Result<Self, LogError> {
        Self::from_u8(value).ok_or(LogError::InvalidArgument("level ordinal out of range"))
    }
}

impl FromStr for Level {
    type Err = LogError;

    /// Accepts names (`"warn"`, `"WARNING"`, `"verbose"`) or ordinals (`"3"`).
    fn from_str(s: &str) -> Result<Self, LogError> {
        let trimmed = s.trim();
        if let Ok(ordinal) = trimmed.parse::<u8>() {
            return Self::try_from(ordinal);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "user" | "u" => Ok(Self::User),
            "error" | "e" => Ok(Self::Error),
            "warn" | "warning" | "w" => Ok(Self::Warn),
            "info" | "i" => Ok(Self::Info),
            "debug" | "d" => Ok(Self::Debug),
            "verbose" | "trace" | "v" => Ok(Self::Verbose),
            _ => Err(LogError::InvalidArgument("unknown level name")),
        }
    }
}

/// Most verbose level the call-site macros compile in.
///
/// Selected with the `max-level-*` cargo features; defaults to [`Level::Info`].
/// Calls above it expand to nothing but still type-check their arguments.
pub const STATIC_MAX_LEVEL: Level = if cfg!(feature = "max-level-off") {
    Level::None
} else if cfg!(feature = "max-level-user") {
    Level::User
} else if cfg!(feature = "max-level-error") {
    Level::Error
} else if cfg!(feature = "max-level-warn") {
    Level::Warn
} else if cfg!(feature = "max-level-verbose") {
    Level::Verbose
} else if cfg!(feature = "max-level-debug") {
    Level::Debug
} else {
    Level::Info
};
