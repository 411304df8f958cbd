//! crates/logging/src/decorator.rs
//!
//! Prologue and epilogue written around the user message:
//!
//! ```text
//! [color] <letter> (<ms>|none)-<tag> [ "[" file ":" line "(" func ")" "]" ] ": " <message> [reset] <terminator>
//! ```
//!
//! Every piece goes through the same output path as the message itself, and
//! the byte counts are summed into the returned total.

use printf::{Emit, args, format};

use crate::color::RESET;
use crate::levels::Level;
use crate::line_mode::LineMode;
use crate::record::Record;

/// Per-sink decoration settings resolved for one record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Decoration {
    /// Write the level's color escape and the trailing reset.
    pub color: bool,
    /// Records at or below this level carry their source location.
    pub info_level: Level,
    /// Milliseconds from the time source, or `None` for the placeholder.
    pub timestamp: Option<u32>,
    /// Terminator written last.
    pub line_mode: LineMode,
}

/// Writes `record` with its decoration to `out` and returns the byte count.
pub fn decorate<E>(out: &mut E, record: &Record<'_>, decoration: &Decoration) -> usize
where
    E: Emit + ?Sized,
{
    let level = record.level();
    let mut total = 0;

    let color = if decoration.color { level.color() } else { None };
    if let Some(color) = color {
        let escape = color.escape();
        out.emit(&escape);
        total += escape.len();
    }

    let prompt = level.prompt().unwrap_or(' ');
    total += match decoration.timestamp {
        Some(millis) => format(out, "%c (%lu)-%s", &args![prompt, millis, record.tag()]),
        None => format(out, "%c (none)-%s", &args![prompt, record.tag()]),
    };

    if level <= decoration.info_level
        && let Some(location) = record.location()
    {
        total += match location.function() {
            Some(function) => format(
                out,
                "[%s:%u(%s)]",
                &args![location.file(), location.line(), function],
            ),
            None => format(out, "[%s:%u]", &args![location.file(), location.line()]),
        };
    }

    out.emit(b": ");
    total += 2;

    total += format(out, record.format(), record.args());

    if color.is_some() {
        out.emit(RESET);
        total += RESET.len();
    }

    let terminator = decoration.line_mode.terminator();
    if !terminator.is_empty() {
        out.emit(terminator);
        total += terminator.len();
    }

    total
}
