//! crates/printf/src/engine.rs
//!
//! Format string walker.
//!
//! Literal runs and `%%` are emitted directly. A bare `%s` bypasses the
//! numeric primitive and emits the borrowed string as-is, so strings of any
//! length need no scratch space. Every other directive is rendered into a
//! fixed scratch buffer; when its output is longer than the buffer the
//! directive is rendered again for each following chunk, so the emitted bytes
//! always equal a single unbounded rendering.

use crate::arg::{Arg, ArgCursor};
use crate::directive::Directive;
use crate::render::format_window;

/// Size of the scratch buffer a directive is rendered into.
pub const FORMAT_BUFFER_SIZE: usize = 32;

/// One-shot byte output used by the engine.
///
/// Slices are only valid for the duration of the call.
pub trait Emit {
    /// Receives the next run of output bytes.
    fn emit(&mut self, bytes: &[u8]);
}

impl<F> Emit for F
where
    F: FnMut(&[u8]),
{
    fn emit(&mut self, bytes: &[u8]) {
        self(bytes);
    }
}

/// Formats `fmt` against `args`, emitting through `out`, and returns the
/// number of bytes emitted.
///
/// # Examples
///
/// ```
/// let mut line = Vec::new();
/// let written = printf::format(
///     &mut |bytes: &[u8]| line.extend_from_slice(bytes),
///     "%d-%s-%d",
///     &printf::args![1, "mid", 2],
/// );
/// assert_eq!(line, b"1-mid-2");
/// assert_eq!(written, 7);
/// ```
pub fn format<E>(out: &mut E, fmt: &str, args: &[Arg<'_>]) -> usize
where
    E: Emit + ?Sized,
{
    format_with_buffer::<E, FORMAT_BUFFER_SIZE>(out, fmt, args)
}

/// [`format`] with an explicit scratch buffer size.
pub fn format_with_buffer<E, const N: usize>(out: &mut E, fmt: &str, args: &[Arg<'_>]) -> usize
where
    E: Emit + ?Sized,
{
    const { assert!(N > 0, "scratch buffer must hold at least one byte") };

    let bytes = fmt.as_bytes();
    let mut total = 0;
    let mut consumed = 0;
    let mut at = 0;

    while at < bytes.len() {
        let run_end = memchr::memchr(b'%', &bytes[at..]).map_or(bytes.len(), |offset| at + offset);
        if run_end > at {
            out.emit(&bytes[at..run_end]);
            total += run_end - at;
        }
        at = run_end;
        if at >= bytes.len() {
            break;
        }

        match bytes.get(at + 1) {
            // A lone trailing `%` produces nothing.
            None => at += 1,
            Some(b'%') => {
                out.emit(b"%");
                total += 1;
                at += 2;
            }
            Some(b's') => {
                let text = ArgCursor::replay(args, consumed)
                    .next()
                    .and_then(Arg::as_str);
                if let Some(text) = text
                    && !text.is_empty()
                {
                    out.emit(text.as_bytes());
                    total += text.len();
                }
                consumed += 1;
                at += 2;
            }
            Some(_) => {
                let directive = Directive::scan(&bytes[at..]);
                let cursor = ArgCursor::replay(args, consumed);
                total += emit_directive::<E, N>(out, &directive, cursor);
                consumed += directive.consumed();
                at += directive.extent();
            }
        }
    }

    total
}

fn emit_directive<E, const N: usize>(out: &mut E, directive: &Directive, cursor: ArgCursor<'_>) -> usize
where
    E: Emit + ?Sized,
{
    let mut scratch = [0u8; N];
    let total = format_window(directive.syntax(), cursor, 0, &mut scratch);
    let mut written = total.min(N);
    if written > 0 {
        out.emit(&scratch[..written]);
    }

    while written < total {
        format_window(directive.syntax(), cursor, written, &mut scratch);
        let chunk = (total - written).min(N);
        out.emit(&scratch[..chunk]);
        written += chunk;
    }

    total
}

/// Formats into `buf`, truncating, and returns the untruncated length.
///
/// ```
/// let mut buf = [0u8; 4];
/// let len = printf::snformat(&mut buf, "%05d", &printf::args![42]);
/// assert_eq!(len, 5);
/// assert_eq!(&buf, b"0004");
/// ```
pub fn snformat(buf: &mut [u8], fmt: &str, args: &[Arg<'_>]) -> usize {
    let mut filled = 0;
    format(
        &mut |bytes: &[u8]| {
            let room = buf.len() - filled;
            let take = bytes.len().min(room);
            buf[filled..filled + take].copy_from_slice(&bytes[..take]);
            filled += take;
        },
        fmt,
        args,
    )
}
