#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/printf/src/lib.rs
//!
//! # Overview
//!
//! `printf` interprets C-style format strings without touching the heap. It is
//! the rendering core behind the `logging` crate: log prologues, user
//! messages and raw printf output all flow through [`format`].
//!
//! # Design
//!
//! - Arguments are captured once per call into a slice of [`Arg`] slots and
//!   resolved by position through [`ArgCursor::replay`].
//! - [`Directive::scan`] finds the extent of each `%...` directive and how many
//!   slots it consumes; the syntax is kept in a buffer of
//!   [`SPECIFIER_CAPACITY`] bytes.
//! - [`format_window`] renders one directive and stores a caller-chosen
//!   window of its output, returning the full length. The engine pulls
//!   [`FORMAT_BUFFER_SIZE`]-byte chunks through it, so arbitrarily wide
//!   directives are emitted exactly as a single unbounded rendering would be.
//! - A bare `%s` never touches the scratch buffer; the string is emitted as-is.
//!
//! # Conversions
//!
//! `d i u o x X b c p s f F e E g G`, flags `- + space # 0`, width and
//! precision as digits or `*`, length modifiers `hh h l ll j z t`. Without a
//! length modifier integers are truncated to 32 bits, as a C `int` would be.
//! Malformed directives degrade to best-effort output instead of failing.
//!
//! # Examples
//!
//! ```
//! use printf::{args, format};
//!
//! let mut line = Vec::new();
//! let len = format(
//!     &mut |bytes: &[u8]| line.extend_from_slice(bytes),
//!     "%s: %05.1f%% of %#x",
//!     &args!["load", 42.26, 255],
//! );
//! assert_eq!(line, b"load: 042.3% of 0xff");
//! assert_eq!(len, line.len());
//! ```

mod arg;
mod directive;
mod engine;
mod render;

pub use crate::arg::{Arg, ArgCursor};
pub use crate::directive::{Directive, SPECIFIER_CAPACITY};
pub use crate::engine::{Emit, FORMAT_BUFFER_SIZE, format, format_with_buffer, snformat};
pub use crate::render::{DEFAULT_PRECISION, MAX_FLOAT, format_window};
