//! crates/printf/src/directive.rs
//!
//! Scanner for a single `%...` conversion directive.
//!
//! The scanner only finds where a directive ends and how many argument slots
//! it consumes. Interpreting the directive is left to
//! [`format_window`](crate::format_window), which re-reads the captured
//! syntax. The syntax is held in a fixed-capacity buffer; a pathologically
//! long directive is truncated silently and rendered from whatever fits.

/// Capacity of the buffer holding one directive's syntax, including the `%`.
pub const SPECIFIER_CAPACITY: usize = 16;

const FLAGS: &[u8] = b"-+ #0";
const LENGTHS: &[u8] = b"hljzt";
const CONVERSIONS: &[u8] = b"EFGXbcdefgiopsux";

/// One scanned conversion directive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Directive {
    syntax: [u8; SPECIFIER_CAPACITY],
    len: usize,
    extent: usize,
    consumed: usize,
    conversion: Option<u8>,
    truncated: bool,
}

impl Directive {
    /// Scans the directive at the start of `input`, which must begin with `%`.
    ///
    /// Scanning stops before the first byte that cannot belong to the
    /// directive. When that byte is not a known conversion the directive has
    /// no conversion, consumes no operand slot, and the byte is left for the
    /// caller to treat as literal text.
    #[must_use]
    pub fn scan(input: &[u8]) -> Self {
        let mut directive = Self {
            syntax: [0; SPECIFIER_CAPACITY],
            len: 0,
            extent: 0,
            consumed: 0,
            conversion: None,
            truncated: false,
        };

        if input.first() != Some(&b'%') {
            return directive;
        }
        directive.take(input);

        while directive.peek(input).is_some_and(|byte| FLAGS.contains(&byte)) {
            directive.take(input);
        }

        if directive.peek(input) == Some(b'*') {
            directive.take(input);
            directive.consumed += 1;
        } else {
            while directive.peek(input).is_some_and(|byte| byte.is_ascii_digit()) {
                directive.take(input);
            }
        }

        if directive.peek(input) == Some(b'.') {
            directive.take(input);
            if directive.peek(input) == Some(b'*') {
                directive.take(input);
                directive.consumed += 1;
            } else {
                while directive.peek(input).is_some_and(|byte| byte.is_ascii_digit()) {
                    directive.take(input);
                }
            }
        }

        if directive.peek(input).is_some_and(|byte| LENGTHS.contains(&byte)) {
            directive.take(input);
            if matches!(directive.peek(input), Some(b'h' | b'l')) {
                directive.take(input);
            }
        }

        if let Some(byte) = directive.peek(input)
            && CONVERSIONS.contains(&byte)
        {
            directive.take(input);
            directive.conversion = Some(byte);
            directive.consumed += 1;
        }

        directive
    }

    fn peek(&self, input: &[u8]) -> Option<u8> {
        input.get(self.extent).copied()
    }

    fn take(&mut self, input: &[u8]) {
        let byte = input[self.extent];
        self.extent += 1;
        if self.len < SPECIFIER_CAPACITY {
            self.syntax[self.len] = byte;
            self.len += 1;
        } else {
            self.truncated = true;
        }
    }

    /// Captured directive syntax, starting with `%`.
    #[must_use]
    pub fn syntax(&self) -> &[u8] {
        &self.syntax[..self.len]
    }

    /// Number of input bytes the directive spans.
    #[must_use]
    pub const fn extent(&self) -> usize {
        self.extent
    }

    /// Number of argument slots the directive reads, `*` fields included.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Conversion character, if one was recognised.
    #[must_use]
    pub const fn conversion(&self) -> Option<u8> {
        self.conversion
    }

    /// Whether the syntax buffer overflowed while scanning.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }
}
