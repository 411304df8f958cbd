//! crates/printf/src/arg.rs
//!
//! Type-erased argument slots and the positional cursor that resolves them.
//!
//! A call site collects its arguments once into a slice of [`Arg`] values.
//! Every directive in the format string is then resolved by position: the
//! engine keeps a running count of consumed slots and asks
//! [`ArgCursor::replay`] for a fresh cursor positioned after them. Because the
//! slots live in a slice the replay is a constant-time index rather than a
//! walk from the origin.

/// One formatting argument captured at the call site.
///
/// Conversions coerce between slots the same way a C `va_arg` read would:
/// an [`Arg::Int`] consumed by `%x` is reinterpreted as unsigned, an
/// [`Arg::Char`] consumed by `%d` yields its scalar value, and so on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arg<'a> {
    /// Signed integer of any width.
    Int(i64),
    /// Unsigned integer of any width, including sizes.
    Uint(u64),
    /// Floating point value.
    Float(f64),
    /// Borrowed string consumed by `%s`.
    Str(&'a str),
    /// Single character consumed by `%c`.
    Char(char),
    /// Address-sized value consumed by `%p`.
    Ptr(usize),
}

impl<'a> Arg<'a> {
    /// Reads the slot as a signed integer.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Int(value) => value,
            Self::Uint(value) => value as i64,
            Self::Float(value) => value as i64,
            Self::Str(value) => value.as_ptr() as usize as i64,
            Self::Char(value) => i64::from(u32::from(value)),
            Self::Ptr(value) => value as i64,
        }
    }

    /// Reads the slot as an unsigned integer.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        match self {
            Self::Int(value) => value as u64,
            Self::Uint(value) => value,
            Self::Float(value) => value as u64,
            Self::Str(value) => value.as_ptr() as usize as u64,
            Self::Char(value) => u64::from(u32::from(value)),
            Self::Ptr(value) => value as u64,
        }
    }

    /// Reads the slot as a double.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Uint(value) => value as f64,
            Self::Float(value) => value,
            Self::Str(_) => 0.0,
            Self::Char(value) => f64::from(u32::from(value)),
            Self::Ptr(value) => value as f64,
        }
    }

    /// Reads the slot as a character.
    ///
    /// Integer slots are truncated to a byte, matching `%c` on an `int`.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Char(value) => value,
            other => char::from(other.as_u64() as u8),
        }
    }

    /// Returns the borrowed string when the slot holds one.
    #[must_use]
    pub const fn as_str(self) -> Option<&'a str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg<'_> {
                fn from(value: $ty) -> Self {
                    Self::Int(value as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg<'_> {
                fn from(value: $ty) -> Self {
                    Self::Uint(value as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f32> for Arg<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value.as_str())
    }
}

impl<T> From<*const T> for Arg<'_> {
    fn from(value: *const T) -> Self {
        Self::Ptr(value as usize)
    }
}

impl<T> From<*mut T> for Arg<'_> {
    fn from(value: *mut T) -> Self {
        Self::Ptr(value as usize)
    }
}

/// Forward cursor over a call's argument slots.
///
/// Cursors are `Copy`, so a directive that has to be rendered several times
/// (once to measure, once per output chunk) reads the same operands on every
/// pass.
#[derive(Clone, Copy, Debug)]
pub struct ArgCursor<'a> {
    args: &'a [Arg<'a>],
    position: usize,
}

impl<'a> ArgCursor<'a> {
    /// Creates a cursor at the first slot.
    #[must_use]
    pub const fn new(args: &'a [Arg<'a>]) -> Self {
        Self::replay(args, 0)
    }

    /// Returns a fresh cursor that has skipped the first `consumed` slots.
    #[must_use]
    pub const fn replay(args: &'a [Arg<'a>], consumed: usize) -> Self {
        Self {
            args,
            position: consumed,
        }
    }

    /// Index of the slot the next read returns.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of slots left to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.args.len().saturating_sub(self.position)
    }
}

impl<'a> Iterator for ArgCursor<'a> {
    type Item = Arg<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let arg = self.args.get(self.position).copied()?;
        self.position += 1;
        Some(arg)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

/// Builds an array of [`Arg`] slots from heterogeneous expressions.
///
/// ```
/// let name = String::from("sensor");
/// let args = printf::args![42, "mid", 'c', 1.5, &name];
/// assert_eq!(args.len(), 5);
/// assert_eq!(args[1], printf::Arg::Str("mid"));
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::Arg::from($arg)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_conversions_keep_sign() {
        assert_eq!(Arg::from(-5i8), Arg::Int(-5));
        assert_eq!(Arg::from(7u16), Arg::Uint(7));
        assert_eq!(Arg::from(usize::MAX), Arg::Uint(usize::MAX as u64));
        assert_eq!(Arg::from(true), Arg::Int(1));
    }

    #[test]
    fn signed_slot_reinterprets_as_unsigned() {
        assert_eq!(Arg::Int(-1).as_u64(), u64::MAX);
        assert_eq!(Arg::Uint(u64::MAX).as_i64(), -1);
    }

    #[test]
    fn char_slot_reads_as_scalar_value() {
        assert_eq!(Arg::Char('A').as_i64(), 65);
        assert_eq!(Arg::Int(66).as_char(), 'B');
        assert_eq!(Arg::Int(0x141).as_char(), 'A');
    }

    #[test]
    fn only_string_slots_expose_str() {
        assert_eq!(Arg::Str("tag").as_str(), Some("tag"));
        assert_eq!(Arg::Int(3).as_str(), None);
    }

    #[test]
    fn replay_skips_consumed_slots() {
        let args = args![1, "mid", 2];
        let mut cursor = ArgCursor::replay(&args, 2);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.next(), Some(Arg::Int(2)));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn replay_past_end_yields_nothing() {
        let args = args![1];
        let mut cursor = ArgCursor::replay(&args, 5);
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.position(), 5);
    }

    #[test]
    fn copied_cursor_rereads_same_operands() {
        let args = args![10, 20];
        let origin = ArgCursor::new(&args);
        let mut first = origin;
        let mut second = origin;
        assert_eq!(first.next(), second.next());
        assert_eq!(first.next(), Some(Arg::Int(20)));
    }
}
