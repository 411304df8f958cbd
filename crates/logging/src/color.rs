//! crates/logging/src/color.rs
//! ANSI foreground colors emitted around decorated records.

/// Escape sequence that restores the default rendition.
pub const RESET: &[u8] = b"\x1b[0m";

/// One of the eight basic ANSI foreground colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Color {
    /// `30`.
    Black = b'0',
    /// `31`.
    Red = b'1',
    /// `32`.
    Green = b'2',
    /// `33`.
    Yellow = b'3',
    /// `34`.
    Blue = b'4',
    /// `35`.
    Magenta = b'5',
    /// `36`.
    Cyan = b'6',
    /// `37`.
    White = b'7',
}

impl Color {
    /// Digit following the `3` in the SGR parameter.
    #[must_use]
    pub const fn digit(self) -> u8 {
        self as u8
    }

    /// `ESC [ 0 ; 3 <digit> m`.
    #[must_use]
    pub const fn escape(self) -> [u8; 7] {
        [0x1b, b'[', b'0', b';', b'3', self.digit(), b'm']
    }
}
