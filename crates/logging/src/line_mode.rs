//! crates/logging/src/line_mode.rs
//! Line terminator appended after each decorated record.

/// Controls which terminator the decorator writes after a record.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LineMode {
    /// Terminate records with `\n`.
    #[default]
    WithNewline,
    /// Terminate records with `\r\n`, for serial consoles that expect it.
    WithCrLf,
    /// Emit records without a terminator.
    WithoutNewline,
}

impl LineMode {
    /// Bytes written after each record.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::LineMode;
    ///
    /// assert_eq!(LineMode::WithNewline.terminator(), b"\n");
    /// assert_eq!(LineMode::WithCrLf.terminator(), b"\r\n");
    /// assert!(LineMode::WithoutNewline.terminator().is_empty());
    /// ```
    #[must_use]
    pub const fn terminator(self) -> &'static [u8] {
        match self {
            Self::WithNewline => b"\n",
            Self::WithCrLf => b"\r\n",
            Self::WithoutNewline => b"",
        }
    }
}
