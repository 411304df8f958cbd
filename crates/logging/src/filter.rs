//! crates/logging/src/filter.rs
//!
//! Per-sink filter rules and the decision function that applies them.
//!
//! A disabled rule lets every record through. An enabled rule first checks
//! the level floor and then the optional tag and file filters, stopping at the
//! first condition that skips the record. In blacklist mode a matching tag or
//! file skips the record; in whitelist mode a non-matching one does.

use crate::levels::Level;

/// How tag and file filters are interpreted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FilterMode {
    /// Skip records whose tag or file matches.
    #[default]
    Blacklist,
    /// Skip records whose tag or file does not match.
    Whitelist,
}

/// How a tag or file filter is compared with a record's value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatchPolicy {
    /// Strings match when their contents are equal.
    #[default]
    Content,
    /// Strings match only when they are the same slice in memory: same
    /// address and same length. Two literals with equal text may or may not
    /// share storage, so this only suits tags passed around as one constant.
    Identity,
}

impl MatchPolicy {
    /// Compares a configured filter string with a record's value.
    #[must_use]
    pub fn matches(self, filter: &str, candidate: &str) -> bool {
        match self {
            Self::Content => filter == candidate,
            Self::Identity => std::ptr::eq(filter, candidate),
        }
    }
}

/// Why a rule skipped a record.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SkipReason {
    /// The record is more verbose than the level floor.
    Level,
    /// The tag filter rejected the record.
    Tag,
    /// The file filter rejected the record.
    File,
}

/// Outcome of evaluating a [`FilterRule`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FilterDecision {
    /// Hand the record to the sink.
    Emit,
    /// Drop the record for this sink.
    Skip(SkipReason),
}

impl FilterDecision {
    /// Whether the record should be emitted.
    #[must_use]
    pub const fn is_emit(self) -> bool {
        matches!(self, Self::Emit)
    }
}

/// Filter configuration owned by one sink.
///
/// Tag and file filters borrow `'static` strings because they outlive any
/// single record and because identity matching needs the original slice.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterRule {
    /// Whether the rule applies at all.
    pub enabled: bool,
    /// Blacklist or whitelist.
    pub mode: FilterMode,
    /// Most verbose level the sink accepts.
    pub level_floor: Level,
    /// Optional tag filter.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub tag: Option<&'static str>,
    /// Optional source file filter.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub file: Option<&'static str>,
    /// Whether the sink receives color escapes while the rule is enabled.
    pub colorful: bool,
    /// How `tag` and `file` are compared.
    pub policy: MatchPolicy,
}

impl FilterRule {
    /// Disabled blacklist rule with a `Verbose` floor, no tag or file filter,
    /// and color on.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: false,
            mode: FilterMode::Blacklist,
            level_floor: Level::Verbose,
            tag: None,
            file: None,
            colorful: true,
            policy: MatchPolicy::Content,
        }
    }

    /// Decides whether a record with the given fields reaches the sink.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{FilterDecision, FilterMode, FilterRule, Level, SkipReason};
    ///
    /// let rule = FilterRule {
    ///     enabled: true,
    ///     mode: FilterMode::Whitelist,
    ///     tag: Some("net"),
    ///     ..FilterRule::new()
    /// };
    /// assert_eq!(rule.evaluate(Level::Info, "net", None), FilterDecision::Emit);
    /// assert_eq!(
    ///     rule.evaluate(Level::Info, "disk", None),
    ///     FilterDecision::Skip(SkipReason::Tag)
    /// );
    /// ```
    #[must_use]
    pub fn evaluate(&self, level: Level, tag: &str, file: Option<&str>) -> FilterDecision {
        if !self.enabled {
            return FilterDecision::Emit;
        }
        if self.level_floor < level {
            return FilterDecision::Skip(SkipReason::Level);
        }

        let whitelist = matches!(self.mode, FilterMode::Whitelist);
        if let Some(filter) = self.tag
            && self.policy.matches(filter, tag) != whitelist
        {
            return FilterDecision::Skip(SkipReason::Tag);
        }
        if let Some(filter) = self.file {
            let matched = file.is_some_and(|file| self.policy.matches(filter, file));
            if matched != whitelist {
                return FilterDecision::Skip(SkipReason::File);
            }
        }

        FilterDecision::Emit
    }

    /// Shorthand for `evaluate(..).is_emit()`.
    #[must_use]
    pub fn permits(&self, level: Level, tag: &str, file: Option<&str>) -> bool {
        self.evaluate(level, tag, file).is_emit()
    }

    /// Whether color escapes should be written for this sink.
    #[must_use]
    pub const fn wants_color(&self) -> bool {
        !self.enabled || self.colorful
    }
}

impl Default for FilterRule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(mode: FilterMode) -> FilterRule {
        FilterRule {
            enabled: true,
            mode,
            ..FilterRule::new()
        }
    }

    #[test]
    fn disabled_rule_emits_everything() {
        let rule = FilterRule {
            level_floor: Level::None,
            tag: Some("x"),
            ..FilterRule::new()
        };
        assert!(rule.permits(Level::Verbose, "x", Some("a.rs")));
    }

    #[test]
    fn blacklist_floor_blocks_more_verbose_records() {
        let rule = FilterRule {
            level_floor: Level::Info,
            ..enabled(FilterMode::Blacklist)
        };
        assert_eq!(
            rule.evaluate(Level::Verbose, "t", None),
            FilterDecision::Skip(SkipReason::Level)
        );
        assert!(rule.permits(Level::Error, "t", None));
        assert!(rule.permits(Level::Info, "t", None));
    }

    #[test]
    fn blacklist_skips_matching_tag_and_file() {
        let rule = FilterRule {
            tag: Some("noisy"),
            file: Some("src/spam.rs"),
            ..enabled(FilterMode::Blacklist)
        };
        assert_eq!(
            rule.evaluate(Level::Info, "noisy", None),
            FilterDecision::Skip(SkipReason::Tag)
        );
        assert_eq!(
            rule.evaluate(Level::Info, "quiet", Some("src/spam.rs")),
            FilterDecision::Skip(SkipReason::File)
        );
        assert!(rule.permits(Level::Info, "quiet", Some("src/main.rs")));
        assert!(rule.permits(Level::Info, "quiet", None));
    }

    #[test]
    fn whitelist_requires_matching_tag() {
        let rule = FilterRule {
            tag: Some("X"),
            ..enabled(FilterMode::Whitelist)
        };
        assert!(rule.permits(Level::Info, "X", None));
        assert_eq!(
            rule.evaluate(Level::User, "Y", None),
            FilterDecision::Skip(SkipReason::Tag)
        );
    }

    #[test]
    fn whitelist_file_filter_rejects_records_without_location() {
        let rule = FilterRule {
            file: Some("src/net.rs"),
            ..enabled(FilterMode::Whitelist)
        };
        assert!(rule.permits(Level::Info, "t", Some("src/net.rs")));
        assert_eq!(
            rule.evaluate(Level::Info, "t", None),
            FilterDecision::Skip(SkipReason::File)
        );
    }

    #[test]
    fn level_check_wins_over_tag_check() {
        let rule = FilterRule {
            level_floor: Level::Warn,
            tag: Some("X"),
            ..enabled(FilterMode::Whitelist)
        };
        assert_eq!(
            rule.evaluate(Level::Debug, "Y", None),
            FilterDecision::Skip(SkipReason::Level)
        );
    }

    #[test]
    fn identity_policy_compares_slices_not_text() {
        let owned = String::from("X");
        let rule = FilterRule {
            tag: Some("X"),
            policy: MatchPolicy::Identity,
            ..enabled(FilterMode::Whitelist)
        };
        let same = rule.tag.unwrap_or_default();
        assert!(rule.permits(Level::Info, same, None));
        assert!(!rule.permits(Level::Info, owned.as_str(), None));
    }

    #[test]
    fn identity_requires_equal_length() {
        let text: &'static str = "abc";
        assert!(MatchPolicy::Identity.matches(text, text));
        assert!(!MatchPolicy::Identity.matches(text, &text[..2]));
    }

    #[test]
    fn content_policy_compares_text() {
        let owned = String::from("X");
        assert!(MatchPolicy::Content.matches("X", &owned));
        assert!(!MatchPolicy::Content.matches("X", "x"));
    }

    #[test]
    fn color_follows_rule_state() {
        let mut rule = FilterRule {
            colorful: false,
            ..FilterRule::new()
        };
        assert!(rule.wants_color());
        rule.enabled = true;
        assert!(!rule.wants_color());
        rule.colorful = true;
        assert!(rule.wants_color());
    }
}
