//! # Group classifier
//!
//! Maps a catalog type tag to a group key with an **ordered list of prefix rules**.
//! The first rule whose prefix starts the tag wins; when nothing matches, the reserved
//! key [`UNKNOWN_GROUP`](crate::constants::UNKNOWN_GROUP) is returned.
//!
//! Declaration order matters when prefixes overlap. `"SB"` must come before `"S"`,
//! otherwise every barred spiral (`"SBa"`, `"SBc"`, ...) lands in the spiral bucket.
//! [`RuleTable::new`](crate::classifier::RuleTable::new) rejects tables where a rule can never
//! match for that reason, as well as duplicated prefixes.
//!
//! ```rust
//! use catalog_browser::classifier::{classify, GroupRule};
//!
//! let rules = [
//!     GroupRule::new("SB", "Galaxies (Barred Spiral)"),
//!     GroupRule::new("S", "Galaxies (Spiral)"),
//! ];
//! assert_eq!(classify("SBc", &rules), "Galaxies (Barred Spiral)");
//! assert_eq!(classify("Sa", &rules), "Galaxies (Spiral)");
//! assert_eq!(classify("PN", &rules), "Unknown");
//! ```
use std::borrow::Cow;

use itertools::Itertools;

use crate::browser_errors::BrowserError;
use crate::constants::{BODY_GROUP_PREFIXES, DSO_GROUP_PREFIXES, UNKNOWN_GROUP};

/// One `(prefix, bucket key)` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRule {
    pub prefix: Cow<'static, str>,
    pub key: Cow<'static, str>,
}

impl GroupRule {
    pub fn new(prefix: impl Into<Cow<'static, str>>, key: impl Into<Cow<'static, str>>) -> Self {
        GroupRule {
            prefix: prefix.into(),
            key: key.into(),
        }
    }

    pub fn matches(&self, type_tag: &str) -> bool {
        type_tag.starts_with(&*self.prefix)
    }
}

/// Classify `type_tag` against `rules`, in declaration order.
///
/// Matching is case-sensitive. Returns [`UNKNOWN_GROUP`] when no rule matches.
pub fn classify<'a>(type_tag: &str, rules: &'a [GroupRule]) -> &'a str {
    rules
        .iter()
        .find(|rule| rule.matches(type_tag))
        .map_or(UNKNOWN_GROUP, |rule| &*rule.key)
}

/// A validated, ordered list of prefix rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<GroupRule>,
}

impl RuleTable {
    /// Validate and wrap an ordered rule list.
    ///
    /// Arguments
    /// -----------------
    /// * `rules`: The rules, most specific prefix first.
    ///
    /// Return
    /// ----------
    /// * The table, or an error when the rule order is ambiguous.
    ///
    /// Errors
    /// ----------
    /// * [`BrowserError::DuplicatePrefixRule`] if a prefix is declared twice.
    /// * [`BrowserError::ShadowedPrefixRule`] if an earlier prefix is a prefix of a later one,
    ///   so the later rule can never match.
    pub fn new(rules: Vec<GroupRule>) -> Result<Self, BrowserError> {
        if let Some(prefix) = rules.iter().map(|r| &*r.prefix).duplicates().next() {
            return Err(BrowserError::DuplicatePrefixRule(prefix.to_string()));
        }

        for (i, rule) in rules.iter().enumerate() {
            let earlier = rules[..i]
                .iter()
                .find(|e| rule.prefix.starts_with(&*e.prefix));
            if let Some(earlier) = earlier {
                return Err(BrowserError::ShadowedPrefixRule {
                    prefix: rule.prefix.to_string(),
                    shadowed_by: earlier.prefix.to_string(),
                });
            }
        }

        Ok(RuleTable { rules })
    }

    /// Table whose bucket keys are the prefixes themselves.
    pub fn from_prefixes(prefixes: &[&'static str]) -> Result<Self, BrowserError> {
        RuleTable::new(
            prefixes
                .iter()
                .map(|&prefix| GroupRule::new(prefix, prefix))
                .collect(),
        )
    }

    pub fn classify(&self, type_tag: &str) -> &str {
        classify(type_tag, &self.rules)
    }

    /// Every key this table can return, in rule order, followed by [`UNKNOWN_GROUP`].
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .map(|r| &*r.key)
            .chain(std::iter::once(UNKNOWN_GROUP))
            .unique()
    }

    /// Position of `key` in [`keys`](RuleTable::keys), used to order groups.
    pub fn rank(&self, key: &str) -> usize {
        self.keys().position(|k| k == key).unwrap_or(usize::MAX)
    }

    pub fn rules(&self) -> &[GroupRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Prefix table for deep-sky object type tags.
pub fn deep_sky_rules() -> Result<RuleTable, BrowserError> {
    RuleTable::from_prefixes(&DSO_GROUP_PREFIXES)
}

/// Prefix table for solar-system body type tags.
pub fn body_rules() -> Result<RuleTable, BrowserError> {
    RuleTable::from_prefixes(&BODY_GROUP_PREFIXES)
}
