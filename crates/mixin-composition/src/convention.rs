//! Naming convention table and member classifier
//!
//! Every member name is classified by name alone, so the same name gets the
//! same treatment no matter which descriptor contributes it.

use crate::config::CompositionConfig;
use crate::error::CompositionError;
use std::collections::BTreeSet;

/// Lifecycle hooks that are always chained
pub const LIFECYCLE_HOOKS: [&str; 6] = [
    "created",
    "ready",
    "attached",
    "domReady",
    "detached",
    "attributeChanged",
];

/// Suffix of property-change observers (`<identifier>Changed`)
pub const OBSERVER_SUFFIX: &str = "Changed";

/// Collection properties that are merged across descriptors
pub const MERGEABLE_COLLECTIONS: [&str; 5] =
    ["publish", "published", "computed", "eventDelegates", "observe"];

/// Name of the behavior list field; never copied as a member
pub const BEHAVIORS_FIELD: &str = "behaviors";

/// Treatment applied to a member name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberClass {
    /// Every implementation runs through a synthesized chain
    ChainedMethod,

    /// Sequences concatenate, mappings merge key by key
    MergeableCollection,

    /// Skipped entirely
    Ignored,

    /// Last writer wins
    Plain,
}

impl MemberClass {
    /// Check for chained treatment
    #[inline]
    #[must_use]
    pub fn is_chained(&self) -> bool {
        matches!(self, Self::ChainedMethod)
    }
}

/// Statically enumerable classification table
///
/// # Rules (checked in this order)
/// 1. Exact lifecycle hook name, or `<identifier>` + observer suffix where
///    identifier is one or more ASCII letters, digits or `_` → chained
/// 2. Mergeable collection name → mergeable
/// 3. [`BEHAVIORS_FIELD`] or a configured ignored name → ignored
/// 4. Anything else → plain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    lifecycle_hooks: BTreeSet<String>,
    observer_suffix: Option<String>,
    mergeable: BTreeSet<String>,
    ignored: BTreeSet<String>,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            lifecycle_hooks: LIFECYCLE_HOOKS.iter().map(|s| (*s).to_string()).collect(),
            observer_suffix: Some(OBSERVER_SUFFIX.to_string()),
            mergeable: MERGEABLE_COLLECTIONS.iter().map(|s| (*s).to_string()).collect(),
            ignored: std::iter::once(BEHAVIORS_FIELD.to_string()).collect(),
        }
    }
}

impl NamingConvention {
    /// Build table from configuration
    ///
    /// # Errors
    /// Returns error if the configuration is inconsistent
    pub fn from_config(config: &CompositionConfig) -> Result<Self, CompositionError> {
        config.validate()?;

        let mut ignored: BTreeSet<String> = config.ignored.iter().cloned().collect();
        ignored.insert(BEHAVIORS_FIELD.to_string());

        Ok(Self {
            lifecycle_hooks: config.lifecycle_hooks.iter().cloned().collect(),
            observer_suffix: config.observer_suffix.clone(),
            mergeable: config.mergeable_collections.iter().cloned().collect(),
            ignored,
        })
    }

    /// Classify a member name
    #[must_use]
    pub fn classify(&self, name: &str) -> MemberClass {
        if self.lifecycle_hooks.contains(name) || self.is_observer(name) {
            MemberClass::ChainedMethod
        } else if self.mergeable.contains(name) {
            MemberClass::MergeableCollection
        } else if self.ignored.contains(name) {
            MemberClass::Ignored
        } else {
            MemberClass::Plain
        }
    }

    /// Check the observer naming rule
    #[must_use]
    pub fn is_observer(&self, name: &str) -> bool {
        let Some(suffix) = self.observer_suffix.as_deref() else {
            return false;
        };
        name.strip_suffix(suffix).is_some_and(is_identifier)
    }

    /// Lifecycle hook names
    pub fn lifecycle_hooks(&self) -> impl Iterator<Item = &str> {
        self.lifecycle_hooks.iter().map(String::as_str)
    }

    /// Observer suffix, if observers are chained
    #[inline]
    #[must_use]
    pub fn observer_suffix(&self) -> Option<&str> {
        self.observer_suffix.as_deref()
    }

    /// Mergeable collection names
    pub fn mergeable_collections(&self) -> impl Iterator<Item = &str> {
        self.mergeable.iter().map(String::as_str)
    }

    /// Ignored names
    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignored.iter().map(String::as_str)
    }
}

/// Non-empty run of ASCII letters, digits and `_`
pub(crate) fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_hooks_are_chained() {
        let table = NamingConvention::default();
        for hook in LIFECYCLE_HOOKS {
            assert_eq!(table.classify(hook), MemberClass::ChainedMethod, "{hook}");
        }
    }

    #[test]
    fn observers_are_chained() {
        let table = NamingConvention::default();
        assert!(table.classify("valueChanged").is_chained());
        assert!(table.classify("item_2Changed").is_chained());
        assert!(table.classify("XChanged").is_chained());
    }

    #[test]
    fn malformed_observers_are_plain() {
        let table = NamingConvention::default();
        assert_eq!(table.classify("Changed"), MemberClass::Plain);
        assert_eq!(table.classify("value-Changed"), MemberClass::Plain);
        assert_eq!(table.classify("valueChangedLater"), MemberClass::Plain);
        assert_eq!(table.classify("valuechanged"), MemberClass::Plain);
    }

    #[test]
    fn collections_and_ignored() {
        let table = NamingConvention::default();
        for name in MERGEABLE_COLLECTIONS {
            assert_eq!(table.classify(name), MemberClass::MergeableCollection);
        }
        assert_eq!(table.classify("behaviors"), MemberClass::Ignored);
        assert_eq!(table.classify("title"), MemberClass::Plain);
        assert_eq!(table.classify("onClick"), MemberClass::Plain);
    }

    #[test]
    fn config_table_always_ignores_behaviors() {
        let config = CompositionConfig::default().with_ignored("secret");
        let table = NamingConvention::from_config(&config).unwrap();
        assert_eq!(table.classify("secret"), MemberClass::Ignored);
        assert_eq!(table.classify("behaviors"), MemberClass::Ignored);
    }

    #[test]
    fn observer_rule_can_be_disabled() {
        let config = CompositionConfig::default().with_observer_suffix(None);
        let table = NamingConvention::from_config(&config).unwrap();
        assert_eq!(table.classify("valueChanged"), MemberClass::Plain);
        assert!(table.classify("ready").is_chained());
        assert_eq!(table.observer_suffix(), None);
    }

    #[test]
    fn identifier_rule() {
        assert!(is_identifier("a_1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a b"));
    }
}
