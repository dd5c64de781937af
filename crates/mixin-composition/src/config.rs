//! Composition configuration
//!
//! Serde-loadable description of the naming convention table. The defaults
//! reproduce the fixed table in [`crate::convention`].

use crate::convention::{
    is_identifier, MemberClass, BEHAVIORS_FIELD, LIFECYCLE_HOOKS, MERGEABLE_COLLECTIONS,
    OBSERVER_SUFFIX,
};
use crate::error::CompositionError;
use serde::{Deserialize, Serialize};

/// Naming convention configuration
///
/// # Examples
/// ```
/// # use mixin_composition::CompositionConfig;
/// let config = CompositionConfig::from_yaml("mergeable_collections: [publish, listeners]\n").unwrap();
/// assert_eq!(config.mergeable_collections, vec!["publish", "listeners"]);
/// assert_eq!(config.observer_suffix.as_deref(), Some("Changed"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Hook names that are always chained
    pub lifecycle_hooks: Vec<String>,

    /// Observer suffix; `None` disables the observer rule
    pub observer_suffix: Option<String>,

    /// Collection properties merged across descriptors
    pub mergeable_collections: Vec<String>,

    /// Extra names skipped during composition (the behavior field always is)
    pub ignored: Vec<String>,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            lifecycle_hooks: LIFECYCLE_HOOKS.iter().map(|s| (*s).to_string()).collect(),
            observer_suffix: Some(OBSERVER_SUFFIX.to_string()),
            mergeable_collections: MERGEABLE_COLLECTIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            ignored: Vec::new(),
        }
    }
}

impl CompositionConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lifecycle hook
    #[must_use]
    pub fn with_lifecycle_hook(mut self, name: impl Into<String>) -> Self {
        self.lifecycle_hooks.push(name.into());
        self
    }

    /// Set observer suffix
    #[must_use]
    pub fn with_observer_suffix(mut self, suffix: Option<&str>) -> Self {
        self.observer_suffix = suffix.map(str::to_string);
        self
    }

    /// Add a mergeable collection
    #[must_use]
    pub fn with_mergeable_collection(mut self, name: impl Into<String>) -> Self {
        self.mergeable_collections.push(name.into());
        self
    }

    /// Add an ignored name
    #[must_use]
    pub fn with_ignored(mut self, name: impl Into<String>) -> Self {
        self.ignored.push(name.into());
        self
    }

    /// Parse from JSON
    ///
    /// # Errors
    /// Returns error if JSON is invalid or the table is inconsistent
    pub fn from_json(json: &str) -> Result<Self, CompositionError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML
    ///
    /// # Errors
    /// Returns error if YAML is invalid or the table is inconsistent
    pub fn from_yaml(yaml: &str) -> Result<Self, CompositionError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every name lands in exactly one class
    ///
    /// # Errors
    /// - Empty observer suffix
    /// - A name listed in two classes
    /// - A mergeable or ignored name that the observer rule would chain
    /// - The behavior field listed as a hook or collection
    pub fn validate(&self) -> Result<(), CompositionError> {
        if matches!(self.observer_suffix.as_deref(), Some("")) {
            return Err(CompositionError::InvalidConfig(
                "observer suffix must not be empty".to_string(),
            ));
        }

        let classed = self
            .lifecycle_hooks
            .iter()
            .map(|n| (n, MemberClass::ChainedMethod))
            .chain(
                self.mergeable_collections
                    .iter()
                    .map(|n| (n, MemberClass::MergeableCollection)),
            )
            .chain(self.ignored.iter().map(|n| (n, MemberClass::Ignored)));

        let mut seen: Vec<(&String, MemberClass)> = Vec::new();
        for (name, class) in classed {
            if name == BEHAVIORS_FIELD && class != MemberClass::Ignored {
                return Err(CompositionError::conflicting(
                    name,
                    MemberClass::Ignored,
                    class,
                ));
            }
            if class != MemberClass::ChainedMethod && self.matches_observer(name) {
                return Err(CompositionError::conflicting(
                    name,
                    MemberClass::ChainedMethod,
                    class,
                ));
            }
            if let Some((_, first)) = seen.iter().find(|(n, c)| *n == name && *c != class) {
                return Err(CompositionError::conflicting(name, *first, class));
            }
            seen.push((name, class));
        }

        Ok(())
    }

    fn matches_observer(&self, name: &str) -> bool {
        self.observer_suffix
            .as_deref()
            .and_then(|suffix| name.strip_suffix(suffix))
            .is_some_and(is_identifier)
    }
}
