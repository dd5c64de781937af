//! Error types for composition
//!
//! Two tiers:
//! - [`CompositionError`]: configuration problems, returned to the caller
//! - [`MemberCopyError`]: one member that could not be copied or merged;
//!   recorded in the [`MergeReport`](crate::MergeReport), logged, and skipped

use crate::convention::MemberClass;
use mixin_descriptor::AccessorError;
use std::fmt;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    /// Invalid JSON configuration
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Invalid YAML configuration
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Inconsistent configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Name assigned to two classes
    #[error("member '{name}' classified as both {first:?} and {second:?}")]
    ConflictingClass {
        /// Member name
        name: String,
        /// Class assigned first
        first: MemberClass,
        /// Conflicting class
        second: MemberClass,
    },
}

impl CompositionError {
    /// Create conflicting class error
    #[inline]
    #[must_use]
    pub fn conflicting(name: impl Into<String>, first: MemberClass, second: MemberClass) -> Self {
        Self::ConflictingClass {
            name: name.into(),
            first,
            second,
        }
    }
}

/// Descriptor a member came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// Behavior at `index` in the final behavior list
    Behavior {
        /// Position in the flattened list
        index: usize,
        /// Descriptor label
        label: Option<String>,
    },

    /// The base descriptor
    Base {
        /// Descriptor label
        label: Option<String>,
    },
}

impl SourceRef {
    /// Check if source is the base descriptor
    #[inline]
    #[must_use]
    pub fn is_base(&self) -> bool {
        matches!(self, Self::Base { .. })
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Behavior { index, label } => {
                write!(f, "behavior #{index}")?;
                if let Some(label) = label {
                    write!(f, " ({label})")?;
                }
                Ok(())
            }
            Self::Base { label: Some(label) } => write!(f, "base descriptor ({label})"),
            Self::Base { label: None } => f.write_str("base descriptor"),
        }
    }
}

/// Reason a member could not be copied
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CopyFailure {
    /// Accessor getter failed while reading the member
    #[error(transparent)]
    Accessor(#[from] AccessorError),

    /// Collection shapes do not combine
    #[error("cannot merge {incoming} into accumulated {existing}")]
    ShapeMismatch {
        /// Kind of the accumulated value
        existing: &'static str,
        /// Kind of the incoming value
        incoming: &'static str,
    },
}

/// One member skipped during composition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unable to copy/extend member '{member}' from {origin}: {failure}")]
pub struct MemberCopyError {
    /// Member name
    pub member: String,

    /// Descriptor it came from
    pub origin: SourceRef,

    /// Underlying failure
    #[source]
    pub failure: CopyFailure,
}
