//! Composition entry point
//!
//! [`Composer`] ties the pieces together:
//! behavior list → merge pass → chain synthesis → new descriptor.

use crate::behavior_list::build_behavior_list;
use crate::config::CompositionConfig;
use crate::convention::NamingConvention;
use crate::error::{CompositionError, MemberCopyError};
use crate::merge::MergeExecutor;
use mixin_descriptor::{BehaviorItem, Descriptor};

/// What happened during one composition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Entries in the final behavior list
    pub behavior_count: usize,

    /// Hook names that received a synthesized chain
    pub chained: Vec<String>,

    /// Members skipped because they could not be copied
    pub failures: Vec<MemberCopyError>,
}

impl MergeReport {
    /// Check that every member was copied
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Names of skipped members
    #[must_use]
    pub fn failed_members(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.member.as_str()).collect()
    }
}

/// Composed descriptor with its report
#[derive(Debug, Clone)]
pub struct Composed {
    /// Merged descriptor
    pub descriptor: Descriptor,

    /// Composition report
    pub report: MergeReport,
}

/// Behavior composition engine
///
/// Stateless apart from its naming convention; one composer can serve any
/// number of calls.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    convention: NamingConvention,
}

impl Composer {
    /// Create composer from configuration
    ///
    /// # Errors
    /// Returns error if the configuration is inconsistent
    pub fn new(config: &CompositionConfig) -> Result<Self, CompositionError> {
        Ok(Self {
            convention: NamingConvention::from_config(config)?,
        })
    }

    /// Create composer with an explicit table
    #[inline]
    #[must_use]
    pub fn with_convention(convention: NamingConvention) -> Self {
        Self { convention }
    }

    /// Naming convention in use
    #[inline]
    #[must_use]
    pub fn convention(&self) -> &NamingConvention {
        &self.convention
    }

    /// Merge `base` with its own behaviors and `extra`
    ///
    /// Inputs are not modified. Members that cannot be copied are logged and
    /// skipped; use [`compose_with_report`](Self::compose_with_report) to
    /// inspect them.
    pub fn compose<I>(&self, base: &Descriptor, extra: I) -> Descriptor
    where
        I: IntoIterator,
        I::Item: Into<BehaviorItem>,
    {
        self.compose_with_report(base, extra).descriptor
    }

    /// Merge and report
    ///
    /// # Precedence
    /// Behaviors in list order, then `base`. The base always wins a plain
    /// collision; among behaviors the later one wins.
    pub fn compose_with_report<I>(&self, base: &Descriptor, extra: I) -> Composed
    where
        I: IntoIterator,
        I::Item: Into<BehaviorItem>,
    {
        let behaviors = build_behavior_list(base.behaviors(), extra);
        let outcome = MergeExecutor::new(&self.convention).run(base, &behaviors);

        let chained = outcome.plan.names();
        let mut members = outcome.members;
        members.extend(outcome.plan.synthesize());

        tracing::debug!(
            "Composed {} behaviors into {}: {} members, chained {:?}",
            behaviors.len(),
            base.label().unwrap_or("<anonymous>"),
            members.len(),
            chained
        );
        if !outcome.failures.is_empty() {
            tracing::warn!(
                "Composition skipped {} member(s)",
                outcome.failures.len()
            );
        }

        let report = MergeReport {
            behavior_count: behaviors.len(),
            chained,
            failures: outcome.failures,
        };
        let descriptor = Descriptor::from_parts(
            base.label().map(str::to_string),
            members,
            Some(behaviors),
        );

        Composed { descriptor, report }
    }
}
