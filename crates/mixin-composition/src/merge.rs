//! Merge executor
//!
//! One pass over `[behavior₀, …, behaviorₙ₋₁, base]`. Later sources win plain
//! collisions; collections accumulate; hook names are handed to the
//! [`ChainPlan`].

use crate::chain::ChainPlan;
use crate::convention::{MemberClass, NamingConvention};
use crate::error::{CopyFailure, MemberCopyError, SourceRef};
use indexmap::IndexMap;
use mixin_descriptor::{value_kind, BehaviorItem, Descriptor, Member, Value};

/// Result of the merge pass, before chain synthesis
#[derive(Debug, Default)]
pub(crate) struct MergeOutcome {
    pub(crate) members: IndexMap<String, Member>,
    pub(crate) plan: ChainPlan,
    pub(crate) failures: Vec<MemberCopyError>,
}

/// Merge executor bound to one naming convention
#[derive(Debug)]
pub(crate) struct MergeExecutor<'a> {
    convention: &'a NamingConvention,
    outcome: MergeOutcome,
}

impl<'a> MergeExecutor<'a> {
    pub(crate) fn new(convention: &'a NamingConvention) -> Self {
        Self {
            convention,
            outcome: MergeOutcome::default(),
        }
    }

    /// Run the pass: behaviors in list order, then the base
    pub(crate) fn run(mut self, base: &Descriptor, behaviors: &[BehaviorItem]) -> MergeOutcome {
        for (index, item) in behaviors.iter().enumerate() {
            // Opaque entries own no members
            let Some(behavior) = item.as_behavior() else {
                continue;
            };
            let origin = SourceRef::Behavior {
                index,
                label: behavior.label().map(str::to_string),
            };
            self.apply(behavior, &origin);
        }

        let origin = SourceRef::Base {
            label: base.label().map(str::to_string),
        };
        self.apply(base, &origin);

        self.outcome
    }

    fn apply(&mut self, source: &Descriptor, origin: &SourceRef) {
        for (name, member) in source.members() {
            if let Err(failure) = self.apply_member(name, member, origin) {
                let err = MemberCopyError {
                    member: name.to_string(),
                    origin: origin.clone(),
                    failure,
                };
                tracing::error!("{}", err);
                self.outcome.failures.push(err);
            }
        }
    }

    fn apply_member(
        &mut self,
        name: &str,
        member: &Member,
        origin: &SourceRef,
    ) -> Result<(), CopyFailure> {
        match self.convention.classify(name) {
            MemberClass::Ignored => {}
            MemberClass::ChainedMethod => {
                if !origin.is_base() {
                    self.outcome.plan.mark(name);
                } else if !self.outcome.plan.attach_base(name, member) {
                    // Nothing to chain with: the base member is used as is
                    self.outcome.members.insert(name.to_string(), member.clone());
                }
            }
            MemberClass::MergeableCollection => {
                merge_collection(&mut self.outcome.members, name, member)?;
            }
            MemberClass::Plain => {
                self.outcome.members.insert(name.to_string(), member.clone());
            }
        }
        Ok(())
    }
}

/// Fold one source's collection value into the accumulated one
///
/// Arrays concatenate after what has accumulated; objects merge shallowly,
/// incoming keys overriding. `null` seeds an empty object when nothing has
/// accumulated yet. Other values carry nothing to merge and are skipped. The accumulator is left untouched on failure.
fn merge_collection(
    members: &mut IndexMap<String, Member>,
    name: &str,
    member: &Member,
) -> Result<(), CopyFailure> {
    let Some(incoming) = member.read()? else {
        tracing::trace!("Skipping non-data collection member '{}'", name);
        return Ok(());
    };

    match incoming {
        Value::Array(items) => {
            let slot = members
                .entry(name.to_string())
                .or_insert_with(|| Member::Value(Value::Array(Vec::new())));
            match slot {
                Member::Value(Value::Array(existing)) => existing.extend(items),
                other => return Err(mismatch(other, "array")),
            }
        }
        Value::Object(entries) => {
            let slot = members
                .entry(name.to_string())
                .or_insert_with(|| Member::Value(Value::Object(serde_json::Map::new())));
            match slot {
                Member::Value(Value::Object(existing)) => {
                    for (key, value) in entries {
                        existing.insert(key, value);
                    }
                }
                other => return Err(mismatch(other, "object")),
            }
        }
        Value::Null => {
            members
                .entry(name.to_string())
                .or_insert_with(|| Member::Value(Value::Object(serde_json::Map::new())));
        }
        other => {
            tracing::trace!(
                "Skipping {} value for collection member '{}'",
                value_kind(&other),
                name
            );
        }
    }

    Ok(())
}

fn mismatch(existing: &Member, incoming: &'static str) -> CopyFailure {
    CopyFailure::ShapeMismatch {
        existing: existing.kind(),
        incoming,
    }
}
