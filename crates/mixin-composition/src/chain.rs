//! Chained-call synthesizer
//!
//! Collects hook names that need a chain during the merge pass and turns
//! them into [`ChainedMethod`] members afterwards.

use indexmap::IndexMap;
use mixin_descriptor::{ChainedMethod, Member, Method};

/// Hook names marked for chaining, with the base descriptor's member
#[derive(Debug, Default)]
pub(crate) struct ChainPlan {
    marks: IndexMap<String, Option<Member>>,
}

impl ChainPlan {
    /// Mark `name` as defined by a behavior
    pub(crate) fn mark(&mut self, name: &str) {
        if !self.marks.contains_key(name) {
            self.marks.insert(name.to_string(), None);
        }
    }

    #[cfg(test)]
    pub(crate) fn is_marked(&self, name: &str) -> bool {
        self.marks.contains_key(name)
    }

    /// Record the base member as the chain's first step
    ///
    /// Returns `false` when no behavior marked `name`; the caller then copies
    /// the base member directly.
    pub(crate) fn attach_base(&mut self, name: &str, member: &Member) -> bool {
        match self.marks.get_mut(name) {
            Some(slot) => {
                *slot = Some(member.clone());
                true
            }
            None => false,
        }
    }

    /// Marked names in first-marked order
    pub(crate) fn names(&self) -> Vec<String> {
        self.marks.keys().cloned().collect()
    }

    /// Build one chained method per marked name
    pub(crate) fn synthesize(self) -> impl Iterator<Item = (String, Member)> {
        self.marks.into_iter().map(|(name, base)| {
            let chain = ChainedMethod::new(name.clone(), base);
            (name, Member::Method(Method::Chained(chain)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixin_descriptor::Value;
    use serde_json::json;

    #[test]
    fn attach_requires_mark() {
        let mut plan = ChainPlan::default();
        let base = Member::Method(Method::native(|_, _| Ok(Value::Null)));

        assert!(!plan.attach_base("ready", &base));
        plan.mark("ready");
        assert!(plan.attach_base("ready", &base));
        assert!(plan.is_marked("ready"));
    }

    #[test]
    fn synthesize_preserves_mark_order() {
        let mut plan = ChainPlan::default();
        plan.mark("detached");
        plan.mark("attached");
        plan.mark("detached");
        plan.attach_base("attached", &Member::Value(json!(1)));

        assert_eq!(plan.names(), vec!["detached", "attached"]);

        let members: Vec<_> = plan.synthesize().collect();
        let chain = members[1].1.as_method().and_then(Method::as_chained).unwrap();
        assert_eq!(chain.name(), "attached");
        assert!(chain.base().is_some());
        assert!(members[0]
            .1
            .as_method()
            .and_then(Method::as_chained)
            .unwrap()
            .base()
            .is_none());
    }
}
