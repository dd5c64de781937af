//! Component and behavior descriptors
//!
//! A [`Descriptor`] is a flat, ordered mapping from member name to
//! [`Member`], plus an optional behavior list. Descriptors are immutable once
//! built; composition always produces a new one.

use crate::behavior::{Behavior, BehaviorItem};
use crate::error::{AccessorError, HookError};
use crate::instance::Instance;
use crate::member::{Accessor, Member};
use crate::method::Method;
use indexmap::IndexMap;
use serde_json::Value;

/// Flat member mapping with an optional behavior list
///
/// # Invariants
/// - Members are own members only; there is no fallback chain
/// - Member order is insertion order
#[derive(Debug, Clone, Default)]
pub struct Descriptor {
    label: Option<String>,
    members: IndexMap<String, Member>,
    behaviors: Option<Vec<BehaviorItem>>,
}

impl Descriptor {
    /// Start building a descriptor
    #[inline]
    #[must_use]
    pub fn builder() -> DescriptorBuilder {
        DescriptorBuilder::default()
    }

    /// Assemble from parts
    #[must_use]
    pub fn from_parts(
        label: Option<String>,
        members: IndexMap<String, Member>,
        behaviors: Option<Vec<BehaviorItem>>,
    ) -> Self {
        Self {
            label,
            members,
            behaviors,
        }
    }

    /// Diagnostic label
    #[inline]
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Own member under `name`
    #[inline]
    #[must_use]
    pub fn own(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Check for an own member
    #[inline]
    #[must_use]
    pub fn has_own(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Plain value under `name`
    #[inline]
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.own(name).and_then(Member::as_value)
    }

    /// Method under `name`
    #[inline]
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.own(name).and_then(Member::as_method)
    }

    /// Iterate members in order
    pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Member names in order
    #[must_use]
    pub fn member_names(&self) -> Vec<&str> {
        self.members.keys().map(String::as_str).collect()
    }

    /// Number of members
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if descriptor has no members
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Behavior list (empty if the field is absent)
    #[inline]
    #[must_use]
    pub fn behaviors(&self) -> &[BehaviorItem] {
        self.behaviors.as_deref().unwrap_or(&[])
    }

    /// Check whether the behavior field is present at all
    #[inline]
    #[must_use]
    pub fn has_behaviors_field(&self) -> bool {
        self.behaviors.is_some()
    }

    /// Read a member's data, evaluating accessors
    ///
    /// # Errors
    /// Returns error if an accessor getter fails
    pub fn read(&self, name: &str) -> Result<Option<Value>, AccessorError> {
        match self.own(name) {
            Some(member) => member.read(),
            None => Ok(None),
        }
    }

    /// Share this descriptor as a behavior
    #[inline]
    #[must_use]
    pub fn into_behavior(self) -> Behavior {
        Behavior::new(self)
    }
}

/// Builder for [`Descriptor`]
///
/// Re-adding a name replaces the member but keeps its original position.
#[derive(Debug, Default)]
pub struct DescriptorBuilder {
    label: Option<String>,
    members: IndexMap<String, Member>,
    behaviors: Option<Vec<BehaviorItem>>,
}

impl DescriptorBuilder {
    /// Set diagnostic label
    #[inline]
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add any member
    #[inline]
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, member: impl Into<Member>) -> Self {
        self.members.insert(name.into(), member.into());
        self
    }

    /// Add plain data
    #[inline]
    #[must_use]
    pub fn value(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.member(name, Member::Value(value.into()))
    }

    /// Add a method
    #[inline]
    #[must_use]
    pub fn method(self, name: impl Into<String>, method: Method) -> Self {
        self.member(name, Member::Method(method))
    }

    /// Add a method from a closure
    #[inline]
    #[must_use]
    pub fn hook<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> Result<Value, HookError> + Send + Sync + 'static,
    {
        self.method(name, Method::native(f))
    }

    /// Add a computed member
    #[inline]
    #[must_use]
    pub fn accessor<F>(self, name: impl Into<String>, get: F) -> Self
    where
        F: Fn() -> Result<Value, AccessorError> + Send + Sync + 'static,
    {
        self.member(name, Member::Accessor(Accessor::new(get)))
    }

    /// Append one entry to the behavior list
    #[inline]
    #[must_use]
    pub fn behavior(mut self, item: impl Into<BehaviorItem>) -> Self {
        self.behaviors.get_or_insert_with(Vec::new).push(item.into());
        self
    }

    /// Append several entries to the behavior list
    #[must_use]
    pub fn behaviors<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<BehaviorItem>,
    {
        self.behaviors
            .get_or_insert_with(Vec::new)
            .extend(items.into_iter().map(Into::into));
        self
    }

    /// Finish
    #[must_use]
    pub fn build(self) -> Descriptor {
        Descriptor {
            label: self.label,
            members: self.members,
            behaviors: self.behaviors,
        }
    }
}
