//! Behavior handles and behavior lists
//!
//! A [`Behavior`] is a shared, immutable descriptor compared by identity:
//! two behaviors are the same only if they are the same allocation.

use crate::descriptor::Descriptor;
use serde_json::Value;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Identity-compared handle to a behavior descriptor
#[derive(Clone)]
pub struct Behavior(Arc<Descriptor>);

impl Behavior {
    /// Wrap a descriptor as a new behavior
    #[inline]
    #[must_use]
    pub fn new(descriptor: Descriptor) -> Self {
        Self(Arc::new(descriptor))
    }

    /// Wrap an already shared descriptor
    #[inline]
    #[must_use]
    pub fn from_arc(descriptor: Arc<Descriptor>) -> Self {
        Self(descriptor)
    }

    /// Underlying descriptor
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        &self.0
    }

    /// Shared descriptor
    #[inline]
    #[must_use]
    pub fn as_arc(&self) -> &Arc<Descriptor> {
        &self.0
    }

    /// Identity comparison
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Behavior {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Behavior {}

impl Deref for Behavior {
    type Target = Descriptor;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Behavior({} @ {:p})", self, Arc::as_ptr(&self.0))
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.label().unwrap_or("<anonymous>"))
    }
}

/// Entry of a behavior list as supplied by callers
///
/// Lists may nest to any depth; composition flattens them. Anything that is
/// neither a behavior nor a list is carried as an opaque value.
#[derive(Debug, Clone)]
pub enum BehaviorItem {
    /// Behavior descriptor
    Behavior(Behavior),

    /// Nested list
    List(Vec<BehaviorItem>),

    /// Opaque entry, compared by value
    Opaque(Value),
}

impl BehaviorItem {
    /// Behavior handle, if this entry is one
    #[inline]
    #[must_use]
    pub fn as_behavior(&self) -> Option<&Behavior> {
        match self {
            Self::Behavior(b) => Some(b),
            _ => None,
        }
    }

    /// Check if entry is a nested list
    #[inline]
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl PartialEq for BehaviorItem {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Behavior(a), Self::Behavior(b)) => a.ptr_eq(b),
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Opaque(a), Self::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Behavior> for BehaviorItem {
    fn from(behavior: Behavior) -> Self {
        Self::Behavior(behavior)
    }
}

impl From<&Behavior> for BehaviorItem {
    fn from(behavior: &Behavior) -> Self {
        Self::Behavior(behavior.clone())
    }
}

impl From<Vec<BehaviorItem>> for BehaviorItem {
    fn from(items: Vec<BehaviorItem>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<Behavior>> for BehaviorItem {
    fn from(behaviors: Vec<Behavior>) -> Self {
        Self::List(behaviors.into_iter().map(Self::Behavior).collect())
    }
}

impl From<Value> for BehaviorItem {
    fn from(value: Value) -> Self {
        Self::Opaque(value)
    }
}

/// Anything that carries a behavior list
pub trait HasBehaviors {
    /// Current behavior list (empty if none)
    fn behavior_items(&self) -> Vec<BehaviorItem>;
}

impl HasBehaviors for Descriptor {
    fn behavior_items(&self) -> Vec<BehaviorItem> {
        self.behaviors().to_vec()
    }
}

impl<T: HasBehaviors + ?Sized> HasBehaviors for Arc<T> {
    fn behavior_items(&self) -> Vec<BehaviorItem> {
        (**self).behavior_items()
    }
}
