//! Callable members
//!
//! Provides [`Method`] for hook implementations and [`ChainedMethod`] for the
//! dispatch that runs every implementation registered under one hook name.

use crate::behavior::{Behavior, BehaviorItem};
use crate::error::HookError;
use crate::instance::Instance;
use crate::member::Member;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Hook signature: explicit receiver plus argument list
pub type HookFn = dyn Fn(&Instance, &[Value]) -> Result<Value, HookError> + Send + Sync;

/// Callable member
#[derive(Clone)]
pub enum Method {
    /// Hand-written implementation
    Native(Arc<HookFn>),

    /// Synthesized dispatch over base and behavior implementations
    Chained(ChainedMethod),
}

impl Method {
    /// Wrap a closure as a method
    #[inline]
    pub fn native<F>(f: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> Result<Value, HookError> + Send + Sync + 'static,
    {
        Self::Native(Arc::new(f))
    }

    /// Invoke with an explicit receiver
    ///
    /// # Errors
    /// Propagates the first failure raised by the implementation (or, for a
    /// chained method, by any implementation in the chain)
    pub fn invoke(&self, receiver: &Instance, args: &[Value]) -> Result<Value, HookError> {
        match self {
            Self::Native(f) => f(receiver, args),
            Self::Chained(chain) => chain.invoke(receiver, args),
        }
    }

    /// Check if this is a synthesized chain
    #[inline]
    #[must_use]
    pub fn is_chained(&self) -> bool {
        matches!(self, Self::Chained(_))
    }

    /// Chained dispatch, if synthesized
    #[inline]
    #[must_use]
    pub fn as_chained(&self) -> Option<&ChainedMethod> {
        match self {
            Self::Chained(chain) => Some(chain),
            Self::Native(_) => None,
        }
    }

    /// Identity comparison for native methods
    ///
    /// Chained methods never compare equal; each composition synthesizes
    /// fresh ones.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Native(a), Self::Native(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(_) => f.write_str("Method::Native(<fn>)"),
            Self::Chained(chain) => f.debug_tuple("Method::Chained").field(chain).finish(),
        }
    }
}

/// Dispatch that runs the base implementation, then each behavior's own one
///
/// # Ordering
/// 1. The base descriptor's member under `name`, if any
/// 2. Every behavior in the receiver's list that owns `name`, in list order
///
/// The behavior list is read from the receiver on each call, so changes made
/// with [`Instance::set_behaviors`] are honored. Return values are discarded
/// and the chain resolves to `null`. The first failing implementation stops
/// the chain and its error is returned unchanged.
///
/// A composed behavior in the list dispatches over its own behavior list,
/// skipping any behavior an enclosing list already runs, so every distinct
/// implementation fires once per call.
#[derive(Debug, Clone)]
pub struct ChainedMethod {
    name: String,
    base: Option<Box<Member>>,
}

impl ChainedMethod {
    /// Create chain for `name` with the base descriptor's own member
    ///
    /// When the base member is itself a chain (the base was composed
    /// earlier), only its base step is kept: its behaviors already lead the
    /// new behavior list and must not run twice.
    #[must_use]
    pub fn new(name: impl Into<String>, base: Option<Member>) -> Self {
        let base = match base {
            Some(Member::Method(Method::Chained(inner))) => inner.base,
            other => other.map(Box::new),
        };
        Self {
            name: name.into(),
            base,
        }
    }

    /// Hook name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base descriptor's member, run first
    #[inline]
    #[must_use]
    pub fn base(&self) -> Option<&Member> {
        self.base.as_deref()
    }

    /// Run the chain against the receiver's current behavior list
    ///
    /// # Errors
    /// Returns the first implementation failure
    pub fn invoke(&self, receiver: &Instance, args: &[Value]) -> Result<Value, HookError> {
        let behaviors = receiver.behaviors();
        self.run(receiver, args, &behaviors, &[])
    }

    /// `enclosing` holds behaviors already dispatched by outer lists
    fn run(
        &self,
        receiver: &Instance,
        args: &[Value],
        behaviors: &[BehaviorItem],
        enclosing: &[Behavior],
    ) -> Result<Value, HookError> {
        if let Some(base) = self.base.as_deref() {
            call_member(&self.name, base, receiver, args)?;
        }

        let own: Vec<&Behavior> = behaviors
            .iter()
            .filter_map(BehaviorItem::as_behavior)
            .filter(|b| !enclosing.contains(*b))
            .collect();

        for behavior in own.iter().copied() {
            let Some(member) = behavior.own(&self.name) else {
                continue;
            };
            tracing::trace!("Chained '{}' -> {}", self.name, behavior);

            match member {
                // A composed behavior dispatches over its own list, not the receiver's
                Member::Method(Method::Chained(nested)) => {
                    let mut seen = enclosing.to_vec();
                    seen.extend(own.iter().map(|b| (*b).clone()));
                    nested.run(receiver, args, behavior.behaviors(), &seen)?;
                }
                other => {
                    call_member(&self.name, other, receiver, args)?;
                }
            }
        }

        Ok(Value::Null)
    }
}

/// Invoke a member as a method
///
/// # Errors
/// `NotCallable` for data members, otherwise the method's own failure
pub fn call_member(
    name: &str,
    member: &Member,
    receiver: &Instance,
    args: &[Value],
) -> Result<Value, HookError> {
    match member {
        Member::Method(method) => method.invoke(receiver, args),
        Member::Value(_) | Member::Accessor(_) => Err(HookError::not_callable(name)),
    }
}
