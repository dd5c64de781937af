//! Receiver for hook invocation
//!
//! [`Instance`] plays the role of the object a merged descriptor is attached
//! to: hooks receive it explicitly, and chained dispatch reads its behavior
//! list at call time.

use crate::behavior::{BehaviorItem, HasBehaviors};
use crate::descriptor::Descriptor;
use crate::error::{AccessorError, HookError};
use crate::method::call_member;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Object backed by a (usually composed) descriptor
///
/// Own state shadows the prototype's data members. The behavior list starts
/// as the prototype's and can be replaced per instance.
pub struct Instance {
    prototype: Arc<Descriptor>,
    state: RwLock<IndexMap<String, Value>>,
    behaviors: RwLock<Option<Vec<BehaviorItem>>>,
}

impl Instance {
    /// Create instance of a prototype
    #[must_use]
    pub fn new(prototype: impl Into<Arc<Descriptor>>) -> Self {
        Self {
            prototype: prototype.into(),
            state: RwLock::new(IndexMap::new()),
            behaviors: RwLock::new(None),
        }
    }

    /// Prototype descriptor
    #[inline]
    #[must_use]
    pub fn prototype(&self) -> &Descriptor {
        &self.prototype
    }

    /// Behavior list as of now
    #[must_use]
    pub fn behaviors(&self) -> Vec<BehaviorItem> {
        match self.behaviors.read().as_ref() {
            Some(own) => own.clone(),
            None => self.prototype.behaviors().to_vec(),
        }
    }

    /// Replace this instance's behavior list
    pub fn set_behaviors(&self, items: Vec<BehaviorItem>) {
        *self.behaviors.write() = Some(items);
    }

    /// Read a member: own state first, then the prototype
    ///
    /// # Errors
    /// Returns error if a prototype accessor fails
    pub fn get(&self, name: &str) -> Result<Option<Value>, AccessorError> {
        if let Some(v) = self.state.read().get(name) {
            return Ok(Some(v.clone()));
        }
        self.prototype.read(name)
    }

    /// Write own state
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.state.write().insert(name.into(), value);
    }

    /// Invoke the prototype's member under `name`
    ///
    /// # Errors
    /// - `MissingMember` if the prototype has no such member
    /// - `NotCallable` if the member is data
    /// - Any failure raised by the implementation
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, HookError> {
        let member = self
            .prototype
            .own(name)
            .ok_or_else(|| HookError::MissingMember {
                name: name.to_string(),
            })?;
        call_member(name, member, self, args)
    }
}

impl HasBehaviors for Instance {
    fn behavior_items(&self) -> Vec<BehaviorItem> {
        self.behaviors()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("prototype", &self.prototype.label())
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
