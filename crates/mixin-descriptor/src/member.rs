//! Descriptor members
//!
//! A [`Member`] is what a descriptor holds under a name: plain data, a
//! callable [`Method`], or a computed [`Accessor`].

use crate::error::AccessorError;
use crate::method::Method;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Getter signature for computed members
pub type Getter = dyn Fn() -> Result<Value, AccessorError> + Send + Sync;

/// Computed member backed by a fallible getter
///
/// Copying an accessor copies the getter, not its current value.
#[derive(Clone)]
pub struct Accessor {
    get: Arc<Getter>,
}

impl Accessor {
    /// Create accessor from getter
    #[inline]
    pub fn new<F>(get: F) -> Self
    where
        F: Fn() -> Result<Value, AccessorError> + Send + Sync + 'static,
    {
        Self { get: Arc::new(get) }
    }

    /// Evaluate the getter
    ///
    /// # Errors
    /// Returns whatever the getter reports
    #[inline]
    pub fn read(&self) -> Result<Value, AccessorError> {
        (self.get)()
    }

    /// Check whether both accessors share the same getter
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.get, &other.get)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Accessor(<getter>)")
    }
}

/// Value stored under a member name
#[derive(Debug, Clone)]
pub enum Member {
    /// Plain data (scalars, sequences, mappings)
    Value(Value),

    /// Callable hook or method
    Method(Method),

    /// Computed property
    Accessor(Accessor),
}

impl Member {
    /// Plain data, if this member is a value
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Method, if this member is callable
    #[inline]
    #[must_use]
    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Self::Method(m) => Some(m),
            _ => None,
        }
    }

    /// Check if member is callable
    #[inline]
    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Method(_))
    }

    /// Read the data carried by this member
    ///
    /// Accessors are evaluated. Methods carry no data and yield `None`.
    ///
    /// # Errors
    /// Returns error if an accessor getter fails
    pub fn read(&self) -> Result<Option<Value>, AccessorError> {
        match self {
            Self::Value(v) => Ok(Some(v.clone())),
            Self::Accessor(a) => a.read().map(Some),
            Self::Method(_) => Ok(None),
        }
    }

    /// Short kind name for diagnostics
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Value(v) => value_kind(v),
            Self::Method(_) => "method",
            Self::Accessor(_) => "accessor",
        }
    }
}

impl From<Value> for Member {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Method> for Member {
    fn from(method: Method) -> Self {
        Self::Method(method)
    }
}

impl From<Accessor> for Member {
    fn from(accessor: Accessor) -> Self {
        Self::Accessor(accessor)
    }
}

/// Short kind name of a JSON value
#[must_use]
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_member_reads_clone() {
        let m = Member::from(json!({"x": 1}));
        assert_eq!(m.read().unwrap(), Some(json!({"x": 1})));
        assert_eq!(m.kind(), "object");
        assert!(!m.is_callable());
    }

    #[test]
    fn accessor_member_evaluates_getter() {
        let m = Member::from(Accessor::new(|| Ok(json!([1, 2]))));
        assert_eq!(m.read().unwrap(), Some(json!([1, 2])));
        assert_eq!(m.kind(), "accessor");
    }

    #[test]
    fn failing_accessor_reports_error() {
        let m = Member::from(Accessor::new(|| Err(AccessorError::new("denied"))));
        assert_eq!(m.read().unwrap_err(), AccessorError::new("denied"));
    }

    #[test]
    fn method_member_has_no_data() {
        let m = Member::from(Method::native(|_, _| Ok(Value::Null)));
        assert!(m.is_callable());
        assert_eq!(m.read().unwrap(), None);
    }

    #[test]
    fn accessor_clones_share_getter() {
        let a = Accessor::new(|| Ok(Value::Null));
        let b = a.clone();
        let c = Accessor::new(|| Ok(Value::Null));
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}
