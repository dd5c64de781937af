//! Error types for hook invocation and accessor reads

/// Failure raised while running a hook on a receiver
///
/// Hook failures are never caught by the composition engine; they propagate
/// to whoever invoked the hook.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// Hook implementation reported a failure
    #[error("hook '{hook}' failed: {message}")]
    Failed {
        /// Hook name
        hook: String,
        /// Failure description
        message: String,
    },

    /// A member exists under the name but holds data, not a method
    #[error("member '{name}' is not callable")]
    NotCallable {
        /// Member name
        name: String,
    },

    /// No member under the requested name
    #[error("no member named '{name}'")]
    MissingMember {
        /// Member name
        name: String,
    },

    /// Accessor read failed while the hook resolved a member
    #[error(transparent)]
    Accessor(#[from] AccessorError),
}

impl HookError {
    /// Create hook failure
    #[inline]
    #[must_use]
    pub fn failed(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// Create not-callable error
    #[inline]
    #[must_use]
    pub fn not_callable(name: impl Into<String>) -> Self {
        Self::NotCallable { name: name.into() }
    }
}

/// Accessor getter failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("accessor read failed: {message}")]
pub struct AccessorError {
    /// Failure description
    pub message: String,
}

impl AccessorError {
    /// Create accessor error
    #[inline]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
