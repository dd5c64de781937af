//! Testing utilities for the mixin workspace
//!
//! Shared fixtures: a call log whose hooks record their tag, descriptor
//! helpers, and a tracing subscriber for test output.

#![allow(missing_docs)]

use mixin_descriptor::{Behavior, Descriptor, HookError, Method, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared, ordered record of hook invocations
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook that appends `tag` and succeeds
    pub fn hook(&self, tag: &str) -> Method {
        let entries = Arc::clone(&self.entries);
        let tag = tag.to_string();
        Method::native(move |_, _| {
            entries.lock().push(tag.clone());
            Ok(Value::Null)
        })
    }

    /// Hook that appends `tag` with its arguments, e.g. `a(1,"x")`
    pub fn hook_with_args(&self, tag: &str) -> Method {
        let entries = Arc::clone(&self.entries);
        let tag = tag.to_string();
        Method::native(move |_, args| {
            let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
            entries.lock().push(format!("{tag}({})", rendered.join(",")));
            Ok(Value::Null)
        })
    }

    /// Hook that appends `tag` and then fails
    pub fn failing_hook(&self, tag: &str, hook: &str) -> Method {
        let entries = Arc::clone(&self.entries);
        let tag = tag.to_string();
        let hook = hook.to_string();
        Method::native(move |_, _| {
            entries.lock().push(tag.clone());
            Err(HookError::failed(hook.clone(), format!("{tag} failed")))
        })
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// Behavior whose members are the entries of a JSON object
///
/// Non-object input yields a behavior without members.
pub fn data_behavior(label: &str, members: Value) -> Behavior {
    let mut builder = Descriptor::builder().label(label);
    if let Value::Object(map) = members {
        for (name, value) in map {
            builder = builder.value(name, value);
        }
    }
    builder.build().into_behavior()
}

/// Behavior that defines each hook in `hooks`, recording `label.hook`
pub fn recording_behavior(log: &CallLog, label: &str, hooks: &[&str]) -> Behavior {
    hooks
        .iter()
        .fold(Descriptor::builder().label(label), |b, hook| {
            b.method(*hook, log.hook(&format!("{label}.{hook}")))
        })
        .build()
        .into_behavior()
}

/// Install a test-friendly tracing subscriber once
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
