//! Mixin Descriptor Model
//!
//! Flat, immutable descriptors that behavior composition reads and produces.
//!
//! # Core Concepts
//!
//! - [`Descriptor`]: ordered member mapping plus an optional behavior list
//! - [`Member`]: plain data, [`Method`] or [`Accessor`]
//! - [`Behavior`]: shared descriptor compared by identity
//! - [`BehaviorItem`]: entry of a caller-supplied (possibly nested) list
//! - [`Instance`]: explicit receiver that hooks run against
//! - [`ChainedMethod`]: dispatch over every implementation of one hook
//!
//! # Example
//!
//! ```rust
//! use mixin_descriptor::{Behavior, Descriptor, Instance};
//! use serde_json::{json, Value};
//!
//! let highlight = Behavior::new(
//!     Descriptor::builder()
//!         .label("highlight")
//!         .value("color", json!("yellow"))
//!         .build(),
//! );
//!
//! let proto = Descriptor::builder()
//!     .behavior(&highlight)
//!     .hook("ready", |this, _| {
//!         this.set("ready", json!(true));
//!         Ok(Value::Null)
//!     })
//!     .build();
//!
//! let instance = Instance::new(proto);
//! instance.call("ready", &[]).unwrap();
//! assert_eq!(instance.get("ready").unwrap(), Some(json!(true)));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod behavior;
mod descriptor;
mod error;
mod instance;
mod member;
mod method;

// Re-exports
pub use behavior::{Behavior, BehaviorItem, HasBehaviors};
pub use descriptor::{Descriptor, DescriptorBuilder};
pub use error::{AccessorError, HookError};
pub use instance::Instance;
pub use member::{value_kind, Accessor, Getter, Member};
pub use method::{call_member, ChainedMethod, HookFn, Method};

/// Re-exported so callers can build member values without a direct dependency
pub use serde_json::Value;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
