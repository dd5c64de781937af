//! Mixin Composition Engine
//!
//! Merges independently written behavior descriptors into one component
//! descriptor.
//!
//! # Core Concepts
//!
//! - [`compose`] / [`Composer`]: build the merged descriptor
//! - [`implements_behavior`]: identity membership query
//! - [`NamingConvention`]: name-only classification of members
//! - [`CompositionConfig`]: serde-loadable convention table
//! - [`MergeReport`]: chained hooks and skipped members of one composition
//!
//! # Merge Rules
//!
//! | Class | Names | Treatment |
//! |-------|-------|-----------|
//! | chained | lifecycle hooks, `*Changed` | base runs first, then each behavior |
//! | mergeable | `publish`, `computed`, ... | arrays concatenate, objects merge |
//! | ignored | `behaviors` | never copied |
//! | plain | everything else | last writer wins, base last |
//!
//! # Example
//!
//! ```rust
//! use mixin_composition::{compose, implements_behavior};
//! use mixin_descriptor::{Behavior, Descriptor};
//! use serde_json::json;
//!
//! let a = Behavior::new(Descriptor::builder().value("published", json!({"x": 1})).build());
//! let b = Behavior::new(Descriptor::builder().value("published", json!({"y": 2})).build());
//! let base = Descriptor::builder().behavior(&a).build();
//!
//! let merged = compose(&base, [b.clone()]);
//! assert_eq!(merged.value("published"), Some(&json!({"x": 1, "y": 2})));
//! assert!(implements_behavior(&merged, &a));
//! assert!(implements_behavior(&merged, &b));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod behavior_list;
mod chain;
mod composer;
mod config;
mod convention;
mod error;
mod membership;
mod merge;

// Re-exports
pub use behavior_list::{build_behavior_list, dedup, flatten};
pub use composer::{Composed, Composer, MergeReport};
pub use config::CompositionConfig;
pub use convention::{
    MemberClass, NamingConvention, BEHAVIORS_FIELD, LIFECYCLE_HOOKS, MERGEABLE_COLLECTIONS,
    OBSERVER_SUFFIX,
};
pub use error::{CompositionError, CopyFailure, MemberCopyError, SourceRef};
pub use membership::implements_behavior;

use mixin_descriptor::{BehaviorItem, Descriptor};

/// Merge `base` with its own behaviors and `extra` using the default table
///
/// See [`Composer::compose`].
pub fn compose<I>(base: &Descriptor, extra: I) -> Descriptor
where
    I: IntoIterator,
    I::Item: Into<BehaviorItem>,
{
    Composer::default().compose(base, extra)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
