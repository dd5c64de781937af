//! Behavior list builder
//!
//! Combines the base descriptor's own list with extra behaviors into one
//! flat, identity-deduplicated, order-preserving list.

use mixin_descriptor::BehaviorItem;

/// Build the final behavior list
///
/// Base entries come first, then `extra` in call order. Nested lists are
/// flattened to any depth and later duplicates are dropped.
pub fn build_behavior_list<I>(base: &[BehaviorItem], extra: I) -> Vec<BehaviorItem>
where
    I: IntoIterator,
    I::Item: Into<BehaviorItem>,
{
    let combined: Vec<BehaviorItem> = base
        .iter()
        .cloned()
        .chain(extra.into_iter().map(Into::into))
        .collect();
    dedup(flatten(combined))
}

/// Collapse nested lists into their parent, depth-first
#[must_use]
pub fn flatten(items: Vec<BehaviorItem>) -> Vec<BehaviorItem> {
    let mut out = Vec::with_capacity(items.len());
    flatten_into(items, &mut out);
    out
}

fn flatten_into(items: Vec<BehaviorItem>, out: &mut Vec<BehaviorItem>) {
    for item in items {
        match item {
            BehaviorItem::List(nested) => flatten_into(nested, out),
            other => out.push(other),
        }
    }
}

/// Drop later duplicates, keeping each entry's first position
///
/// Behaviors compare by identity, opaque entries by value.
#[must_use]
pub fn dedup(items: Vec<BehaviorItem>) -> Vec<BehaviorItem> {
    let mut out: Vec<BehaviorItem> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
