//! Membership query

use mixin_descriptor::{Behavior, BehaviorItem, HasBehaviors};

/// Check whether `behavior` is in the object's behavior list
///
/// Identity comparison only; a structurally equal copy does not count.
/// Objects without a behavior list never implement anything.
pub fn implements_behavior<O>(obj: &O, behavior: &Behavior) -> bool
where
    O: HasBehaviors + ?Sized,
{
    obj.behavior_items()
        .iter()
        .filter_map(BehaviorItem::as_behavior)
        .any(|b| b.ptr_eq(behavior))
}
