//! Functional tests for behavior composition.
//!
//! Exercises the public surface end to end:
//! - Behavior list building (order, flattening, identity dedup).
//! - Precedence of plain members and accumulation of collections.
//! - Chained hooks running every implementation exactly once, in order.
//! - Graceful skipping of members that cannot be copied.

use mixin_composition::{compose, implements_behavior, Composer, CopyFailure, SourceRef};
use mixin_descriptor::{AccessorError, BehaviorItem, Descriptor, HookError, Instance, Value};
use mixin_test_utils::{data_behavior, init_tracing, recording_behavior, CallLog};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Base with `behaviors: [A]` composed with extra `B` keeps `[A, B]` and
/// merges their published maps.
#[test]
fn published_maps_merge_across_base_list_and_extra() {
    let a = data_behavior("a", json!({"published": {"x": 1}}));
    let b = data_behavior("b", json!({"published": {"y": 2}}));
    let base = Descriptor::builder().behavior(&a).build();

    let merged = compose(&base, [b.clone()]);

    assert_eq!(
        merged.behaviors(),
        &[BehaviorItem::from(&a), BehaviorItem::from(&b)]
    );
    assert_eq!(merged.value("published"), Some(&json!({"x": 1, "y": 2})));
}

/// The merged descriptor is a new object; later base keys win collisions.
#[test]
fn base_keys_take_final_precedence_in_maps() {
    let a = data_behavior("a", json!({"computed": {"total": "a", "avg": "a"}}));
    let b = data_behavior("b", json!({"computed": {"total": "b"}}));
    let base = Descriptor::builder()
        .value("computed", json!({"avg": "base"}))
        .build();

    let merged = compose(&base, [a, b]);
    assert_eq!(
        merged.value("computed"),
        Some(&json!({"total": "b", "avg": "base"}))
    );
}

/// Sequence collections concatenate as `A ++ B ++ base`.
#[test]
fn sequence_collections_concatenate_in_precedence_order() {
    let a = data_behavior("a", json!({"observe": ["a1", "a2"]}));
    let b = data_behavior("b", json!({"observe": ["b1"]}));
    let base = Descriptor::builder().value("observe", json!(["base"])).build();

    let merged = compose(&base, [a, b]);
    assert_eq!(
        merged.value("observe"),
        Some(&json!(["a1", "a2", "b1", "base"]))
    );
}

/// Plain members: base wins regardless of behavior order.
#[test]
fn base_wins_plain_members_in_any_order() {
    let a = data_behavior("a", json!({"title": "a"}));
    let b = data_behavior("b", json!({"title": "b"}));
    let base = Descriptor::builder().value("title", json!("base")).build();

    assert_eq!(compose(&base, [a.clone(), b.clone()]).value("title"), Some(&json!("base")));
    assert_eq!(compose(&base, [b, a]).value("title"), Some(&json!("base")));
}

/// Base, then A, then B: each exactly once.
#[test]
fn chained_hook_runs_base_then_behaviors_in_order() {
    init_tracing();
    let log = CallLog::new();
    let a = recording_behavior(&log, "a", &["attached"]);
    let b = recording_behavior(&log, "b", &["attached"]);
    let base = Descriptor::builder()
        .behavior(&a)
        .method("attached", log.hook("base.attached"))
        .build();

    let instance = Instance::new(compose(&base, [b]));
    instance.call("attached", &[]).unwrap();

    assert_eq!(
        log.entries(),
        vec!["base.attached", "a.attached", "b.attached"]
    );
}

/// Every lifecycle hook and observer is chained, arguments are forwarded.
#[test]
fn observers_receive_arguments() {
    let log = CallLog::new();
    let a = Descriptor::builder()
        .method("valueChanged", log.hook_with_args("a"))
        .build()
        .into_behavior();
    let base = Descriptor::builder()
        .method("valueChanged", log.hook_with_args("base"))
        .build();

    let instance = Instance::new(compose(&base, [a]));
    instance
        .call("valueChanged", &[json!(1), json!("old")])
        .unwrap();

    assert_eq!(log.entries(), vec![r#"base(1,"old")"#, r#"a(1,"old")"#]);
}

/// A base hook with no behavior counterpart is copied unchanged.
#[test]
fn base_only_hook_is_not_wrapped() {
    let log = CallLog::new();
    let hook = log.hook("base.ready");
    let base = Descriptor::builder().method("ready", hook.clone()).build();
    let a = data_behavior("a", json!({"title": "a"}));

    let merged = compose(&base, [a]);
    assert!(merged.method("ready").unwrap().ptr_eq(&hook));
}

/// Chains read the receiver's list at call time.
#[test]
fn chain_honors_later_list_changes() {
    let log = CallLog::new();
    let a = recording_behavior(&log, "a", &["detached"]);
    let b = recording_behavior(&log, "b", &["detached"]);

    let instance = Instance::new(compose(&Descriptor::default(), [a.clone(), b.clone()]));
    instance.set_behaviors(vec![BehaviorItem::from(&b)]);
    instance.call("detached", &[]).unwrap();
    assert_eq!(log.entries(), vec!["b.detached"]);

    log.clear();
    instance.set_behaviors(Vec::new());
    instance.call("detached", &[]).unwrap();
    assert!(log.entries().is_empty());
}

/// A failure stops the chain and reaches the caller unchanged.
#[test]
fn failing_hook_stops_chain() {
    let log = CallLog::new();
    let a = Descriptor::builder()
        .method("created", log.failing_hook("a", "created"))
        .build()
        .into_behavior();
    let b = recording_behavior(&log, "b", &["created"]);

    let instance = Instance::new(compose(&Descriptor::default(), [a, b]));
    let err = instance.call("created", &[]).unwrap_err();

    assert_eq!(err, HookError::failed("created", "a failed"));
    assert_eq!(log.entries(), vec!["a"]);
}

/// Duplicates and nesting collapse before merging, so collections are not
/// merged twice.
#[test]
fn duplicate_behaviors_merge_once() {
    let a = data_behavior("a", json!({"observe": ["a"]}));
    let base = Descriptor::builder()
        .behavior(&a)
        .behavior(vec![a.clone(), a.clone()])
        .build();

    let merged = compose(&base, [BehaviorItem::from(vec![a.clone()])]);
    assert_eq!(merged.behaviors().len(), 1);
    assert_eq!(merged.value("observe"), Some(&json!(["a"])));
}

/// Membership is by identity, directly or through nested lists.
#[test]
fn membership_after_composition() {
    let a = data_behavior("a", json!({}));
    let nested = data_behavior("nested", json!({}));
    let unrelated = data_behavior("a", json!({}));

    let merged = compose(
        &Descriptor::default(),
        [
            BehaviorItem::from(&a),
            BehaviorItem::from(vec![BehaviorItem::from(vec![nested.clone()])]),
        ],
    );

    assert!(implements_behavior(&merged, &a));
    assert!(implements_behavior(&merged, &nested));
    assert!(!implements_behavior(&merged, &unrelated));
    assert!(!implements_behavior(&Descriptor::default(), &a));
}

/// One broken member does not block the rest of the composition.
#[test]
fn unreadable_collection_is_skipped() {
    init_tracing();
    let broken = Descriptor::builder()
        .label("broken")
        .accessor("eventDelegates", || Err(AccessorError::new("getter threw")))
        .value("title", json!("kept"))
        .build()
        .into_behavior();
    let good = data_behavior("good", json!({"eventDelegates": {"tap": "onTap"}}));

    let result = Composer::default().compose_with_report(&Descriptor::default(), [broken, good]);

    assert_eq!(result.descriptor.value("title"), Some(&json!("kept")));
    assert_eq!(
        result.descriptor.value("eventDelegates"),
        Some(&json!({"tap": "onTap"}))
    );
    assert_eq!(result.report.failures.len(), 1);

    let failure = &result.report.failures[0];
    assert_eq!(failure.member, "eventDelegates");
    assert_eq!(
        failure.origin,
        SourceRef::Behavior {
            index: 0,
            label: Some("broken".to_string()),
        }
    );
    assert!(matches!(failure.failure, CopyFailure::Accessor(_)));
}

/// Composing an already composed descriptor runs each hook once.
#[test]
fn recomposition_does_not_double_run_hooks() {
    let log = CallLog::new();
    let a = recording_behavior(&log, "a", &["ready"]);
    let b = recording_behavior(&log, "b", &["ready"]);
    let base = Descriptor::builder()
        .method("ready", log.hook("base.ready"))
        .build();

    let first = compose(&base, [a]);
    let second = compose(&first, [b]);

    Instance::new(second).call("ready", &[]).unwrap();
    assert_eq!(log.entries(), vec!["base.ready", "a.ready", "b.ready"]);
}

/// A composed descriptor used as a behavior dispatches over its own list.
#[test]
fn composed_behavior_runs_its_own_chain() {
    let log = CallLog::new();
    let inner = recording_behavior(&log, "inner", &["attached"]);
    let mixin = compose(
        &Descriptor::builder()
            .label("mixin")
            .method("attached", log.hook("mixin.attached"))
            .build(),
        [inner],
    )
    .into_behavior();

    let instance = Instance::new(compose(&Descriptor::default(), [mixin]));
    instance.call("attached", &[]).unwrap();

    assert_eq!(log.entries(), vec!["mixin.attached", "inner.attached"]);
}

/// A behavior listed both directly and inside a composed behavior fires once.
#[test]
fn shared_behavior_in_composed_behavior_fires_once() {
    let log = CallLog::new();
    let a = recording_behavior(&log, "a", &["attached"]);
    let mixin = compose(
        &Descriptor::builder()
            .label("mixin")
            .method("attached", log.hook("mixin.attached"))
            .build(),
        [a.clone()],
    )
    .into_behavior();

    let instance = Instance::new(compose(&Descriptor::default(), [a, mixin]));
    instance.call("attached", &[]).unwrap();

    assert_eq!(log.entries(), vec!["a.attached", "mixin.attached"]);
}

/// Plain methods override like any other plain member.
#[test]
fn plain_methods_override() {
    let a = Descriptor::builder()
        .hook("format", |_, _| Ok(json!("a")))
        .build()
        .into_behavior();
    let base = Descriptor::builder()
        .hook("format", |_, _| Ok(json!("base")))
        .build();

    let instance = Instance::new(compose(&base, [a]));
    assert_eq!(instance.call("format", &[]).unwrap(), json!("base"));
    assert_eq!(instance.call("format", &[Value::Null]).unwrap(), json!("base"));
}
