//! Integration tests for null strategies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use inputguard::prelude::*;
use inputguard::{
    noop, validators, FollowsNullStrategy, GuardError, Nullable, SkipOutput, ValidationError,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

type Text = Option<String>;

fn some(s: &str) -> Text {
    Some(s.to_string())
}

/// Appends `-suffix`, rendering an absent value as `null`.
fn append(suffix: &'static str) -> impl Fn(Text) -> Text + Send + Sync + 'static {
    move |value: Text| Some(format!("{}-{suffix}", value.as_deref().unwrap_or("null")))
}

fn stage<S>(
    strategy: NullStrategy<Text, S>,
    suffix: &'static str,
) -> NullStrategyGuard<Sanitize<Text>, S> {
    NullStrategyGuard::new(strategy, Sanitize::new(append(suffix)))
}

/// A downstream guard recording how often it runs and what it receives.
fn recorder(calls: &Arc<AtomicUsize>) -> Sanitize<Text> {
    let calls = Arc::clone(calls);
    Sanitize::new(move |value: Text| {
        calls.fetch_add(1, Ordering::SeqCst);
        value.map(|s| format!("<{s}>"))
    })
}

#[test]
fn test_strategy_matrix_for_absent_input() {
    let cases: Vec<(NullStrategy<Text>, Option<Text>, usize)> = vec![
        (NullStrategy::process().into(), Some(None), 1),
        (NullStrategy::skip_process(), Some(None), 0),
        (NullStrategy::fail().into(), None, 0),
        (NullStrategy::use_default(some("d")).unwrap().into(), Some(some("<d>")), 1),
    ];

    for (strategy, expected, expected_calls) in cases {
        let calls = Arc::new(AtomicUsize::new(0));
        let guard = NullStrategyGuard::new(strategy.clone(), recorder(&calls));

        let result = guard.process(None);
        assert_eq!(result.value().cloned(), expected, "strategy {:?}", strategy);
        assert_eq!(calls.load(Ordering::SeqCst), expected_calls, "strategy {:?}", strategy);
    }
}

#[test]
fn test_present_input_ignores_strategy() {
    let strategies: Vec<NullStrategy<Text>> = vec![
        NullStrategy::process().into(),
        NullStrategy::skip_process(),
        NullStrategy::fail().into(),
        NullStrategy::use_default(some("d")).unwrap().into(),
    ];

    for strategy in strategies {
        let calls = Arc::new(AtomicUsize::new(0));
        let guard = NullStrategyGuard::new(strategy, recorder(&calls));

        assert_eq!(guard.process(some("x")).get(), some("<x>"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn test_fail_strategy_failure() {
    let guard = NullStrategyGuard::new(NullStrategy::fail(), noop::<Text>());
    let result = guard.process_property(None, "nickname");

    let failure = result.failure_ref().unwrap().as_validation().unwrap();
    assert_eq!(failure.value, Value::Null);
    assert_eq!(failure.error, ValidationError::ObjectIsNull);
    assert_eq!(failure.message(), "Invalid nickname: must not be null");
}

#[test]
fn test_absent_default_is_rejected() {
    assert_eq!(
        NullStrategy::use_default(None::<String>).unwrap_err(),
        GuardError::AbsentDefault
    );
    assert_eq!(
        NullStrategy::use_default(Value::Null).unwrap_err().to_string(),
        "default value cannot be absent"
    );
}

#[test]
fn test_strategy_governs_guards_appended_after_it() {
    let calls = Arc::new(AtomicUsize::new(0));
    let guard = NullStrategyGuard::new(NullStrategy::skip_process(), noop::<Text>())
        .and_then(recorder(&calls))
        .and_then(Validate::new(validators::not_null::<Text>));

    assert_eq!(guard.process(None), GuardResult::success(None));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(guard.process(some("a")).get(), some("<a>"));
}

#[test]
fn test_guards_before_the_strategy_always_run() {
    let calls = Arc::new(AtomicUsize::new(0));
    let guard =
        recorder(&calls).and_then(NullStrategyGuard::new(NullStrategy::fail(), noop::<Text>()));

    assert!(guard.process(None).is_failure());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_consecutive_strategies_apply_in_declaration_order() {
    let guard = builder::<Text>()
        .if_null(NullStrategy::fail())
        .if_null(NullStrategy::use_default(some("fallback")).unwrap())
        .build();

    assert!(guard.process(None).is_failure());

    let guard = builder::<Text>()
        .if_null(NullStrategy::use_default(some("fallback")).unwrap())
        .if_null(NullStrategy::fail())
        .build();

    assert_eq!(guard.process(None).get(), some("fallback"));

    let guard = builder::<Text>()
        .if_null(NullStrategy::skip_process())
        .if_null(NullStrategy::fail())
        .build();

    assert!(guard.process(None).is_failure());
}

#[test]
fn test_json_null_is_absent() {
    let guard = builder::<Value>()
        .if_null(NullStrategy::use_default(json!({ "enabled": false })).unwrap())
        .validate_that(Value::is_object, "must be an object")
        .build();

    assert_eq!(guard.process(Value::Null).get(), json!({ "enabled": false }));
    assert!(guard.process(json!(1)).is_failure());
}

#[test]
fn test_fail_strategy_guards_mapping_to_integer() {
    let guard = NullStrategyGuard::new(
        NullStrategy::fail(),
        Map::new(|s: &Text| s.as_deref().unwrap_or("").parse::<i32>()),
    );

    assert_eq!(guard.process(some("12")).get(), 12);
    assert_eq!(
        guard.process_property(None, "count").failure_ref().unwrap().message(),
        "Invalid count: must not be null"
    );
    assert!(guard.process(some("twelve")).failure_ref().unwrap().as_mapping().is_some());
}

#[test]
fn test_default_strategy_feeds_mapping_to_integer() {
    let guard = builder::<Text>()
        .if_null(NullStrategy::use_default(some("1")).unwrap())
        .map(|s: &Text| s.as_deref().unwrap_or("").parse::<u16>())
        .validate(validators::lower_than(100u16))
        .build();

    assert_eq!(guard.process(None).get(), 1);
    assert_eq!(guard.process(some("42")).get(), 42);
    assert!(guard.process(some("420")).is_failure());
}

#[test]
fn test_skip_between_skips_only_the_next_stages() {
    let guard = builder::<Text>()
        .if_null(NullStrategy::skip_process())
        .if_null(NullStrategy::process())
        .if_null(NullStrategy::skip_process())
        .sanitize(append("1"))
        .build();

    assert_eq!(guard.process(None), GuardResult::success(None));
    assert_eq!(guard.process(some("val")).get(), some("val-1"));
}

#[test]
fn test_default_among_consecutive_strategies() {
    let built = builder::<Text>()
        .if_null(NullStrategy::skip_process())
        .if_null(NullStrategy::process())
        .if_null(NullStrategy::use_default(some("plop")).unwrap())
        .if_null(NullStrategy::skip_process())
        .if_null(NullStrategy::process())
        .sanitize(append("1"))
        .build();

    let composed = NullStrategyGuard::new(NullStrategy::skip_process(), noop::<Text>())
        .and_then(NullStrategyGuard::new(NullStrategy::process(), noop::<Text>()))
        .and_then(NullStrategyGuard::new(
            NullStrategy::use_default(some("plop")).unwrap(),
            noop::<Text>(),
        ))
        .and_then(NullStrategyGuard::new(NullStrategy::skip_process(), noop::<Text>()))
        .and_then(stage(NullStrategy::process(), "1"));

    assert_eq!(built.process(None).get(), some("plop-1"));
    assert_eq!(built.process(some("val")).get(), some("val-1"));
    assert_eq!(composed.process(None).get(), some("plop-1"));
    assert_eq!(composed.process(some("val")).get(), some("val-1"));
}

#[test]
fn test_strategies_interleaved_with_stages() {
    let built = builder::<Text>()
        .if_null(NullStrategy::skip_process())
        .sanitize(append("1"))
        .if_null(NullStrategy::process())
        .sanitize(append("2"))
        .if_null(NullStrategy::skip_process())
        .sanitize(append("3"))
        .if_null(NullStrategy::process())
        .sanitize(append("4"))
        .if_null(NullStrategy::use_default(some("default")).unwrap())
        .sanitize(append("5"))
        .build();

    let composed = stage(NullStrategy::skip_process(), "1")
        .and_then(stage(NullStrategy::process(), "2"))
        .and_then(stage(NullStrategy::skip_process(), "3"))
        .and_then(stage(NullStrategy::process(), "4"))
        .and_then(stage(NullStrategy::use_default(some("default")).unwrap(), "5"));

    // The first skip only covers `-1`: the next strategy processes the absent value.
    assert_eq!(built.process(None).get(), some("null-2-3-4-5"));
    assert_eq!(built.process(some("val")).get(), some("val-1-2-3-4-5"));
    assert_eq!(composed.process(None).get(), some("null-2-3-4-5"));
    assert_eq!(composed.process(some("val")).get(), some("val-1-2-3-4-5"));
}

/// A guard type defined outside the crate.
struct Exclaim;

impl Guard for Exclaim {
    type Input = Text;
    type Output = Text;

    fn process(&self, input: Text) -> GuardResult<Text> {
        GuardResult::success(input.map(|s| s + "!"))
    }
}

impl<G, S> FollowsNullStrategy<G, S> for Exclaim
where
    G: Guard<Output = Text> + Then<Exclaim>,
    <G as Guard>::Input: Nullable + Clone,
    S: SkipOutput<Text>,
{
    type Composed = NullStrategyGuard<<G as Then<Exclaim>>::Composed, S>;

    fn follow(self, previous: NullStrategyGuard<G, S>) -> Self::Composed {
        let (strategy, downstream) = previous.into_parts();
        NullStrategyGuard::new(strategy, downstream.and_then(self))
    }
}

#[test]
fn test_custom_guard_after_strategy() {
    let boxed = builder::<Text>()
        .if_null(NullStrategy::skip_process())
        .apply(Exclaim.boxed())
        .build();

    assert_eq!(boxed.process(None), GuardResult::success(None));
    assert_eq!(boxed.process(some("hey")).get(), some("hey!"));

    let pushed = builder::<Text>()
        .if_null(NullStrategy::use_default(some("hi")).unwrap())
        .apply(Exclaim)
        .build();

    assert_eq!(pushed.process(None).get(), some("hi!"));
    assert_eq!(pushed.process(some("hey")).get(), some("hey!"));
}
