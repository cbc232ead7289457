// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Outcome Composition
//!
//! `then` must behave like a monadic bind: identities hold, grouping does
//! not matter, and failures pass through without running continuations.

use std::cell::Cell;

use proptest::prelude::*;

use cim_event_sourcing::outcome::{ChangeOutcome, Outcome, PanicFault, Resolve};

/// Comparable view of an outcome
fn observe<S: Clone>(outcome: &Outcome<S>) -> Result<S, Vec<String>> {
    match outcome {
        Outcome::Success(value) => Ok(value.clone()),
        Outcome::Failure(details) => Err(details.reasons().to_vec()),
    }
}

fn halve(n: i64) -> Outcome<i64> {
    if n % 2 == 0 {
        Outcome::success(n / 2)
    } else {
        Outcome::fail(format!("{n} is odd"))
    }
}

fn shrink(n: i64) -> Outcome<i64> {
    if n.abs() > 1_000 {
        Outcome::fail_with([format!("{n} is too large"), "limit is 1000".to_string()])
    } else {
        Outcome::success(n - 1)
    }
}

fn outcome_strategy() -> impl Strategy<Value = Outcome<i64>> {
    prop_oneof![
        (-5_000i64..5_000).prop_map(Outcome::<i64>::success),
        prop::collection::vec("[a-z ]{1,12}", 1..4)
            .prop_map(|reasons: Vec<String>| Outcome::<i64>::fail_with(reasons)),
    ]
}

proptest! {
    /// Property: success(a).then(f) is f(a)
    #[test]
    fn prop_left_identity(n in -5_000i64..5_000) {
        let bound = Outcome::success(n).then(halve);

        prop_assert_eq!(observe(&bound), observe(&halve(n)));
    }

    /// Property: m.then(success) is m
    #[test]
    fn prop_right_identity(outcome in outcome_strategy()) {
        let expected = observe(&outcome);

        let bound: Outcome<i64> = outcome.then(Outcome::success);

        prop_assert_eq!(observe(&bound), expected);
    }

    /// Property: grouping of chained binds does not change the result
    #[test]
    fn prop_then_is_associative(outcome in outcome_strategy()) {
        let left = outcome.clone().then(halve).then(shrink);
        let right = outcome.then(|n| halve(n).then(shrink));

        prop_assert_eq!(observe(&left), observe(&right));
    }

    /// Property: a failure never runs any continuation and keeps its reasons
    #[test]
    fn prop_failure_short_circuits(reasons in prop::collection::vec("[a-z]{1,8}", 1..5)) {
        let calls = Cell::new(0_u32);

        let chained: ChangeOutcome<i64> = Outcome::<i64>::fail_with(reasons.clone())
            .then(|n| {
                calls.set(calls.get() + 1);
                Outcome::success(n)
            })
            .map(|n| {
                calls.set(calls.get() + 1);
                n + 1
            })
            .then(|n| {
                calls.set(calls.get() + 1);
                ChangeOutcome::success(n)
            });

        let details = chained.into_result().unwrap_err();
        prop_assert_eq!(calls.get(), 0);
        prop_assert_eq!(details.reasons(), reasons.as_slice());
    }

    /// Property: map agrees with then over a wrapped function
    #[test]
    fn prop_map_matches_then(outcome in outcome_strategy()) {
        let mapped = outcome.clone().map(|n| n * 3);
        let bound = outcome.then(|n| Outcome::success(n * 3));

        prop_assert_eq!(observe(&mapped), observe(&bound));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: a panicking continuation becomes a failure carrying the
    /// panic message
    #[test]
    fn prop_panics_are_absorbed(message in "[a-z]{1,16}") {
        let outcome: Outcome<i64> = Outcome::success(()).map(|()| -> i64 {
            panic!("{}", message)
        });

        let details = outcome.into_result().unwrap_err();
        let fault = details.cause().and_then(|f| f.downcast_ref::<PanicFault>());
        prop_assert_eq!(fault.map(|f| f.message.clone()), Some(message));
    }
}
