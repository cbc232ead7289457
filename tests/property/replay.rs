// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Rehydration
//!
//! Replaying the events an aggregate raised must rebuild the same state, no
//! matter how the history is ordered when it arrives.

use proptest::prelude::*;

use cim_event_sourcing::aggregate::SequenceViolation;
use cim_event_sourcing::events::{SequenceNumber, SequencedEvent};
use cim_event_sourcing::{EventSourced, InvariantViolation};

use crate::fixtures::{counter_id, Counter, CounterChange};

fn increments() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec((-1_000i64..1_000).prop_filter("non-zero", |n| *n != 0), 0..20)
}

fn counter_from(increments: &[i64]) -> Counter {
    let mut counter = Counter::create(counter_id(), "visits")
        .into_result()
        .expect("counter creation failed");
    for by in increments {
        assert!(counter.increment(*by).is_success());
    }
    counter
}

fn history(counter: &Counter) -> Vec<SequencedEvent<CounterChange>> {
    counter.raised_events().to_vec()
}

/// Increments together with a permutation of the resulting history
fn shuffled_history() -> impl Strategy<Value = (Vec<i64>, Vec<usize>)> {
    increments().prop_flat_map(|incs| {
        let order: Vec<usize> = (0..=incs.len()).collect();
        (Just(incs), Just(order).prop_shuffle())
    })
}

proptest! {
    /// Property: rehydration rebuilds live state
    #[test]
    fn prop_replay_matches_live_state(incs in increments()) {
        let live = counter_from(&incs);

        let restored = Counter::rehydrate(Counter::shell, history(&live)).unwrap();

        prop_assert_eq!(restored.applied(), live.applied());
        prop_assert_eq!(restored.current_sequence(), live.current_sequence());
        prop_assert_eq!(restored.current_sequence().value(), incs.len() as u64 + 1);
        prop_assert!(restored.raised_events().is_empty());
    }

    /// Property: arrival order of a complete history does not matter
    #[test]
    fn prop_replay_tolerates_any_order((incs, order) in shuffled_history()) {
        let live = counter_from(&incs);
        let events = history(&live);
        let shuffled: Vec<_> = order.iter().map(|i| events[*i].clone()).collect();

        let restored = Counter::rehydrate(Counter::shell, shuffled).unwrap();

        prop_assert_eq!(restored.applied(), incs.as_slice());
        prop_assert_eq!(restored.number(), live.number());
        prop_assert_eq!(restored.current_sequence(), live.current_sequence());
    }

    /// Property: dropping any interior event is reported as a gap
    #[test]
    fn prop_missing_interior_event_is_a_gap(
        incs in prop::collection::vec(1i64..100, 2..12),
        pick in any::<prop::sample::Index>(),
    ) {
        let live = counter_from(&incs);
        let mut events = history(&live);
        let removed = 1 + pick.index(events.len() - 2);
        events.remove(removed);

        let error = Counter::rehydrate(Counter::shell, events).unwrap_err();

        let is_gap_after_removed = |v: &SequenceViolation| {
            matches!(v, SequenceViolation::Gap { after, .. } if *after == SequenceNumber::new(removed as u64))
        };
        prop_assert!(matches!(error, InvariantViolation::InvalidHistory(_)));
        prop_assert!(error.violations().iter().any(is_gap_after_removed));
    }
}
