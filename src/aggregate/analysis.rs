// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event History Analysis
//!
//! Pure validation of a stored history before it is replayed. Every
//! violation is collected rather than stopping at the first, so a corrupt
//! stream is reported in full.
//!
//! # Rules
//!
//! 1. The history is not empty
//! 2. The first event is the creation event
//! 3. The creation event is sequenced, at position 1
//! 4. No later event is a creation event
//! 5. Every later event follows its predecessor by exactly one

use thiserror::Error;

use crate::events::{ChangeKind, RecordedEvent, SequenceNumber};

/// A broken rule found in a stored history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceViolation {
    #[error("there are no events to rehydrate from")]
    NoEvents,

    #[error("the aggregate's creation event is missing")]
    MissingCreation,

    #[error(
        "the aggregate's creation event has no valid sequence; events must originate from the aggregate"
    )]
    UnsequencedCreation,

    #[error("the aggregate's creation event is not in sequence position 1 (found {found})")]
    CreationOutOfSequence { found: SequenceNumber },

    #[error("the aggregate has multiple creation events (another at {})", describe(.at))]
    MultipleCreation { at: Option<SequenceNumber> },

    #[error("a change event is missing between sequence {after} and {}", describe(.found))]
    Gap {
        after: SequenceNumber,
        found: Option<SequenceNumber>,
    },
}

fn describe(sequence: &Option<SequenceNumber>) -> String {
    sequence.map_or_else(|| "unsequenced".to_string(), |s| s.to_string())
}

/// Result of [`analyze_sequence`]
#[derive(Debug)]
pub struct SequenceAnalysis<'a, C> {
    violations: Vec<SequenceViolation>,
    creation: Option<&'a RecordedEvent<C>>,
}

impl<'a, C> SequenceAnalysis<'a, C> {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[SequenceViolation] {
        &self.violations
    }

    /// The creation event, when the history starts with one
    pub fn creation(&self) -> Option<&'a RecordedEvent<C>> {
        self.creation
    }

    pub fn into_violations(self) -> Vec<SequenceViolation> {
        self.violations
    }
}

/// Check a history already sorted by sequence number
pub fn analyze_sequence<C: ChangeKind>(events: &[RecordedEvent<C>]) -> SequenceAnalysis<'_, C> {
    let Some((first, rest)) = events.split_first() else {
        return SequenceAnalysis {
            violations: vec![SequenceViolation::NoEvents],
            creation: None,
        };
    };

    let mut violations = Vec::new();
    let creation = first.is_creation().then_some(first);

    match creation.map(RecordedEvent::sequence_number) {
        None => violations.push(SequenceViolation::MissingCreation),
        Some(None) => violations.push(SequenceViolation::UnsequencedCreation),
        Some(Some(found)) if found != SequenceNumber::FIRST => {
            violations.push(SequenceViolation::CreationOutOfSequence { found })
        }
        Some(Some(_)) => {}
    }

    // The expected position advances by one per event, never resynchronising
    // on what was found, so every event after a gap is reported too.
    let mut expected = SequenceNumber::FIRST;
    for event in rest {
        if event.is_creation() {
            violations.push(SequenceViolation::MultipleCreation {
                at: event.sequence_number(),
            });
        }

        let next = expected.next();
        if event.sequence_number() != Some(next) {
            violations.push(SequenceViolation::Gap {
                after: expected,
                found: event.sequence_number(),
            });
        }
        expected = next;
    }

    SequenceAnalysis {
        violations,
        creation,
    }
}
