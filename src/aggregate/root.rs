// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event-Sourced Aggregate Root
//!
//! [`EventSourcedRoot`] is the engine state embedded in every aggregate,
//! and [`EventSourced`] is the contract an aggregate implements to get the
//! mutation and rehydration protocol.
//!
//! # Invariants
//!
//! - `current_sequence` equals the number of accepted changes (live) or the
//!   last replayed sequence (rehydrated)
//! - every buffered event was sequenced exactly once
//! - a rejected change leaves sequence, buffer and state untouched, provided
//!   the handler only mutates state once it has decided to succeed

use tracing::{debug, error, warn};
use uuid::Uuid;

use super::{analyze_sequence, AggregateId, DomainEventAggregator};
use crate::errors::InvariantViolation;
use crate::events::{ChangeEvent, ChangeKind, EventHeader, RecordedEvent, SequenceNumber, SequencedEvent};
use crate::outcome::Outcome;

/// Reason given when a second creation change is applied to a live aggregate
pub const MULTIPLE_CREATION_EVENTS: &str = "multiple creation events registered";

/// Where an aggregate is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateLifecycle {
    /// No change accepted yet
    Uninitialized,
    /// At least one change accepted; holds the latest sequence
    Sequenced(SequenceNumber),
}

/// Engine state shared by all event-sourced aggregates
#[derive(Debug, Clone)]
pub struct EventSourcedRoot<C> {
    id: Uuid,
    current_sequence: SequenceNumber,
    pending: DomainEventAggregator<SequencedEvent<C>>,
}

impl<C: ChangeKind> EventSourcedRoot<C> {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self {
            id: id.into(),
            current_sequence: SequenceNumber::ZERO,
            pending: DomainEventAggregator::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_sequence(&self) -> SequenceNumber {
        self.current_sequence
    }

    pub fn lifecycle(&self) -> AggregateLifecycle {
        if self.current_sequence == SequenceNumber::ZERO {
            AggregateLifecycle::Uninitialized
        } else {
            AggregateLifecycle::Sequenced(self.current_sequence)
        }
    }

    pub fn raised_events(&self) -> &[SequencedEvent<C>] {
        self.pending.events()
    }

    pub fn clear_events(&mut self) {
        self.pending.clear();
    }

    /// Whether an event with this id is waiting in the buffer
    pub fn has_raised(&self, event_id: Uuid) -> bool {
        self.pending.contains(event_id)
    }

    pub fn take_events(&mut self) -> Vec<SequencedEvent<C>> {
        self.pending.take()
    }

    fn accept(&mut self, event: ChangeEvent<C>) -> SequenceNumber {
        let sequence = self.current_sequence.next();
        self.current_sequence = sequence;
        self.pending.add(event.into_sequenced(sequence));
        sequence
    }
}

/// An aggregate whose state is a fold over its change events
///
/// Implementors embed an [`EventSourcedRoot`] and fold each change into
/// their state in [`handle_change`](EventSourced::handle_change), an
/// exhaustive match over the change enum.
pub trait EventSourced: Sized {
    type Change: ChangeKind;

    fn root(&self) -> &EventSourcedRoot<Self::Change>;

    fn root_mut(&mut self) -> &mut EventSourcedRoot<Self::Change>;

    /// Fold one change into the aggregate's state
    ///
    /// Called for live changes and during replay. Return a failure to
    /// reject a live change; state must not be mutated in that case.
    fn handle_change(&mut self, change: &Self::Change, header: &EventHeader) -> Outcome<()>;

    fn id(&self) -> AggregateId<Self> {
        AggregateId::from_uuid(self.root().id())
    }

    fn current_sequence(&self) -> SequenceNumber {
        self.root().current_sequence()
    }

    fn lifecycle(&self) -> AggregateLifecycle {
        self.root().lifecycle()
    }

    /// Changes accepted since the buffer was last cleared
    fn raised_events(&self) -> &[SequencedEvent<Self::Change>] {
        self.root().raised_events()
    }

    fn clear_events(&mut self) {
        self.root_mut().clear_events();
    }

    fn take_events(&mut self) -> Vec<SequencedEvent<Self::Change>> {
        self.root_mut().take_events()
    }

    /// Propose a change to this aggregate
    fn try_change(&mut self, change: Self::Change) -> Outcome<&mut Self> {
        let event = ChangeEvent::new(self.root().id(), change);
        self.try_apply_change(event)
    }

    /// Apply a change event, sequencing and buffering it on success
    fn try_apply_change(&mut self, event: ChangeEvent<Self::Change>) -> Outcome<&mut Self> {
        let root = self.root();

        if event.is_creation() && root.lifecycle() != AggregateLifecycle::Uninitialized {
            warn!(
                "Rejected {} for aggregate {}: {}",
                event.event_type(),
                root.id(),
                MULTIPLE_CREATION_EVENTS
            );
            return Outcome::fail(MULTIPLE_CREATION_EVENTS);
        }

        if event.aggregate_id() != root.id() {
            warn!(
                "Rejected {} addressed to aggregate {} by aggregate {}",
                event.event_type(),
                event.aggregate_id(),
                root.id()
            );
            return Outcome::fail(format!(
                "change event for aggregate {} cannot be applied to aggregate {}",
                event.aggregate_id(),
                root.id()
            ));
        }

        if root.has_raised(event.event_id()) {
            warn!(
                "Rejected {} {} for aggregate {}: already raised",
                event.event_type(),
                event.event_id(),
                root.id()
            );
            return Outcome::fail(format!("change event {} was already applied", event.event_id()));
        }

        if let Outcome::Failure(details) = self.handle_change(event.change(), event.header()) {
            debug!(
                "Handler rejected {} for aggregate {}: {}",
                event.event_type(),
                self.root().id(),
                details
            );
            return Outcome::Failure(details);
        }

        let event_type = event.event_type();
        let sequence = self.root_mut().accept(event);
        debug!(
            "Applied {} to aggregate {} at sequence {}",
            event_type,
            self.root().id(),
            sequence
        );

        Outcome::Success(self)
    }

    /// Rebuild an aggregate from its stored history
    ///
    /// The history may arrive in any order. It is sorted, validated in full
    /// and then replayed through `handle_change` into the shell built by
    /// `make_shell` for the creation event's aggregate id. Replay does not
    /// buffer events. Any violation, or a handler rejecting a stored
    /// change, is returned as an [`InvariantViolation`].
    fn rehydrate<F, I, E>(make_shell: F, history: I) -> Result<Self, InvariantViolation>
    where
        F: FnOnce(AggregateId<Self>) -> Self,
        I: IntoIterator<Item = E>,
        E: Into<RecordedEvent<Self::Change>>,
    {
        let mut events: Vec<RecordedEvent<Self::Change>> =
            history.into_iter().map(Into::into).collect();
        events.sort_by_key(RecordedEvent::sequence_number);

        let creation_id = {
            let analysis = analyze_sequence(&events);
            match (analysis.is_valid(), analysis.creation()) {
                (true, Some(creation)) => creation.aggregate_id(),
                _ => {
                    let violations = analysis.into_violations();
                    error!(
                        "Refusing to rehydrate from invalid history: {}",
                        violations
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("; ")
                    );
                    return Err(InvariantViolation::InvalidHistory(violations));
                }
            }
        };

        let mut aggregate = make_shell(AggregateId::from_uuid(creation_id));
        let mut last = SequenceNumber::ZERO;

        for event in events {
            let sequence = event.sequence_number().unwrap_or_else(|| last.next());
            if let Outcome::Failure(details) = aggregate.handle_change(event.change(), event.header()) {
                error!(
                    "Stored {} at sequence {} rejected while rehydrating aggregate {}: {}",
                    event.event_type(),
                    sequence,
                    creation_id,
                    details
                );
                return Err(InvariantViolation::ReplayRejected {
                    sequence,
                    reasons: details.reasons().to_vec(),
                });
            }
            last = sequence;
        }

        aggregate.root_mut().current_sequence = last;
        debug!("Rehydrated aggregate {} at sequence {}", creation_id, last);

        Ok(aggregate)
    }
}
