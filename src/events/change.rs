// Copyright (c) 2025 - Cowboy AI, Inc.
//! Change event envelopes
//!
//! All envelopes are immutable: fields are private and exposed through
//! getters. Sequencing is a consuming transition available only inside the
//! crate, so an event cannot be sequenced twice and a sequence number cannot
//! be read before it exists.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EventType, SequenceNumber};

/// The closed set of changes an aggregate can raise
///
/// Implemented by one enum per aggregate. For storage through
/// [`JsonChangeEventSerializer`](crate::event_store::JsonChangeEventSerializer)
/// the enum usually wraps one payload struct per variant and serializes
/// `#[serde(untagged)]`, with [`event_type`](ChangeKind::event_type) naming
/// the variant.
pub trait ChangeKind: Serialize + Clone + fmt::Debug + Send + Sync + 'static {
    /// Storage tag of this change
    fn event_type(&self) -> EventType;

    /// Whether this change brings the aggregate into existence
    fn is_creation(&self) -> bool {
        false
    }
}

/// Anything with a stable event identity
pub trait Identified {
    fn event_id(&self) -> Uuid;
}

/// Identity and timing shared by every change event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHeader {
    event_id: Uuid,
    aggregate_id: Uuid,
    occurred_at: DateTime<Utc>,
}

impl EventHeader {
    pub fn new(event_id: Uuid, aggregate_id: Uuid, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id,
            aggregate_id,
            occurred_at,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn aggregate_id(&self) -> Uuid {
        self.aggregate_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// A proposed change, not yet accepted by its aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeEvent<C> {
    header: EventHeader,
    change: C,
}

impl<C: ChangeKind> ChangeEvent<C> {
    /// Propose a change for an aggregate, stamped now
    pub fn new(aggregate_id: impl Into<Uuid>, change: C) -> Self {
        Self::at(aggregate_id, change, Utc::now())
    }

    /// Propose a change with an explicit timestamp
    ///
    /// A creation change takes the aggregate id as its event id; every
    /// other change gets a fresh time-ordered id.
    pub fn at(aggregate_id: impl Into<Uuid>, change: C, occurred_at: DateTime<Utc>) -> Self {
        let aggregate_id = aggregate_id.into();
        let event_id = if change.is_creation() {
            aggregate_id
        } else {
            Uuid::now_v7()
        };

        Self {
            header: EventHeader::new(event_id, aggregate_id, occurred_at),
            change,
        }
    }

    pub fn is_creation(&self) -> bool {
        self.change.is_creation()
    }

    pub fn event_type(&self) -> EventType {
        self.change.event_type()
    }

    pub(crate) fn into_sequenced(self, sequence_number: SequenceNumber) -> SequencedEvent<C> {
        SequencedEvent {
            header: self.header,
            sequence_number,
            change: self.change,
        }
    }
}

impl<C> ChangeEvent<C> {
    pub fn header(&self) -> &EventHeader {
        &self.header
    }

    pub fn change(&self) -> &C {
        &self.change
    }

    pub fn event_id(&self) -> Uuid {
        self.header.event_id
    }

    pub fn aggregate_id(&self) -> Uuid {
        self.header.aggregate_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.header.occurred_at
    }
}

/// A change accepted by its aggregate, carrying its position in the history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequencedEvent<C> {
    header: EventHeader,
    sequence_number: SequenceNumber,
    change: C,
}

impl<C> SequencedEvent<C> {
    pub fn header(&self) -> &EventHeader {
        &self.header
    }

    pub fn change(&self) -> &C {
        &self.change
    }

    pub fn sequence_number(&self) -> SequenceNumber {
        self.sequence_number
    }

    pub fn event_id(&self) -> Uuid {
        self.header.event_id
    }

    pub fn aggregate_id(&self) -> Uuid {
        self.header.aggregate_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.header.occurred_at
    }
}

impl<C: ChangeKind> SequencedEvent<C> {
    pub fn is_creation(&self) -> bool {
        self.change.is_creation()
    }

    pub fn event_type(&self) -> EventType {
        self.change.event_type()
    }
}

/// A change as read back from storage
///
/// The sequence number is optional because storage may hold events that
/// never went through an aggregate; rehydration rejects those.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedEvent<C> {
    header: EventHeader,
    sequence_number: Option<SequenceNumber>,
    change: C,
}

impl<C> RecordedEvent<C> {
    pub fn new(header: EventHeader, sequence_number: Option<SequenceNumber>, change: C) -> Self {
        Self {
            header,
            sequence_number,
            change,
        }
    }

    pub fn header(&self) -> &EventHeader {
        &self.header
    }

    pub fn change(&self) -> &C {
        &self.change
    }

    pub fn sequence_number(&self) -> Option<SequenceNumber> {
        self.sequence_number
    }

    pub fn event_id(&self) -> Uuid {
        self.header.event_id
    }

    pub fn aggregate_id(&self) -> Uuid {
        self.header.aggregate_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.header.occurred_at
    }
}

impl<C: ChangeKind> RecordedEvent<C> {
    pub fn is_creation(&self) -> bool {
        self.change.is_creation()
    }

    pub fn event_type(&self) -> EventType {
        self.change.event_type()
    }
}

impl<C> From<SequencedEvent<C>> for RecordedEvent<C> {
    fn from(event: SequencedEvent<C>) -> Self {
        Self {
            header: event.header,
            sequence_number: Some(event.sequence_number),
            change: event.change,
        }
    }
}

impl<C> From<ChangeEvent<C>> for RecordedEvent<C> {
    fn from(event: ChangeEvent<C>) -> Self {
        Self {
            header: event.header,
            sequence_number: None,
            change: event.change,
        }
    }
}

impl<C> Identified for ChangeEvent<C> {
    fn event_id(&self) -> Uuid {
        self.header.event_id
    }
}

impl<C> Identified for SequencedEvent<C> {
    fn event_id(&self) -> Uuid {
        self.header.event_id
    }
}

impl<C> Identified for RecordedEvent<C> {
    fn event_id(&self) -> Uuid {
        self.header.event_id
    }
}
