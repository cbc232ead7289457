// Copyright (c) 2025 - Cowboy AI, Inc.
//! Change event serialization

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::ChangeEventTypeMap;
use crate::errors::{SourcingError, SourcingResult};
use crate::events::{ChangeKind, EventHeader, EventType, RecordedEvent, SequenceNumber, SequencedEvent};

/// Turns sequenced events into stored text and stored text back into
/// recorded events
pub trait ChangeEventSerializer<C: ChangeKind>: Send + Sync {
    /// Tag stored beside the serialized event
    fn event_type(&self, change: &C) -> SourcingResult<EventType>;

    fn serialize(&self, event: &SequencedEvent<C>) -> SourcingResult<String>;

    fn deserialize(&self, event_type: &EventType, serialized: &str) -> SourcingResult<RecordedEvent<C>>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    event_id: Uuid,
    aggregate_id: Uuid,
    occurred_at: DateTime<Utc>,
    sequence_number: Option<SequenceNumber>,
    change: Value,
}

/// JSON serializer driven by a [`ChangeEventTypeMap`]
#[derive(Debug, Clone)]
pub struct JsonChangeEventSerializer<C> {
    type_map: ChangeEventTypeMap<C>,
}

impl<C: ChangeKind> JsonChangeEventSerializer<C> {
    pub fn new(type_map: ChangeEventTypeMap<C>) -> Self {
        Self { type_map }
    }

    pub fn type_map(&self) -> &ChangeEventTypeMap<C> {
        &self.type_map
    }
}

impl<C: ChangeKind> ChangeEventSerializer<C> for JsonChangeEventSerializer<C> {
    fn event_type(&self, change: &C) -> SourcingResult<EventType> {
        self.type_map.event_type(change)
    }

    fn serialize(&self, event: &SequencedEvent<C>) -> SourcingResult<String> {
        let header = event.header();
        let envelope = Envelope {
            event_id: header.event_id(),
            aggregate_id: header.aggregate_id(),
            occurred_at: header.occurred_at(),
            sequence_number: Some(event.sequence_number()),
            change: serde_json::to_value(event.change())?,
        };

        Ok(serde_json::to_string(&envelope)?)
    }

    fn deserialize(&self, event_type: &EventType, serialized: &str) -> SourcingResult<RecordedEvent<C>> {
        if !self.type_map.contains(event_type) {
            return Err(SourcingError::UnknownEventType(event_type.clone()));
        }

        let envelope: Envelope = serde_json::from_str(serialized)
            .map_err(|e| SourcingError::Deserialization(e.to_string()))?;
        let change = self.type_map.decode(event_type, envelope.change)?;

        Ok(RecordedEvent::new(
            EventHeader::new(envelope.event_id, envelope.aggregate_id, envelope.occurred_at),
            envelope.sequence_number,
            change,
        ))
    }
}
