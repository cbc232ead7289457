// Copyright (c) 2025 - Cowboy AI, Inc.
//! Aggregate event streams
//!
//! The writer turns an aggregate's raised events into payloads; the reader
//! turns payloads back into recorded events and, through
//! [`EventSourced::rehydrate`], into an aggregate.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::{ChangeEventPayload, ChangeEventSerializer, EventStore};
use crate::aggregate::{AggregateId, EventSourced};
use crate::errors::{SourcingError, SourcingResult};
use crate::events::{ChangeKind, RecordedEvent, SequencedEvent};

/// Writes aggregates' raised events to an [`EventStore`]
#[derive(Debug)]
pub struct AggregateEventStreamWriter<S, Z> {
    store: Arc<S>,
    serializer: Z,
}

impl<S: EventStore, Z> AggregateEventStreamWriter<S, Z> {
    pub fn new(store: Arc<S>, serializer: Z) -> Self {
        Self { store, serializer }
    }

    /// Write every event the aggregate has raised; returns how many
    ///
    /// The aggregate's buffer is left untouched.
    pub async fn write_to_stream<A>(&self, aggregate: &A) -> SourcingResult<usize>
    where
        A: EventSourced,
        Z: ChangeEventSerializer<A::Change>,
    {
        self.write_events(*aggregate.id().as_uuid(), aggregate.raised_events())
            .await
    }

    /// Write sequenced events of one aggregate, in order
    pub async fn write_events<C>(
        &self,
        aggregate_id: Uuid,
        events: &[SequencedEvent<C>],
    ) -> SourcingResult<usize>
    where
        C: ChangeKind,
        Z: ChangeEventSerializer<C>,
    {
        for event in events {
            let payload = ChangeEventPayload::new(
                aggregate_id,
                self.serializer.event_type(event.change())?,
                Some(event.sequence_number()),
                self.serializer.serialize(event)?,
            );
            self.store.write(payload).await?;
        }

        debug!("Wrote {} events for aggregate {}", events.len(), aggregate_id);
        Ok(events.len())
    }
}

/// Reads aggregates back from an [`EventStore`]
#[derive(Debug)]
pub struct AggregateEventStreamReader<S, Z> {
    store: Arc<S>,
    serializer: Z,
}

impl<S: EventStore, Z> AggregateEventStreamReader<S, Z> {
    pub fn new(store: Arc<S>, serializer: Z) -> Self {
        Self { store, serializer }
    }

    /// Read an aggregate's stored history
    ///
    /// Fails if a payload does not decode or disagrees with the event it
    /// carries about aggregate or sequence.
    pub async fn read_event_stream<C>(
        &self,
        aggregate_id: impl Into<Uuid>,
    ) -> SourcingResult<Vec<RecordedEvent<C>>>
    where
        C: ChangeKind,
        Z: ChangeEventSerializer<C>,
    {
        let aggregate_id = aggregate_id.into();
        let payloads = self.store.read(aggregate_id).await?;

        let events = payloads
            .iter()
            .map(|payload| {
                let event = self
                    .serializer
                    .deserialize(&payload.event_type, &payload.serialized_payload)?;
                if event.aggregate_id() != payload.aggregate_id
                    || event.sequence_number() != payload.sequence_number
                {
                    return Err(SourcingError::Deserialization(format!(
                        "payload for aggregate {} does not match the event it carries",
                        payload.aggregate_id
                    )));
                }
                Ok(event)
            })
            .collect::<SourcingResult<Vec<_>>>()?;

        debug!("Read {} events for aggregate {}", events.len(), aggregate_id);
        Ok(events)
    }

    /// Read and rehydrate an aggregate
    pub async fn load<A, F>(&self, make_shell: F, aggregate_id: AggregateId<A>) -> SourcingResult<A>
    where
        A: EventSourced,
        F: FnOnce(AggregateId<A>) -> A,
        Z: ChangeEventSerializer<A::Change>,
    {
        let history = self.read_event_stream::<A::Change>(aggregate_id).await?;
        Ok(A::rehydrate(make_shell, history)?)
    }
}
