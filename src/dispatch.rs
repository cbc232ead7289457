// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain event dispatch
//!
//! Hands an aggregate's raised events to a publisher once they have been
//! persisted. The buffer is drained before publishing, so each event is
//! handed over at most once even if a publish fails midway.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::aggregate::EventSourced;
use crate::errors::SourcingResult;
use crate::events::{ChangeKind, SequencedEvent};

/// Destination for accepted change events
#[async_trait]
pub trait EventPublisher<C: ChangeKind>: Send + Sync {
    async fn publish(&self, event: &SequencedEvent<C>) -> SourcingResult<()>;
}

/// Drains aggregates' raised events into an [`EventPublisher`]
#[derive(Debug, Clone)]
pub struct DomainEventDispatcher<P> {
    publisher: P,
}

impl<P> DomainEventDispatcher<P> {
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Take the aggregate's raised events and publish each in order
    ///
    /// Returns how many were published. On a publish error the remaining
    /// events are dropped with the buffer.
    pub async fn dispatch_and_clear<A>(&self, aggregate: &mut A) -> SourcingResult<usize>
    where
        A: EventSourced,
        P: EventPublisher<A::Change>,
    {
        let events = aggregate.take_events();

        for (published, event) in events.iter().enumerate() {
            if let Err(error) = self.publisher.publish(event).await {
                warn!(
                    "Publishing stopped after {} of {} events for aggregate {}: {}",
                    published,
                    events.len(),
                    event.aggregate_id(),
                    error
                );
                return Err(error);
            }
        }

        debug!("Dispatched {} events", events.len());
        Ok(events.len())
    }

    /// Dispatch and clear several aggregates in turn
    ///
    /// Stops at the first publish error. Aggregates after the failing one
    /// keep their buffers.
    pub async fn dispatch_and_clear_all<'a, A, I>(&self, aggregates: I) -> SourcingResult<usize>
    where
        A: EventSourced + 'a,
        I: IntoIterator<Item = &'a mut A>,
        P: EventPublisher<A::Change>,
    {
        let mut total = 0;
        for aggregate in aggregates {
            total += self.dispatch_and_clear(aggregate).await?;
        }
        Ok(total)
    }
}
