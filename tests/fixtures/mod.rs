// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-event-sourcing
//!
//! Provides a small `Counter` aggregate plus deterministic ids and
//! timestamps shared by the integration suites.
//!
//! # Design Principles
//! - Aggregate and timestamps are fixed constants where the engine allows it
//! - Event ids of ordinary changes are generated by the engine and are not
//!   asserted on directly
//! - Fixtures are the only place that defines the test domain

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use cim_event_sourcing::aggregate::{AggregateId, EventSourced, EventSourcedRoot};
use cim_event_sourcing::dispatch::EventPublisher;
use cim_event_sourcing::event_store::{ChangeEventTypeMap, JsonChangeEventSerializer};
use cim_event_sourcing::events::{ChangeEvent, ChangeKind, EventHeader, EventType, SequencedEvent};
use cim_event_sourcing::outcome::{Outcome, Resolve};
use cim_event_sourcing::{SourcingError, SourcingResult};

// Fixed test UUIDs (UUID v7 format, but deterministic for testing)
pub const COUNTER_ID_1: &str = "01934f4a-1000-7000-8000-000000001000";
pub const COUNTER_ID_2: &str = "01934f4a-2000-7000-8000-000000002000";

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

pub const COUNTER_CREATED: &str = "counter_created";
pub const NUMBER_INCREMENTED: &str = "number_incremented";

/// Parse a fixed UUID from a constant string
pub fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid UUID in test fixture")
}

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

pub fn counter_id() -> AggregateId<Counter> {
    AggregateId::from_uuid(parse_uuid(COUNTER_ID_1))
}

pub fn other_counter_id() -> AggregateId<Counter> {
    AggregateId::from_uuid(parse_uuid(COUNTER_ID_2))
}

/// Route engine logs to the test writer; honours RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Counter aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterCreated {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberIncremented {
    pub by: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CounterChange {
    Created(CounterCreated),
    Incremented(NumberIncremented),
}

impl From<CounterCreated> for CounterChange {
    fn from(e: CounterCreated) -> Self {
        Self::Created(e)
    }
}

impl From<NumberIncremented> for CounterChange {
    fn from(e: NumberIncremented) -> Self {
        Self::Incremented(e)
    }
}

impl ChangeKind for CounterChange {
    fn event_type(&self) -> EventType {
        match self {
            Self::Created(_) => COUNTER_CREATED.into(),
            Self::Incremented(_) => NUMBER_INCREMENTED.into(),
        }
    }

    fn is_creation(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

#[derive(Debug)]
pub struct Counter {
    root: EventSourcedRoot<CounterChange>,
    label: String,
    number: i64,
    applied: Vec<i64>,
}

impl Counter {
    /// Empty aggregate ready for replay
    pub fn shell(id: AggregateId<Counter>) -> Self {
        Self {
            root: EventSourcedRoot::new(id),
            label: String::new(),
            number: 0,
            applied: Vec::new(),
        }
    }

    pub fn create(id: AggregateId<Counter>, label: &str) -> Outcome<Counter> {
        let mut counter = Self::shell(id);
        let created = counter
            .apply(CounterChange::Created(CounterCreated {
                label: label.to_string(),
            }))
            .map(|_| ());
        created.map(move |()| counter)
    }

    pub fn increment(&mut self, by: i64) -> Outcome<&mut Self> {
        if by == 0 {
            return Outcome::fail("increment must not be zero");
        }
        self.apply(CounterChange::Incremented(NumberIncremented { by }))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    /// Increments in the order they were folded in
    pub fn applied(&self) -> &[i64] {
        &self.applied
    }

    fn apply(&mut self, change: CounterChange) -> Outcome<&mut Self> {
        let event = ChangeEvent::at(self.root.id(), change, fixed_timestamp());
        self.try_apply_change(event)
    }
}

impl EventSourced for Counter {
    type Change = CounterChange;

    fn root(&self) -> &EventSourcedRoot<CounterChange> {
        &self.root
    }

    fn root_mut(&mut self) -> &mut EventSourcedRoot<CounterChange> {
        &mut self.root
    }

    fn handle_change(&mut self, change: &CounterChange, _header: &EventHeader) -> Outcome<()> {
        match change {
            CounterChange::Created(created) => {
                self.label = created.label.clone();
                Outcome::success(())
            }
            CounterChange::Incremented(incremented) => match self.number.checked_add(incremented.by) {
                Some(number) => {
                    self.number = number;
                    self.applied.push(incremented.by);
                    Outcome::success(())
                }
                None => Outcome::fail("counter overflow"),
            },
        }
    }
}

pub fn counter_type_map() -> ChangeEventTypeMap<CounterChange> {
    ChangeEventTypeMap::new()
        .with::<CounterCreated>(COUNTER_CREATED)
        .with::<NumberIncremented>(NUMBER_INCREMENTED)
}

pub fn counter_serializer() -> JsonChangeEventSerializer<CounterChange> {
    JsonChangeEventSerializer::new(counter_type_map())
}

/// A counter created with the fixed id and incremented `increments` times by 1
pub fn counter_with_increments(increments: usize) -> Counter {
    let mut counter = Counter::create(counter_id(), "visits")
        .into_result()
        .expect("counter creation failed");
    for _ in 0..increments {
        assert!(counter.increment(1).is_success());
    }
    counter
}

// ============================================================================
// Publisher
// ============================================================================

/// Publisher that records event ids, optionally failing at a given position
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<Uuid>>,
    fail_at: Option<usize>,
}

impl RecordingPublisher {
    pub fn failing_at(position: usize) -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail_at: Some(position),
        }
    }

    pub async fn published(&self) -> Vec<Uuid> {
        self.published.lock().await.clone()
    }
}

#[async_trait]
impl EventPublisher<CounterChange> for RecordingPublisher {
    async fn publish(&self, event: &SequencedEvent<CounterChange>) -> SourcingResult<()> {
        let mut published = self.published.lock().await;
        if Some(published.len()) == self.fail_at {
            return Err(SourcingError::Publish("broker unavailable".to_string()));
        }
        published.push(event.event_id());
        Ok(())
    }
}
