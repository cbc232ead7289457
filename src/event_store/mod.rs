// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Store Abstraction
//!
//! This module defines the storage boundary for change events and one
//! in-process implementation of every piece, so the full
//! write → read → rehydrate flow can run without a backend.
//!
//! # Architecture
//!
//! ```text
//! Aggregate ──raised events──▶ AggregateEventStreamWriter ──payloads──▶ EventStore
//!                                   │ ChangeEventSerializer
//!                                   │ ChangeEventTypeMap
//! Aggregate ◀──rehydrate── AggregateEventStreamReader ◀──payloads───────┘
//! ```
//!
//! # Event Store Requirements
//!
//! 1. **Append-Only**: Payloads are never updated or deleted
//! 2. **Ordered**: `read` returns an aggregate's payloads by sequence
//! 3. **Tagged**: Every payload carries the [`EventType`] used to decode it
//! 4. **Versioned**: Every payload carries a schema version
//!
//! # Example
//!
//! ```rust,ignore
//! let store = Arc::new(InMemoryEventStore::new());
//! let serializer = JsonChangeEventSerializer::new(type_map);
//!
//! let writer = AggregateEventStreamWriter::new(store.clone(), serializer.clone());
//! writer.write_to_stream(&aggregate).await?;
//!
//! let reader = AggregateEventStreamReader::new(store, serializer);
//! let restored = reader.load(MyAggregate::shell, aggregate.id()).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SourcingResult;
use crate::events::{EventType, SequenceNumber};

pub mod memory;
pub mod serializer;
pub mod stream;
pub mod type_map;

pub use memory::InMemoryEventStore;
pub use serializer::{ChangeEventSerializer, JsonChangeEventSerializer};
pub use stream::{AggregateEventStreamReader, AggregateEventStreamWriter};
pub use type_map::ChangeEventTypeMap;

/// Storage unit for one change event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEventPayload {
    /// Aggregate the event belongs to
    pub aggregate_id: Uuid,

    /// Tag used to pick the decoder on read
    pub event_type: EventType,

    /// Position within the aggregate's history
    pub sequence_number: Option<SequenceNumber>,

    /// Serialized event
    pub serialized_payload: String,

    /// Payload schema version
    pub version: u32,
}

impl ChangeEventPayload {
    /// Current payload schema version
    pub const VERSION: u32 = 1;

    pub fn new(
        aggregate_id: Uuid,
        event_type: EventType,
        sequence_number: Option<SequenceNumber>,
        serialized_payload: String,
    ) -> Self {
        Self {
            aggregate_id,
            event_type,
            sequence_number,
            serialized_payload,
            version: Self::VERSION,
        }
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }
}

/// Event Store trait for persisting and retrieving change events
///
/// Implementations should ensure:
///
/// - **Ordering**: `read` returns payloads by ascending sequence
/// - **Isolation**: a write either lands completely or not at all
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append one payload to its aggregate's stream
    ///
    /// # Errors
    ///
    /// - `Concurrency` if the store enforces sequencing and the payload is
    ///   not the stream's next event
    /// - `Storage` if the payload cannot be stored
    async fn write(&self, payload: ChangeEventPayload) -> SourcingResult<()>;

    /// Read every payload of an aggregate, ordered by sequence
    ///
    /// An unknown aggregate yields an empty stream.
    async fn read(&self, aggregate_id: Uuid) -> SourcingResult<Vec<ChangeEventPayload>>;
}
