// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory event store
//!
//! Keeps each aggregate's stream as JSON-encoded payloads behind a tokio
//! `RwLock`, so reads and writes exercise the same encode/decode path a
//! persistent store would.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{ChangeEventPayload, EventStore};
use crate::config::EventStoreConfig;
use crate::errors::{SourcingError, SourcingResult};
use crate::events::SequenceNumber;

#[derive(Debug, Default)]
struct Stream {
    last_sequence: Option<SequenceNumber>,
    entries: Vec<String>,
}

/// Process-local [`EventStore`]
#[derive(Debug)]
pub struct InMemoryEventStore {
    config: EventStoreConfig,
    streams: RwLock<HashMap<Uuid, Stream>>,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::with_config(EventStoreConfig::default())
    }

    pub fn with_config(config: EventStoreConfig) -> Self {
        info!(
            "In-memory event store ready (enforce_sequence: {}, payload_version: {})",
            config.enforce_sequence, config.payload_version
        );
        Self {
            config,
            streams: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &EventStoreConfig {
        &self.config
    }

    /// Number of payloads stored for an aggregate
    pub async fn stream_len(&self, aggregate_id: Uuid) -> usize {
        self.streams
            .read()
            .await
            .get(&aggregate_id)
            .map_or(0, |stream| stream.entries.len())
    }

    fn check_append(
        &self,
        stream: Option<&Stream>,
        payload: &ChangeEventPayload,
    ) -> SourcingResult<()> {
        if payload.version != self.config.payload_version {
            return Err(SourcingError::Storage(format!(
                "unsupported payload version {} (store accepts {})",
                payload.version, self.config.payload_version
            )));
        }

        if !self.config.enforce_sequence {
            return Ok(());
        }

        let expected = stream
            .and_then(|s| s.last_sequence)
            .map_or(SequenceNumber::FIRST, SequenceNumber::next);
        if payload.sequence_number != Some(expected) {
            return Err(SourcingError::Concurrency(format!(
                "aggregate {} expected sequence {} but got {}",
                payload.aggregate_id,
                expected,
                payload
                    .sequence_number
                    .map_or_else(|| "none".to_string(), |s| s.to_string())
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn write(&self, payload: ChangeEventPayload) -> SourcingResult<()> {
        let encoded = serde_json::to_string(&payload)?;
        let mut streams = self.streams.write().await;

        if let Err(error) = self.check_append(streams.get(&payload.aggregate_id), &payload) {
            warn!("Rejected write of {}: {}", payload.event_type, error);
            return Err(error);
        }

        let stream = streams.entry(payload.aggregate_id).or_default();
        stream.entries.push(encoded);
        if payload.sequence_number > stream.last_sequence {
            stream.last_sequence = payload.sequence_number;
        }

        debug!(
            "Stored {} for aggregate {} ({} events)",
            payload.event_type,
            payload.aggregate_id,
            stream.entries.len()
        );
        Ok(())
    }

    async fn read(&self, aggregate_id: Uuid) -> SourcingResult<Vec<ChangeEventPayload>> {
        let streams = self.streams.read().await;
        let Some(stream) = streams.get(&aggregate_id) else {
            return Ok(Vec::new());
        };

        let mut payloads = stream
            .entries
            .iter()
            .map(|entry| {
                serde_json::from_str::<ChangeEventPayload>(entry)
                    .map_err(|e| SourcingError::Deserialization(e.to_string()))
            })
            .collect::<SourcingResult<Vec<_>>>()?;
        payloads.sort_by_key(|payload| payload.sequence_number);

        Ok(payloads)
    }
}
