// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event type resolution
//!
//! Maps storage tags to decoders for an aggregate's change enum. Each tag
//! is registered with the payload type of its variant; decoding a tag
//! deserializes that payload and lifts it into the enum with `Into`.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{SourcingError, SourcingResult};
use crate::events::{ChangeKind, EventType};

type Decoder<C> = fn(Value) -> serde_json::Result<C>;

fn decode_as<T, C>(value: Value) -> serde_json::Result<C>
where
    T: DeserializeOwned + Into<C>,
{
    serde_json::from_value::<T>(value).map(Into::into)
}

/// Bidirectional tag ↔ variant mapping for a change enum
pub struct ChangeEventTypeMap<C> {
    decoders: HashMap<EventType, Decoder<C>>,
}

impl<C> Default for ChangeEventTypeMap<C> {
    fn default() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }
}

impl<C> Clone for ChangeEventTypeMap<C> {
    fn clone(&self) -> Self {
        Self {
            decoders: self.decoders.clone(),
        }
    }
}

impl<C> fmt::Debug for ChangeEventTypeMap<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&EventType> = self.decoders.keys().collect();
        tags.sort();
        f.debug_struct("ChangeEventTypeMap").field("tags", &tags).finish()
    }
}

impl<C: ChangeKind> ChangeEventTypeMap<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the payload type decoded for `event_type`
    pub fn with<T>(mut self, event_type: impl Into<EventType>) -> Self
    where
        T: DeserializeOwned + Into<C>,
    {
        self.register::<T>(event_type);
        self
    }

    pub fn register<T>(&mut self, event_type: impl Into<EventType>) -> &mut Self
    where
        T: DeserializeOwned + Into<C>,
    {
        self.decoders.insert(event_type.into(), decode_as::<T, C>);
        self
    }

    pub fn contains(&self, event_type: &EventType) -> bool {
        self.decoders.contains_key(event_type)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// The registered tag of a change
    pub fn event_type(&self, change: &C) -> SourcingResult<EventType> {
        let event_type = change.event_type();
        if self.contains(&event_type) {
            Ok(event_type)
        } else {
            Err(SourcingError::UnknownEventType(event_type))
        }
    }

    /// Decode a stored change by its tag
    pub fn decode(&self, event_type: &EventType, value: Value) -> SourcingResult<C> {
        let decode = self
            .decoders
            .get(event_type)
            .ok_or_else(|| SourcingError::UnknownEventType(event_type.clone()))?;

        let change = decode(value).map_err(|e| {
            SourcingError::Deserialization(format!("{}: {}", event_type, e))
        })?;

        if change.event_type() != *event_type {
            return Err(SourcingError::Deserialization(format!(
                "payload registered as {} decoded to {}",
                event_type,
                change.event_type()
            )));
        }

        Ok(change)
    }
}
