// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pending-event buffer

use std::collections::HashSet;

use uuid::Uuid;

use crate::events::Identified;

/// Insertion-ordered buffer of raised events, deduplicated by event id
#[derive(Debug, Clone)]
pub struct DomainEventAggregator<E> {
    events: Vec<E>,
    seen: HashSet<Uuid>,
}

impl<E> Default for DomainEventAggregator<E> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<E: Identified> DomainEventAggregator<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer an event; `false` if an event with the same id is already held
    pub fn add(&mut self, event: E) -> bool {
        if !self.seen.insert(event.event_id()) {
            return false;
        }
        self.events.push(event);
        true
    }

    pub fn contains(&self, event_id: Uuid) -> bool {
        self.seen.contains(&event_id)
    }

    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.seen.clear();
    }

    /// Drain the buffer, returning events in insertion order
    pub fn take(&mut self) -> Vec<E> {
        self.seen.clear();
        std::mem::take(&mut self.events)
    }
}
