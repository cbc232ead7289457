// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event store configuration

use tracing::warn;

use crate::event_store::ChangeEventPayload;

/// Environment variable toggling the optimistic append check
pub const ENFORCE_SEQUENCE_VAR: &str = "CIM_EVENT_STORE_ENFORCE_SEQUENCE";

/// Environment variable naming the payload version a store accepts
pub const PAYLOAD_VERSION_VAR: &str = "CIM_EVENT_STORE_PAYLOAD_VERSION";

/// Configuration for [`InMemoryEventStore`](crate::event_store::InMemoryEventStore)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStoreConfig {
    /// Reject writes whose sequence is not the stream's last + 1
    pub enforce_sequence: bool,
    /// Payload schema version accepted on write
    pub payload_version: u32,
}

impl Default for EventStoreConfig {
    fn default() -> Self {
        Self {
            enforce_sequence: true,
            payload_version: ChangeEventPayload::VERSION,
        }
    }
}

impl EventStoreConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let enforce_sequence = lookup(ENFORCE_SEQUENCE_VAR)
            .map(|raw| match parse_flag(&raw) {
                Some(flag) => flag,
                None => {
                    warn!("Ignoring {}={}: expected a boolean", ENFORCE_SEQUENCE_VAR, raw);
                    defaults.enforce_sequence
                }
            })
            .unwrap_or(defaults.enforce_sequence);

        let payload_version = lookup(PAYLOAD_VERSION_VAR)
            .map(|raw| {
                raw.trim().parse().unwrap_or_else(|_| {
                    warn!("Ignoring {}={}: expected a version number", PAYLOAD_VERSION_VAR, raw);
                    defaults.payload_version
                })
            })
            .unwrap_or(defaults.payload_version);

        Self {
            enforce_sequence,
            payload_version,
        }
    }

    pub fn with_enforce_sequence(mut self, enforce_sequence: bool) -> Self {
        self.enforce_sequence = enforce_sequence;
        self
    }

    pub fn with_payload_version(mut self, payload_version: u32) -> Self {
        self.payload_version = payload_version;
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
