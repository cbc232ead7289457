// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event type tags
//!
//! The tag stored beside a serialized change, used to pick the decoder
//! when the change is read back.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(String);

impl EventType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventType {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for EventType {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
