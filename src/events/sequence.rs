// Copyright (c) 2025 - Cowboy AI, Inc.
//! Per-aggregate sequence numbers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a change event within its aggregate's history
///
/// The first accepted change of an aggregate is [`SequenceNumber::FIRST`];
/// [`SequenceNumber::ZERO`] means nothing has been accepted yet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SequenceNumber(u64);

impl SequenceNumber {
    pub const ZERO: Self = Self(0);
    pub const FIRST: Self = Self(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for SequenceNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<SequenceNumber> for u64 {
    fn from(sequence: SequenceNumber) -> Self {
        sequence.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
