//! Error types for event sourcing operations
//!
//! Domain failures (a change refused by business rules) are not errors in
//! this sense; they travel as [`FailureDetails`](crate::outcome::FailureDetails)
//! inside an [`Outcome`](crate::outcome::Outcome). The types here cover
//! corrupt histories and the storage plumbing.

use thiserror::Error;

use crate::aggregate::SequenceViolation;
use crate::events::{EventType, SequenceNumber};

/// A stored history that cannot be trusted
///
/// Fatal to the rehydration that found it; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The history failed sequence analysis
    #[error("invalid event history: {}", join(.0))]
    InvalidHistory(Vec<SequenceViolation>),

    /// A stored change was refused by the aggregate while replaying
    #[error("stored change at sequence {sequence} was rejected during replay: {}", .reasons.join("; "))]
    ReplayRejected {
        sequence: SequenceNumber,
        reasons: Vec<String>,
    },
}

impl InvariantViolation {
    /// Sequence violations, empty for a replay rejection
    pub fn violations(&self) -> &[SequenceViolation] {
        match self {
            Self::InvalidHistory(violations) => violations,
            Self::ReplayRejected { .. } => &[],
        }
    }
}

fn join(violations: &[SequenceViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur while storing, loading or publishing events
#[derive(Debug, Error)]
pub enum SourcingError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// No decoder registered for a stored tag, or no tag for a change
    #[error("Unknown event type: {0}")]
    UnknownEventType(EventType),

    /// Optimistic append check failed
    #[error("Concurrency conflict: {0}")]
    Concurrency(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Publisher error
    #[error("Publish error: {0}")]
    Publish(String),

    /// Loaded history is corrupt
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Result type for event sourcing operations
pub type SourcingResult<T> = Result<T, SourcingError>;

impl From<serde_json::Error> for SourcingError {
    fn from(err: serde_json::Error) -> Self {
        SourcingError::Serialization(err.to_string())
    }
}
