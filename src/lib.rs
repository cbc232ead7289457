//! Event sourcing primitives for the Composable Information Machine
//!
//! This crate provides the outcome algebra used to compose domain
//! operations, the event-sourced aggregate engine, and the event stream
//! plumbing that persists and reloads aggregates.

pub mod aggregate;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod event_store;
pub mod events;
pub mod outcome;

// Re-export commonly used types
pub use aggregate::{AggregateId, EventSourced, EventSourcedRoot};
pub use errors::{InvariantViolation, SourcingError, SourcingResult};
pub use events::{ChangeEvent, ChangeKind, EventHeader, EventType, RecordedEvent, SequenceNumber, SequencedEvent};
pub use outcome::{ChangeOutcome, CommandOutcome, FailureDetails, Outcome, Resolve};
