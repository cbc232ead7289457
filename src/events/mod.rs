// Copyright (c) 2025 - Cowboy AI, Inc.
//! Change Events
//!
//! Change events are immutable facts emitted by an aggregate. They move
//! through three shapes:
//!
//! ```text
//! ChangeEvent ──(engine assigns sequence)──▶ SequencedEvent ──(store)──▶ RecordedEvent
//!  (proposed)                                 (accepted)                 (replayed)
//! ```
//!
//! # Event Sourcing Principles
//!
//! 1. **Events are immutable**: no setters, no re-sequencing
//! 2. **Sequencing happens once**: only the aggregate engine can turn a
//!    [`ChangeEvent`] into a [`SequencedEvent`]
//! 3. **Storage is untrusted**: a [`RecordedEvent`] may lack a sequence and
//!    is validated before replay
//! 4. **One closed enum per aggregate**: every change an aggregate can raise
//!    is a variant of a type implementing [`ChangeKind`]
//!
//! # Module Organization
//!
//! - [`sequence`] - Per-aggregate monotonic sequence numbers
//! - [`event_type`] - Storage tags for change variants
//! - [`change`] - Event envelopes and the [`ChangeKind`] contract

pub mod change;
pub mod event_type;
pub mod sequence;

pub use change::{ChangeEvent, ChangeKind, EventHeader, Identified, RecordedEvent, SequencedEvent};
pub use event_type::EventType;
pub use sequence::SequenceNumber;
