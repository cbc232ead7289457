// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event-Sourced Aggregates
//!
//! An aggregate's state is a fold over its accepted change events. The
//! engine in this module owns the bookkeeping every aggregate shares:
//! sequencing, the pending-event buffer, and validated rehydration.
//!
//! # Mutation
//!
//! ```text
//! change ──▶ try_apply_change ──▶ handle_change ──▶ sequence += 1 ──▶ buffer
//!                  │                    │
//!                  └─ guard fails ──────┴─ handler fails ──▶ Failure (no effect)
//! ```
//!
//! # Rehydration
//!
//! ```text
//! stored events ──▶ sort ──▶ analyze_sequence ──▶ make_shell(creation id) ──▶ replay
//!                                   │
//!                                   └─ violations ──▶ InvariantViolation (fatal)
//! ```
//!
//! Replay never re-sequences, never buffers events and skips the
//! single-creation guard; the analysis has already enforced it.
//!
//! # Example
//!
//! ```rust
//! use cim_event_sourcing::aggregate::{AggregateId, EventSourced, EventSourcedRoot};
//! use cim_event_sourcing::events::{ChangeKind, EventHeader, EventType};
//! use cim_event_sourcing::outcome::Outcome;
//! use serde::Serialize;
//!
//! #[derive(Debug, Clone, Serialize)]
//! enum TallyChange {
//!     Opened,
//!     Counted,
//! }
//!
//! impl ChangeKind for TallyChange {
//!     fn event_type(&self) -> EventType {
//!         match self {
//!             Self::Opened => "tally_opened".into(),
//!             Self::Counted => "tally_counted".into(),
//!         }
//!     }
//!
//!     fn is_creation(&self) -> bool {
//!         matches!(self, Self::Opened)
//!     }
//! }
//!
//! struct Tally {
//!     root: EventSourcedRoot<TallyChange>,
//!     count: u32,
//! }
//!
//! impl EventSourced for Tally {
//!     type Change = TallyChange;
//!
//!     fn root(&self) -> &EventSourcedRoot<TallyChange> {
//!         &self.root
//!     }
//!
//!     fn root_mut(&mut self) -> &mut EventSourcedRoot<TallyChange> {
//!         &mut self.root
//!     }
//!
//!     fn handle_change(&mut self, change: &TallyChange, _: &EventHeader) -> Outcome<()> {
//!         if let TallyChange::Counted = change {
//!             self.count += 1;
//!         }
//!         Outcome::success(())
//!     }
//! }
//!
//! let mut tally = Tally { root: EventSourcedRoot::new(AggregateId::<Tally>::new()), count: 0 };
//! assert!(tally.try_change(TallyChange::Opened).is_success());
//! assert!(tally.try_change(TallyChange::Counted).is_success());
//! assert_eq!(tally.count, 1);
//! assert_eq!(tally.raised_events().len(), 2);
//! ```

pub mod aggregator;
pub mod analysis;
pub mod id;
pub mod root;

pub use aggregator::DomainEventAggregator;
pub use analysis::{analyze_sequence, SequenceAnalysis, SequenceViolation};
pub use id::AggregateId;
pub use root::{AggregateLifecycle, EventSourced, EventSourcedRoot, MULTIPLE_CREATION_EVENTS};
