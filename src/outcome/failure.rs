// Copyright (c) 2025 - Cowboy AI, Inc.
//! Failure Details
//!
//! Immutable bundle of human-readable failure reasons plus an optional
//! captured fault. Every failed [`Outcome`](super::Outcome) carries one.
//!
//! Faults are stored as `anyhow::Error` behind an `Arc`, so cloning a
//! `FailureDetails` never duplicates or shares mutable state.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Reason recorded when a failure is built from an empty reason list
pub const UNSPECIFIED_FAILURE: &str = "unspecified failure";

/// Second reason recorded for a fault that has no source
pub const NO_UNDERLYING_CAUSE: &str = "no underlying cause";

/// A continuation panicked while an outcome was being resolved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("continuation panicked: {message}")]
pub struct PanicFault {
    /// Panic message, when the payload was a string
    pub message: String,
}

impl PanicFault {
    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };

        Self { message }
    }
}

/// A captured fault (error or panic) attached to a failure
#[derive(Clone)]
pub struct Fault(Arc<anyhow::Error>);

impl Fault {
    /// Capture an error as a fault
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self(Arc::new(error.into()))
    }

    /// The underlying error
    pub fn error(&self) -> &anyhow::Error {
        &self.0
    }

    /// Attempt to view the fault as a concrete error type
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }

    /// Whether the fault is of the given concrete type
    pub fn is<E>(&self) -> bool
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.0.is::<E>()
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

/// Why an operation failed
///
/// # Invariants
/// - `reasons` is never empty
/// - never mutated after construction
#[derive(Debug, Clone)]
pub struct FailureDetails {
    reasons: Vec<String>,
    cause: Option<Fault>,
}

impl FailureDetails {
    /// Failure with a single reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reasons: vec![reason.into()],
            cause: None,
        }
    }

    /// Failure with an ordered list of reasons
    pub fn from_reasons<I, R>(reasons: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            reasons: non_empty(reasons.into_iter().map(Into::into).collect()),
            cause: None,
        }
    }

    /// Failure caused by a fault
    ///
    /// Records the fault's message and the message of its source (or
    /// [`NO_UNDERLYING_CAUSE`]) as the two reasons.
    pub fn from_fault(error: impl Into<anyhow::Error>) -> Self {
        let error = error.into();
        let reasons = vec![
            error.to_string(),
            error
                .chain()
                .nth(1)
                .map(ToString::to_string)
                .unwrap_or_else(|| NO_UNDERLYING_CAUSE.to_string()),
        ];

        Self {
            reasons,
            cause: Some(Fault(Arc::new(error))),
        }
    }

    /// Failure caused by a fault, described by explicit reasons
    pub fn from_fault_with_reasons<I, R>(error: impl Into<anyhow::Error>, reasons: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        let error = error.into();
        let mut reasons: Vec<String> = reasons.into_iter().map(Into::into).collect();
        if reasons.is_empty() {
            reasons.push(error.to_string());
        }

        Self {
            reasons,
            cause: Some(Fault(Arc::new(error))),
        }
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        Self::from_fault(PanicFault::from_payload(payload))
    }

    /// Ordered failure reasons
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// The captured fault, if the failure came from one
    pub fn cause(&self) -> Option<&Fault> {
        self.cause.as_ref()
    }

    /// Reasons joined into a single line
    pub fn message(&self) -> String {
        self.reasons.join("; ")
    }
}

fn non_empty(reasons: Vec<String>) -> Vec<String> {
    if reasons.is_empty() {
        vec![UNSPECIFIED_FAILURE.to_string()]
    } else {
        reasons
    }
}

impl fmt::Display for FailureDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for FailureDetails {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(|fault| {
            let error: &(dyn std::error::Error + Send + Sync + 'static) = fault.error().as_ref();
            error as &(dyn std::error::Error + 'static)
        })
    }
}
