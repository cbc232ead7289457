// Copyright (c) 2025 - Cowboy AI, Inc.
//! Outcome flavors
//!
//! `ChangeOutcome` reports the result of applying a change to an aggregate,
//! `CommandOutcome` the result of handling a command. Both have exactly the
//! semantics of [`Outcome`]; the distinct types only document intent at
//! API boundaries.

use serde::{Deserialize, Serialize};

use super::{FailureDetails, Outcome, Resolve};

macro_rules! outcome_flavor {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[must_use = "an outcome may be a failure that must be handled"]
        #[derive(Debug, Clone)]
        pub struct $name<S>(Outcome<S>);

        impl<S> $name<S> {
            pub fn success(value: S) -> Self {
                Self(Outcome::Success(value))
            }

            pub fn fail(reason: impl Into<String>) -> Self {
                Self(Outcome::fail(reason))
            }

            pub fn fail_with<I, R>(reasons: I) -> Self
            where
                I: IntoIterator<Item = R>,
                R: Into<String>,
            {
                Self(Outcome::fail_with(reasons))
            }

            pub fn from_details(details: FailureDetails) -> Self {
                Self(Outcome::Failure(details))
            }

            pub fn is_success(&self) -> bool {
                self.0.is_success()
            }

            pub fn is_failure(&self) -> bool {
                self.0.is_failure()
            }

            pub fn as_outcome(&self) -> &Outcome<S> {
                &self.0
            }

            pub fn into_result(self) -> Result<S, FailureDetails> {
                self.0.into_result()
            }
        }

        impl<S> Resolve for $name<S> {
            type Success = S;
            type Flavor<T> = $name<T>;

            fn from_outcome(outcome: Outcome<S>) -> Self {
                Self(outcome)
            }

            fn into_outcome(self) -> Outcome<S> {
                self.0
            }
        }

        impl<S> From<Outcome<S>> for $name<S> {
            fn from(outcome: Outcome<S>) -> Self {
                Self(outcome)
            }
        }

        impl<S> From<$name<S>> for Outcome<S> {
            fn from(flavor: $name<S>) -> Self {
                flavor.0
            }
        }
    };
}

outcome_flavor!(
    /// Outcome of applying a change to an aggregate
    ChangeOutcome
);

outcome_flavor!(
    /// Outcome of handling a command
    CommandOutcome
);

/// Coarse status reported back to a command sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandStatus {
    Succeeded,
    Failed,
}

impl<S> CommandOutcome<S> {
    pub fn status(&self) -> CommandStatus {
        if self.is_success() {
            CommandStatus::Succeeded
        } else {
            CommandStatus::Failed
        }
    }

    /// Failure reasons, empty on success
    pub fn errors(&self) -> &[String] {
        self.0
            .failure_details()
            .map(FailureDetails::reasons)
            .unwrap_or_default()
    }
}
