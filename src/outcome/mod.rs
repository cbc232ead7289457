// Copyright (c) 2025 - Cowboy AI, Inc.
//! Outcome Algebra
//!
//! A closed success/failure value with exhaustive, composable and
//! fault-absorbing transformations.
//!
//! - [`Outcome`]: `Success(S)` or `Failure(FailureDetails)`
//! - [`ChangeOutcome`] / [`CommandOutcome`]: flavors with identical semantics
//! - [`Resolve`]: the shared algebra (`resolve`, `then`, `map`, `and`, ...)
//!
//! ```
//! use cim_event_sourcing::outcome::{Outcome, Resolve};
//!
//! let total = Outcome::success(2)
//!     .then(|n| Outcome::success(n * 21))
//!     .resolve(|n| n, |_| 0);
//!
//! assert_eq!(total, 42);
//! ```

mod append;
mod failure;
mod flavors;
mod resolve;

pub use append::Append;
pub use failure::{FailureDetails, Fault, PanicFault, NO_UNDERLYING_CAUSE, UNSPECIFIED_FAILURE};
pub use flavors::{ChangeOutcome, CommandOutcome, CommandStatus};
pub use resolve::Resolve;

/// Success value or failure details, never both
#[must_use = "an outcome may be a failure that must be handled"]
#[derive(Debug, Clone)]
pub enum Outcome<S> {
    /// Operation succeeded
    Success(S),
    /// Operation failed
    Failure(FailureDetails),
}

impl<S> Outcome<S> {
    /// Successful outcome
    pub fn success(value: S) -> Self {
        Self::Success(value)
    }

    /// Failed outcome with a single reason
    pub fn fail(reason: impl Into<String>) -> Self {
        Self::Failure(FailureDetails::new(reason))
    }

    /// Failed outcome with an ordered list of reasons
    pub fn fail_with<I, R>(reasons: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self::Failure(FailureDetails::from_reasons(reasons))
    }

    /// Failed outcome from existing details
    pub fn from_details(details: FailureDetails) -> Self {
        Self::Failure(details)
    }

    /// Failed outcome caused by a fault
    pub fn from_fault(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(FailureDetails::from_fault(error))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The success value, if any
    pub fn success_value(&self) -> Option<&S> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure details, if any
    pub fn failure_details(&self) -> Option<&FailureDetails> {
        match self {
            Self::Success(_) => None,
            Self::Failure(details) => Some(details),
        }
    }

    /// Convert into a standard `Result` for use with `?`
    pub fn into_result(self) -> Result<S, FailureDetails> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(details) => Err(details),
        }
    }
}

impl<S, E> From<Result<S, E>> for Outcome<S>
where
    E: Into<anyhow::Error>,
{
    fn from(result: Result<S, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::from_fault(error),
        }
    }
}

impl<S> Resolve for Outcome<S> {
    type Success = S;
    type Flavor<T> = Outcome<T>;

    fn from_outcome(outcome: Outcome<S>) -> Self {
        outcome
    }

    fn into_outcome(self) -> Outcome<S> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_inspection() {
        let outcome = Outcome::success(7);

        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.success_value(), Some(&7));
        assert!(outcome.failure_details().is_none());
    }

    #[test]
    fn test_failure_inspection() {
        let outcome: Outcome<i32> = Outcome::fail_with(["a", "b"]);

        assert!(outcome.is_failure());
        assert!(outcome.success_value().is_none());
        assert_eq!(outcome.failure_details().unwrap().reasons().len(), 2);
    }

    #[test]
    fn test_from_std_result() {
        let ok: Outcome<u8> = Outcome::from(Ok::<u8, std::io::Error>(1));
        let err: Outcome<u8> = Outcome::from(Err::<u8, _>(std::io::Error::new(
            std::io::ErrorKind::Other,
            "io down",
        )));

        assert_eq!(ok.into_result().unwrap(), 1);
        let details = err.into_result().unwrap_err();
        assert_eq!(details.reasons()[0], "io down");
        assert!(details.cause().unwrap().is::<std::io::Error>());
    }
}
