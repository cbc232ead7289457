// Copyright (c) 2025 - Cowboy AI, Inc.
//! The shared outcome algebra
//!
//! Every combinator is written in terms of [`Resolve::resolve`], which is
//! the single place where a panicking continuation is turned into a
//! failure. Nothing retries.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;

use super::{Append, FailureDetails, Outcome};

/// Exhaustive handling of a success/failure value
///
/// Implementors only supply the conversion to and from [`Outcome`]; the
/// algebra comes for free. `Flavor<T>` is the same wrapper over another
/// success type, so `map` on a `ChangeOutcome` stays a `ChangeOutcome`.
pub trait Resolve: Sized {
    /// Type carried on success
    type Success;

    /// This flavor over another success type
    type Flavor<T>: Resolve<Success = T>;

    fn from_outcome(outcome: Outcome<Self::Success>) -> Self;

    fn into_outcome(self) -> Outcome<Self::Success>;

    /// Call exactly one branch
    ///
    /// A panic raised by `on_success` is caught and routed into
    /// `on_failure` as a [`PanicFault`](super::PanicFault). Panics raised
    /// by `on_failure` propagate.
    fn resolve<R, F, G>(self, on_success: F, on_failure: G) -> R
    where
        F: FnOnce(Self::Success) -> R,
        G: FnOnce(FailureDetails) -> R,
    {
        match self.into_outcome() {
            Outcome::Failure(details) => on_failure(details),
            Outcome::Success(value) => {
                match panic::catch_unwind(AssertUnwindSafe(move || on_success(value))) {
                    Ok(resolved) => resolved,
                    Err(payload) => on_failure(FailureDetails::from_panic(payload)),
                }
            }
        }
    }

    /// Bind into any flavor; failures short-circuit untouched
    fn then<R, F>(self, f: F) -> R
    where
        R: Resolve,
        F: FnOnce(Self::Success) -> R,
    {
        self.resolve(f, |details| R::from_outcome(Outcome::Failure(details)))
    }

    fn map<T, F>(self, f: F) -> Self::Flavor<T>
    where
        F: FnOnce(Self::Success) -> T,
    {
        self.resolve(
            |value| lift::<Self::Flavor<T>>(Outcome::Success(f(value))),
            |details| lift::<Self::Flavor<T>>(Outcome::Failure(details)),
        )
    }

    /// Map with a fallible function; an `Err` becomes the failure's cause
    fn try_map<T, E, F>(self, f: F) -> Self::Flavor<T>
    where
        E: Into<anyhow::Error>,
        F: FnOnce(Self::Success) -> Result<T, E>,
    {
        self.then(|value| lift::<Self::Flavor<T>>(Outcome::from(f(value))))
    }

    /// Pair the success value with the success of a dependent outcome
    fn and<R, F>(self, f: F) -> Self::Flavor<(Self::Success, R::Success)>
    where
        R: Resolve,
        F: FnOnce(&Self::Success) -> R,
    {
        self.then(|value| {
            let next = f(&value).into_outcome();
            lift::<Self::Flavor<(Self::Success, R::Success)>>(match next {
                Outcome::Success(next) => Outcome::Success((value, next)),
                Outcome::Failure(details) => Outcome::Failure(details),
            })
        })
    }

    fn and_value<T, F>(self, f: F) -> Self::Flavor<(Self::Success, T)>
    where
        F: FnOnce(&Self::Success) -> T,
    {
        self.map(|value| {
            let next = f(&value);
            (value, next)
        })
    }

    /// Grow an accumulated tuple by the success of a dependent outcome
    fn append<R, F>(self, f: F) -> Self::Flavor<<Self::Success as Append<R::Success>>::Output>
    where
        R: Resolve,
        F: FnOnce(&Self::Success) -> R,
        Self::Success: Append<R::Success>,
    {
        self.then(|values| {
            let next = f(&values).into_outcome();
            lift::<Self::Flavor<<Self::Success as Append<R::Success>>::Output>>(match next {
                Outcome::Success(next) => Outcome::Success(values.append(next)),
                Outcome::Failure(details) => Outcome::Failure(details),
            })
        })
    }

    fn append_value<T, F>(self, f: F) -> Self::Flavor<<Self::Success as Append<T>>::Output>
    where
        F: FnOnce(&Self::Success) -> T,
        Self::Success: Append<T>,
    {
        self.map(|values| {
            let next = f(&values);
            values.append(next)
        })
    }

    /// Observe a failure without changing it
    fn inspect_failure<F>(self, f: F) -> Self
    where
        F: FnOnce(&FailureDetails),
    {
        match self.into_outcome() {
            Outcome::Failure(details) => {
                f(&details);
                Self::from_outcome(Outcome::Failure(details))
            }
            success => Self::from_outcome(success),
        }
    }

    /// Async [`resolve`](Resolve::resolve)
    ///
    /// The success future is polled under `catch_unwind`, so a panic while
    /// building or awaiting it is routed into `on_failure`.
    fn resolve_async<R, F, FutS, G, FutF>(
        self,
        on_success: F,
        on_failure: G,
    ) -> impl Future<Output = R>
    where
        F: FnOnce(Self::Success) -> FutS,
        FutS: Future<Output = R>,
        G: FnOnce(FailureDetails) -> FutF,
        FutF: Future<Output = R>,
    {
        async move {
            match self.into_outcome() {
                Outcome::Failure(details) => on_failure(details).await,
                Outcome::Success(value) => {
                    let caught = AssertUnwindSafe(async move { on_success(value).await })
                        .catch_unwind()
                        .await;
                    match caught {
                        Ok(resolved) => resolved,
                        Err(payload) => on_failure(FailureDetails::from_panic(payload)).await,
                    }
                }
            }
        }
    }

    fn then_async<R, F, Fut>(self, f: F) -> impl Future<Output = R>
    where
        R: Resolve,
        F: FnOnce(Self::Success) -> Fut,
        Fut: Future<Output = R>,
    {
        self.resolve_async(f, |details| async move {
            R::from_outcome(Outcome::Failure(details))
        })
    }

    fn map_async<T, F, Fut>(self, f: F) -> impl Future<Output = Self::Flavor<T>>
    where
        F: FnOnce(Self::Success) -> Fut,
        Fut: Future<Output = T>,
    {
        self.resolve_async(
            move |value| async move { lift::<Self::Flavor<T>>(Outcome::Success(f(value).await)) },
            |details| async move { lift::<Self::Flavor<T>>(Outcome::Failure(details)) },
        )
    }

    fn and_async<R, F, Fut>(
        self,
        f: F,
    ) -> impl Future<Output = Self::Flavor<(Self::Success, R::Success)>>
    where
        R: Resolve,
        F: FnOnce(&Self::Success) -> Fut,
        Fut: Future<Output = R>,
    {
        self.then_async(move |value| async move {
            let next = f(&value).await.into_outcome();
            lift::<Self::Flavor<(Self::Success, R::Success)>>(match next {
                Outcome::Success(next) => Outcome::Success((value, next)),
                Outcome::Failure(details) => Outcome::Failure(details),
            })
        })
    }
}

fn lift<R: Resolve>(outcome: Outcome<R::Success>) -> R {
    R::from_outcome(outcome)
}
