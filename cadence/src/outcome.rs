// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! What a fire-and-forget target is allowed to return, and where its
//! failures go.
//!
//! `debounce` and `throttle` discard the target's value. A target may still
//! return `Result<_, E>`; the error (or a caught panic) is handed to the
//! wrapper's error handler when one is configured, and logged otherwise.

use cadence_error::{CadenceError, IntoCadenceError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Callback receiving failures of a fire-and-forget target.
pub type ErrorHandler = Arc<dyn Fn(CadenceError) + Send + Sync>;

/// Type-erased fire-and-forget target; returns the failure, if any.
pub(crate) type Target<A> = Arc<dyn Fn(A) -> Option<CadenceError> + Send + Sync>;

/// Return types accepted from a fire-and-forget target.
pub trait Outcome {
    /// The failure carried by this outcome, if any.
    fn into_failure(self) -> Option<CadenceError>;
}

impl Outcome for () {
    fn into_failure(self) -> Option<CadenceError> {
        None
    }
}

impl<T, E> Outcome for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_failure(self) -> Option<CadenceError> {
        self.err().map(IntoCadenceError::into_cadence_error)
    }
}

pub(crate) fn erase_target<A, F, O>(target: F) -> Target<A>
where
    F: Fn(A) -> O + Send + Sync + 'static,
    O: Outcome,
{
    Arc::new(move |args| {
        panic::catch_unwind(AssertUnwindSafe(|| target(args)))
            .map_or_else(|payload| Some(panic_failure(&*payload)), Outcome::into_failure)
    })
}

pub(crate) fn panic_failure(payload: &(dyn Any + Send)) -> CadenceError {
    let context = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    CadenceError::callback_panic(context)
}

/// Hands `failure` to the handler, or logs it.
///
/// A panicking handler is logged and swallowed, so failures never unwind out
/// of `call` or a timer task.
pub(crate) fn report(wrapper: &str, failure: CadenceError, on_error: Option<&ErrorHandler>) {
    let Some(handler) = on_error else {
        error!("{wrapper}: discarded target failure: {failure}");
        return;
    };

    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| handler(failure))) {
        error!("{wrapper}: error handler panicked: {}", panic_failure(&*payload));
    }
}
