// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trailing debounce for plain callables.
//!
//! A [`Debounced`] wrapper waits for a pause of at least `delay` between
//! calls before invoking its target once, with the arguments of the most
//! recent call. Every call restarts the timer and replaces the pending
//! arguments.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence::debounce;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> cadence::Result<()> {
//! let save = debounce(|draft: String| println!("saving {draft}"), Duration::from_millis(300))?;
//!
//! save.call("h".to_string());
//! save.call("he".to_string());
//! save.call("hello".to_string());
//! // ~300ms after the last call: "saving hello"
//! # Ok(())
//! # }
//! ```

use crate::outcome::{self, ErrorHandler, Outcome, Target};
use crate::scheduler::schedule;
use crate::window::IntoWindow;
use crate::DefaultRuntime;
use cadence_core::CadenceTask;
use cadence_error::{CadenceError, Result};
use cadence_runtime::mutex::MutexLike;
use cadence_runtime::runtime::Runtime;
use core::fmt;
use core::time::Duration;
use std::sync::Arc;

/// Debounces `target` by `delay` on the default runtime.
///
/// # Errors
///
/// Returns [`CadenceError::InvalidDuration`] if `delay` is unusable.
pub fn debounce<A, F, O>(target: F, delay: impl IntoWindow) -> Result<Debounced<A>>
where
    A: Send + 'static,
    F: Fn(A) -> O + Send + Sync + 'static,
    O: Outcome,
{
    Debounced::new(target, delay)
}

/// A debounced wrapper around a fire-and-forget target.
///
/// The target's return value is discarded. Failures (an `Err` return or a
/// panic) are passed to the handler installed with
/// [`with_error_handler`](Self::with_error_handler), or logged when there is
/// none.
///
/// Dropping the wrapper cancels any pending invocation.
pub struct Debounced<A: Send, R: Runtime = DefaultRuntime> {
    shared: Arc<Shared<A, R>>,
}

struct Shared<A: Send, R: Runtime> {
    delay: Duration,
    target: Target<A>,
    state: R::Mutex<State<A>>,
}

struct State<A> {
    pending: Option<A>,
    timer: Option<CadenceTask>,
    generation: u64,
    on_error: Option<ErrorHandler>,
}

impl<A, R> Debounced<A, R>
where
    A: Send + 'static,
    R: Runtime,
{
    /// Wraps `target` so that bursts of calls collapse into one invocation.
    ///
    /// # Arguments
    ///
    /// * `target` - The function to invoke once the calls go quiet
    /// * `delay` - The duration of required inactivity before invoking
    ///
    /// # Errors
    ///
    /// Returns [`CadenceError::InvalidDuration`] if `delay` is unusable.
    pub fn new<F, O>(target: F, delay: impl IntoWindow) -> Result<Self>
    where
        F: Fn(A) -> O + Send + Sync + 'static,
        O: Outcome,
    {
        let delay = delay.into_window()?.duration();
        Ok(Self {
            shared: Arc::new(Shared {
                delay,
                target: outcome::erase_target(target),
                state: MutexLike::new(State {
                    pending: None,
                    timer: None,
                    generation: 0,
                    on_error: None,
                }),
            }),
        })
    }

    /// Routes target failures to `handler` instead of the log.
    #[must_use]
    pub fn with_error_handler<H>(self, handler: H) -> Self
    where
        H: Fn(CadenceError) + Send + Sync + 'static,
    {
        let previous = self.shared.state.lock().on_error.replace(Arc::new(handler));
        drop(previous);
        self
    }

    /// Records `args` and restarts the timer.
    ///
    /// Any previously scheduled, not yet fired invocation is cancelled. When
    /// the timer fires the target receives the arguments of the latest call.
    /// A zero delay still defers the invocation to the runtime.
    pub fn call(&self, args: A) {
        let superseded = {
            let mut state = self.shared.state.lock();
            state.generation = state.generation.wrapping_add(1);
            let superseded = state.pending.replace(args);

            let generation = state.generation;
            let shared = Arc::clone(&self.shared);
            // Replacing the handle cancels the previous timer
            state.timer = Some(schedule::<R, _, _>(self.shared.delay, move || async move {
                shared.fire(generation);
            }));
            superseded
        };

        // Arguments may hold a receiver whose Drop re-enters this wrapper
        drop(superseded);
    }
}

impl<A: Send, R: Runtime> Debounced<A, R> {
    /// Discards the pending invocation, if any, without invoking the target.
    ///
    /// A no-op when nothing is pending. The wrapper stays usable.
    pub fn cancel(&self) {
        let discarded = {
            let mut state = self.shared.state.lock();
            state.generation = state.generation.wrapping_add(1);
            state.timer = None;
            state.pending.take()
        };
        drop(discarded);
    }

    /// Returns `true` while an invocation is scheduled.
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().pending.is_some()
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.shared.delay
    }
}

impl<A: Send, R: Runtime> Shared<A, R> {
    fn fire(&self, generation: u64) {
        let (args, on_error) = {
            let mut state = self.state.lock();
            if state.generation != generation {
                debug!("debounce: superseded timer woke up, ignoring");
                return;
            }
            state.timer = None;
            match state.pending.take() {
                Some(args) => (args, state.on_error.clone()),
                None => return,
            }
        };

        if let Some(failure) = (self.target)(args) {
            outcome::report("debounce", failure, on_error.as_ref());
        }
    }
}

impl<A: Send, R: Runtime> Drop for Debounced<A, R> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<A: Send, R: Runtime> fmt::Debug for Debounced<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("delay", &self.shared.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}
