// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Leading + trailing throttle for plain callables.
//!
//! A [`Throttled`] wrapper invokes its target at most once per `limit`:
//!
//! - **Idle**: a call invokes the target immediately, inside `call`, and
//!   starts the cooldown.
//! - **Cooling**: a call only records its arguments as the trailing call,
//!   replacing any earlier one. The first such call schedules a timer for the
//!   rest of the cooldown; when it fires the target receives the latest
//!   trailing arguments and a new cooldown starts from that instant.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence::throttle;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> cadence::Result<()> {
//! let report = throttle(|pos: (i32, i32)| println!("scrolled to {pos:?}"), Duration::from_millis(100))?;
//!
//! report.call((0, 10)); // printed now
//! report.call((0, 20)); // dropped
//! report.call((0, 30)); // printed once the 100ms window closes
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
use cadence_runtime::timer::Timer;
use core::fmt;
use core::time::Duration;
use std::sync::Arc;

/// Throttles `target` to one invocation per `limit` on the default runtime.
///
/// # Errors
///
/// Returns [`CadenceError::InvalidDuration`] if `limit` is unusable.
pub fn throttle<A, F, O>(target: F, limit: impl IntoWindow) -> Result<Throttled<A>>
where
    A: Send + 'static,
    F: Fn(A) -> O + Send + Sync + 'static,
    O: Outcome,
{
    Throttled::new(target, limit)
}

/// A throttled wrapper around a fire-and-forget target.
///
/// Leading-edge invocations run on the caller's thread; trailing-edge
/// invocations run on the runtime. Failures from either go to the error
/// handler, or the log when there is none.
///
/// Dropping the wrapper cancels a pending trailing invocation.
pub struct Throttled<A: Send, R: Runtime = DefaultRuntime> {
    shared: Arc<Shared<A, R>>,
}

struct Shared<A: Send, R: Runtime> {
    limit: Duration,
    timer: R::Timer,
    target: Target<A>,
    state: R::Mutex<State<A, R::Instant>>,
}

struct State<A, I> {
    last_invoked: Option<I>,
    pending: Option<A>,
    trailing: Option<CadenceTask>,
    generation: u64,
    on_error: Option<ErrorHandler>,
}

impl<A, R> Throttled<A, R>
where
    A: Send + 'static,
    R: Runtime,
{
    /// Wraps `target` so that it runs at most once per `limit`.
    ///
    /// # Arguments
    ///
    /// * `target` - The function to rate-limit
    /// * `limit` - Minimum spacing between two invocations
    ///
    /// # Errors
    ///
    /// Returns [`CadenceError::InvalidDuration`] if `limit` is unusable.
    pub fn new<F, O>(target: F, limit: impl IntoWindow) -> Result<Self>
    where
        F: Fn(A) -> O + Send + Sync + 'static,
        O: Outcome,
    {
        let limit = limit.into_window()?.duration();
        Ok(Self {
            shared: Arc::new(Shared {
                limit,
                timer: R::Timer::default(),
                target: outcome::erase_target(target),
                state: MutexLike::new(State {
                    last_invoked: None,
                    pending: None,
                    trailing: None,
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

    /// Invokes the target now, or records `args` as the trailing call.
    pub fn call(&self, args: A) {
        let mut state = self.shared.state.lock();
        if state.trailing.is_some() {
            // Still cooling until the trailing timer has fired
            let superseded = state.pending.replace(args);
            drop(state);
            drop(superseded);
            return;
        }

        let cooling = state
            .last_invoked
            .map(|last| self.shared.timer.elapsed_since(last))
            .filter(|elapsed| *elapsed < self.shared.limit);

        match cooling {
            None => {
                state.last_invoked = Some(self.shared.timer.now());
                let on_error = state.on_error.clone();
                drop(state);
                self.shared.invoke(args, on_error.as_ref());
            }
            Some(elapsed) => {
                let superseded = state.pending.replace(args);
                state.generation = state.generation.wrapping_add(1);
                let generation = state.generation;
                let shared = Arc::clone(&self.shared);
                state.trailing = Some(schedule::<R, _, _>(
                    self.shared.limit - elapsed,
                    move || async move {
                        shared.fire_trailing(generation);
                    },
                ));
                drop(state);
                drop(superseded);
            }
        }
    }
}

impl<A: Send, R: Runtime> Throttled<A, R> {
    /// Discards the pending trailing call, if any, without invoking the target.
    ///
    /// The cooldown started by the last actual invocation still applies.
    pub fn cancel(&self) {
        let discarded = {
            let mut state = self.shared.state.lock();
            state.generation = state.generation.wrapping_add(1);
            state.trailing = None;
            state.pending.take()
        };
        // Dropped unlocked: a receiver in `A` may call back into this wrapper
        drop(discarded);
    }

    /// Returns `true` while a trailing invocation is scheduled.
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().pending.is_some()
    }

    /// The configured limit.
    pub fn limit(&self) -> Duration {
        self.shared.limit
    }
}

impl<A: Send, R: Runtime> Shared<A, R> {
    fn fire_trailing(&self, generation: u64) {
        let (args, on_error) = {
            let mut state = self.state.lock();
            if state.generation != generation {
                debug!("throttle: superseded trailing timer woke up, ignoring");
                return;
            }
            state.trailing = None;
            let Some(args) = state.pending.take() else {
                return;
            };
            state.last_invoked = Some(self.timer.now());
            (args, state.on_error.clone())
        };

        self.invoke(args, on_error.as_ref());
    }

    fn invoke(&self, args: A, on_error: Option<&ErrorHandler>) {
        if let Some(failure) = (self.target)(args) {
            outcome::report("throttle", failure, on_error);
        }
    }
}

impl<A: Send, R: Runtime> Drop for Throttled<A, R> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<A: Send, R: Runtime> fmt::Debug for Throttled<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttled")
            .field("limit", &self.shared.limit)
            .field("pending", &self.is_pending())
            .finish()
    }
}
