// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trailing debounce for asynchronous targets, with shared settlement.
//!
//! Every call to a [`DebouncedAsync`] returns a [`Settlement`] right away.
//! Only the last call of a debounce window reaches the target, but every
//! settlement handed out during that window resolves with the outcome of
//! that single invocation:
//!
//! - `Ok(value)` - the target's value, cloned for each caller
//! - `Err(CadenceError::UserError(_))` - the target's error, shared by all callers
//! - `Err(CadenceError::CallbackPanic { .. })` - the target panicked
//! - `Err(CadenceError::Cancelled)` - the window was cancelled or the wrapper dropped
//!
//! A superseded call never hangs.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence::debounce_async;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> cadence::Result<()> {
//! let search = debounce_async(
//!     |query: String| async move { Ok::<_, std::io::Error>(format!("results for {query}")) },
//!     Duration::from_millis(200),
//! )?;
//!
//! let first = search.call("ru".to_string());
//! let last = search.call("rust".to_string());
//!
//! // Both callers observe the single search for "rust"
//! assert_eq!(first.await?, "results for rust");
//! assert_eq!(last.await?, "results for rust");
//! # Ok(())
//! # }
//! ```

use crate::outcome;
use crate::scheduler::schedule;
use crate::window::IntoWindow;
use crate::DefaultRuntime;
use cadence_core::CadenceTask;
use cadence_error::{CadenceError, IntoCadenceError, Result};
use cadence_runtime::mutex::MutexLike;
use cadence_runtime::runtime::Runtime;
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use core::time::Duration;
use futures::channel::oneshot;
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

type AsyncTarget<A, T> = Arc<dyn Fn(A) -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// Debounces the asynchronous `target` by `wait` on the default runtime.
///
/// # Errors
///
/// Returns [`CadenceError::InvalidDuration`] if `wait` is unusable.
pub fn debounce_async<A, T, E, F, Fut>(
    target: F,
    wait: impl IntoWindow,
) -> Result<DebouncedAsync<A, T>>
where
    A: Send + 'static,
    T: Clone + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = core::result::Result<T, E>> + Send + 'static,
{
    DebouncedAsync::new(target, wait)
}

/// A debounced wrapper around an asynchronous target.
///
/// Dropping the wrapper cancels the pending window; its settlements resolve
/// with [`CadenceError::Cancelled`]. An invocation that already started runs
/// to completion.
pub struct DebouncedAsync<A: Send, T: Send, R: Runtime = DefaultRuntime> {
    shared: Arc<Shared<A, T, R>>,
}

struct Shared<A: Send, T: Send, R: Runtime> {
    wait: Duration,
    target: AsyncTarget<A, T>,
    state: R::Mutex<State<A, T>>,
}

struct State<A, T> {
    pending: Option<A>,
    waiters: Vec<oneshot::Sender<Result<T>>>,
    timer: Option<CadenceTask>,
    generation: u64,
}

/// Deferred result of one [`DebouncedAsync::call`].
///
/// Resolves once the invocation that absorbed this call settles.
#[must_use = "a settlement does nothing unless awaited"]
#[derive(Debug)]
pub struct Settlement<T> {
    receiver: oneshot::Receiver<Result<T>>,
}

impl<T> Future for Settlement<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // A dropped sender means the window went away without settling
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(CadenceError::Cancelled)))
    }
}

impl<A, T, R> DebouncedAsync<A, T, R>
where
    A: Send + 'static,
    T: Clone + Send + 'static,
    R: Runtime,
{
    /// Wraps the asynchronous `target`.
    ///
    /// # Arguments
    ///
    /// * `target` - Function returning the future to run for the last call of a window
    /// * `wait` - The duration of required inactivity before invoking
    ///
    /// # Errors
    ///
    /// Returns [`CadenceError::InvalidDuration`] if `wait` is unusable.
    pub fn new<E, F, Fut>(target: F, wait: impl IntoWindow) -> Result<Self>
    where
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = core::result::Result<T, E>> + Send + 'static,
    {
        let wait = wait.into_window()?.duration();
        let target: AsyncTarget<A, T> = Arc::new(move |args| {
            match panic::catch_unwind(AssertUnwindSafe(|| target(args))) {
                Ok(fut) => AssertUnwindSafe(fut)
                    .catch_unwind()
                    .map(|settled| match settled {
                        Ok(result) => result.map_err(IntoCadenceError::into_cadence_error),
                        Err(payload) => Err(outcome::panic_failure(&*payload)),
                    })
                    .boxed(),
                Err(payload) => future::ready(Err(outcome::panic_failure(&*payload))).boxed(),
            }
        });

        Ok(Self {
            shared: Arc::new(Shared {
                wait,
                target,
                state: MutexLike::new(State {
                    pending: None,
                    waiters: Vec::new(),
                    timer: None,
                    generation: 0,
                }),
            }),
        })
    }

    /// Records `args`, restarts the timer and returns this call's settlement.
    ///
    /// Settlements returned by earlier calls in the same window are not
    /// dropped: they resolve together with this one.
    pub fn call(&self, args: A) -> Settlement<T> {
        let (sender, receiver) = oneshot::channel();

        let superseded = {
            let mut state = self.shared.state.lock();
            state.generation = state.generation.wrapping_add(1);
            let superseded = state.pending.replace(args);
            state.waiters.push(sender);

            let generation = state.generation;
            let shared = Arc::clone(&self.shared);
            state.timer = Some(schedule::<R, _, _>(self.shared.wait, move || async move {
                shared.fire(generation).await;
            }));
            superseded
        };
        drop(superseded);

        Settlement { receiver }
    }
}

impl<A: Send, T: Send, R: Runtime> DebouncedAsync<A, T, R> {
    /// Discards the pending window and rejects its settlements with
    /// [`CadenceError::Cancelled`].
    ///
    /// A no-op when nothing is pending.
    pub fn cancel(&self) {
        let (discarded, waiters) = {
            let mut state = self.shared.state.lock();
            state.generation = state.generation.wrapping_add(1);
            state.timer = None;
            (state.pending.take(), mem::take(&mut state.waiters))
        };
        drop(discarded);

        for waiter in waiters {
            let _ = waiter.send(Err(CadenceError::Cancelled));
        }
    }

    /// Returns `true` while an invocation is scheduled.
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().pending.is_some()
    }

    /// The configured wait.
    pub fn wait(&self) -> Duration {
        self.shared.wait
    }
}

impl<A: Send, T: Send, R: Runtime> Shared<A, T, R> {
    fn take_window(&self, generation: u64) -> Option<(A, Vec<oneshot::Sender<Result<T>>>)> {
        let mut state = self.state.lock();
        if state.generation != generation {
            debug!("debounce_async: superseded timer woke up, ignoring");
            return None;
        }
        state.timer = None;
        let args = state.pending.take()?;
        Some((args, mem::take(&mut state.waiters)))
    }
}

impl<A: Send, T: Clone + Send, R: Runtime> Shared<A, T, R> {
    async fn fire(&self, generation: u64) {
        let Some((args, waiters)) = self.take_window(generation) else {
            return;
        };

        let settled = (self.target)(args).await;
        for waiter in waiters {
            // A caller that dropped its settlement is not an error
            let _ = waiter.send(settled.clone());
        }
    }
}

impl<A: Send, T: Send, R: Runtime> Drop for DebouncedAsync<A, T, R> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<A: Send, T: Send, R: Runtime> fmt::Debug for DebouncedAsync<A, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebouncedAsync")
            .field("wait", &self.shared.wait)
            .field("pending", &self.is_pending())
            .finish()
    }
}
