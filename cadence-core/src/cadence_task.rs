// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic task spawning with cooperative cancellation.
//!
//! A scheduled invocation is a detached task that sleeps and then fires. The
//! owning wrapper keeps only a [`CadenceTask`] handle; cancelling or dropping
//! that handle signals the task's [`CancellationToken`].

use crate::CancellationToken;
use core::fmt::Debug;
use core::future::Future;

/// Something that can run a detached `Send + 'static` future to completion.
///
/// Implemented by each runtime in `cadence-runtime`.
pub trait Spawn: Clone + Send + Sync + Debug + 'static {
    /// Spawn `future` without keeping a join handle.
    fn spawn_detached<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Handle to a spawned task with automatic cancellation on drop.
///
/// The spawned future receives a `CancellationToken`; it is expected to race
/// its work against `token.cancelled()` and exit when signalled.
///
/// # Example
///
/// ```rust
/// use cadence_core::{CadenceTask, Spawn};
/// use std::future::Future;
///
/// #[derive(Clone, Debug)]
/// struct Inline;
///
/// impl Spawn for Inline {
///     fn spawn_detached<F>(&self, future: F)
///     where
///         F: Future<Output = ()> + Send + 'static,
///     {
///         futures::executor::block_on(future);
///     }
/// }
///
/// let task = CadenceTask::spawn(&Inline, |cancel| async move {
///     assert!(!cancel.is_cancelled());
/// });
/// assert!(!task.is_cancelled());
/// drop(task);
/// ```
#[derive(Debug)]
pub struct CadenceTask {
    cancel: CancellationToken,
}

impl CadenceTask {
    /// Spawn a background task with cancellation support.
    ///
    /// # Arguments
    ///
    /// * `spawner` - The runtime's spawner
    /// * `f` - A closure that receives the task's `CancellationToken` and returns its future
    pub fn spawn<S, F, Fut>(spawner: &S, f: F) -> Self
    where
        S: Spawn,
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        spawner.spawn_detached(f(cancel.clone()));
        Self { cancel }
    }

    /// Signal the task to stop.
    ///
    /// Does not wait for the task; it stops at its next cancellation checkpoint.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for CadenceTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
