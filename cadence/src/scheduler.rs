// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_core::CadenceTask;
use cadence_runtime::runtime::Runtime;
use cadence_runtime::timer::Timer;
use core::future::Future;
use core::time::Duration;
use futures::future::{self, Either};
use futures::pin_mut;

/// Spawns a single-shot timer task on `R`.
///
/// `fire` runs only if the sleep completes before the returned handle is
/// cancelled or dropped. Callers still re-check their generation inside
/// `fire`: cancellation can land after the sleep won the race.
pub(crate) fn schedule<R, F, Fut>(after: Duration, fire: F) -> CadenceTask
where
    R: Runtime,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let spawner = R::Spawner::default();
    // Deadline is fixed at scheduling time, not at the task's first poll
    let sleep = R::Timer::default().sleep_future(after);

    CadenceTask::spawn(&spawner, move |cancel| async move {
        let cancelled = cancel.cancelled();
        pin_mut!(sleep, cancelled);

        match future::select(sleep, cancelled).await {
            Either::Left(((), _)) => fire().await,
            Either::Right(((), _)) => debug!("timer cancelled before firing"),
        }
    })
}
