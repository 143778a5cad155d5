// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{runtime::Runtime, timer::Timer};
use cadence_core::Spawn;
use core::future::Future;
use std::{sync::Arc, time::Duration};
use tokio::time::Instant;

pub struct TokioRuntime;

impl Runtime for TokioRuntime {
    type Mutex<T: Send> = Arc<parking_lot::Mutex<T>>;
    type Timer = TokioTimer;
    type Spawner = TokioSpawner;
    type Instant = Instant;
}

/// Timer backed by `tokio::time`.
///
/// Uses tokio's `Instant` so that a paused clock (`tokio::time::pause`) drives
/// both sleeping and elapsed-time bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    type Sleep = tokio::time::Sleep;

    type Instant = Instant;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        tokio::time::sleep(duration)
    }

    fn now(&self) -> Self::Instant {
        Instant::now()
    }
}

#[derive(Clone, Debug, Default)]
pub struct TokioSpawner;

impl Spawn for TokioSpawner {
    fn spawn_detached<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(future);
    }
}
