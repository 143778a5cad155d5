// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{runtime::Runtime, timer::Timer};
use cadence_core::Spawn;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct SmolRuntime;

impl Runtime for SmolRuntime {
    type Mutex<T: Send> = Arc<parking_lot::Mutex<T>>;
    type Timer = SmolTimer;
    type Spawner = SmolSpawner;
    type Instant = Instant;
}

#[derive(Clone, Debug, Default)]
pub struct SmolTimer;

/// `async_io::Timer` resolves to the instant it fired; callers only need `()`.
#[derive(Debug)]
pub struct SmolSleep(async_io::Timer);

impl Future for SmolSleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        Pin::new(&mut self.0).poll(cx).map(|_| ())
    }
}

impl Timer for SmolTimer {
    type Sleep = SmolSleep;

    type Instant = Instant;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        SmolSleep(async_io::Timer::after(duration))
    }

    fn now(&self) -> Self::Instant {
        Instant::now()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SmolSpawner;

impl Spawn for SmolSpawner {
    fn spawn_detached<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        smol::spawn(future).detach();
    }
}
