// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::Instant;

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct Call<A> {
    pub args: A,
    pub at: Instant,
}

/// Shared log of target invocations.
///
/// Clones share the same log, so one clone can move into the target while
/// the test keeps another for assertions.
#[derive(Debug)]
pub struct CallRecorder<A> {
    calls: Arc<Mutex<Vec<Call<A>>>>,
    origin: Instant,
}

impl<A> Clone for CallRecorder<A> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
            origin: self.origin,
        }
    }
}

impl<A: Clone + Send + 'static> CallRecorder<A> {
    /// Creates an empty recorder whose origin is the current instant.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            origin: Instant::now(),
        }
    }

    /// Records a call with the current instant.
    pub fn record(&self, args: A) {
        self.calls.lock().push(Call {
            args,
            at: Instant::now(),
        });
    }

    /// A target closure that records its argument.
    pub fn target(&self) -> impl Fn(A) + Send + Sync + 'static {
        let recorder = self.clone();
        move |args| recorder.record(args)
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Arguments of all recorded calls, in order.
    pub fn args(&self) -> Vec<A> {
        self.calls.lock().iter().map(|call| call.args.clone()).collect()
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<Call<A>> {
        self.calls.lock().clone()
    }

    /// Milliseconds since the recorder's origin at which each call happened.
    pub fn offsets_ms(&self) -> Vec<u128> {
        self.calls
            .lock()
            .iter()
            .map(|call| call.at.duration_since(self.origin).as_millis())
            .collect()
    }
}

impl<A: Clone + Send + 'static> Default for CallRecorder<A> {
    fn default() -> Self {
        Self::new()
    }
}
