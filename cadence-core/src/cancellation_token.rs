// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic cancellation token.
//!
//! Every scheduled invocation in `cadence` races its sleep against one of
//! these tokens, so that a superseded or cancelled timer stops without
//! touching the target.

use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use std::sync::Arc;

/// Runtime-agnostic cancellation token.
///
/// Clones share the same cancellation state. When `cancel()` is called on any
/// clone, all waiters on `cancelled()` are woken.
///
/// # Example
///
/// ```
/// use cadence_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let timer_side = token.clone();
///
/// token.cancel();
/// assert!(timer_side.is_cancelled());
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    event: Event,
}

impl CancellationToken {
    /// Create a new, not yet cancelled token.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                event: Event::new(),
            }),
        }
    }

    /// Cancel the token, waking all listeners.
    ///
    /// Idempotent.
    pub fn cancel(&self) {
        // Flag must be visible before waiters re-check it
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.event.notify(usize::MAX);
    }

    /// Check if the token has been cancelled (non-blocking).
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Wait asynchronously until the token is cancelled.
    ///
    /// Resolves immediately if the token is already cancelled.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            token: self,
            listener: None,
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`CancellationToken::cancelled()`].
#[derive(Debug)]
pub struct Cancelled<'a> {
    token: &'a CancellationToken,
    listener: Option<EventListener>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.token.is_cancelled() {
            return Poll::Ready(());
        }

        let token = self.token;
        let listener = self
            .listener
            .get_or_insert_with(|| token.inner.event.listen());

        // cancel() may have run between the first check and listen()
        if token.is_cancelled() {
            return Poll::Ready(());
        }

        Pin::new(listener).poll(cx)
    }
}
