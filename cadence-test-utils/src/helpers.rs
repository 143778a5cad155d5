// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::task::yield_now;
use tokio::time::advance;

/// Number of scheduler turns `settle` yields for.
const SETTLE_TURNS: usize = 16;

/// Yields repeatedly so that timer tasks woken by the clock get to run.
///
/// Does not move a paused clock.
pub async fn settle() {
    for _ in 0..SETTLE_TURNS {
        yield_now().await;
    }
}

/// Advances a paused clock by `ms` milliseconds, then settles.
pub async fn advance_ms(ms: u64) {
    advance(Duration::from_millis(ms)).await;
    settle().await;
}
