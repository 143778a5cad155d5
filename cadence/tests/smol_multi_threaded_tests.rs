// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(feature = "runtime-smol")]

use cadence::{Debounced, DebouncedAsync, SmolRuntime, Throttled};
use cadence_test_utils::{CallRecorder, TestError};
use futures::future::join_all;
use smol::Timer;
use std::thread;
use std::time::Duration;

const CALLERS: u32 = 4;
const CALLS_PER_CALLER: u32 = 25;

#[test]
fn test_smol_debounce_concurrent_callers_invoke_once_with_last_args() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<u32>::new();
    let debounced = Debounced::<u32, SmolRuntime>::new(recorder.target(), 100_u64)?;

    // Act - callers on OS threads, then one final call
    thread::scope(|scope| {
        for caller in 0..CALLERS {
            let debounced = &debounced;
            scope.spawn(move || {
                for i in 0..CALLS_PER_CALLER {
                    debounced.call(caller * 100 + i);
                }
            });
        }
    });
    debounced.call(999);
    smol::block_on(Timer::after(Duration::from_millis(300)));

    // Assert
    assert_eq!(recorder.args(), vec![999]);

    Ok(())
}

#[test]
fn test_smol_debounce_async_concurrent_settlements_all_settle() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<u32>::new();
    let sink = recorder.clone();
    let debounced = DebouncedAsync::<u32, u32, SmolRuntime>::new(
        move |value: u32| {
            sink.record(value);
            async move { Ok::<_, TestError>(value) }
        },
        Duration::from_millis(50),
    )?;

    // Act
    let settlements = thread::scope(|scope| {
        let handles: Vec<_> = (0..CALLERS)
            .map(|caller| {
                let debounced = &debounced;
                scope.spawn(move || {
                    (0..CALLS_PER_CALLER)
                        .map(|i| debounced.call(caller * 100 + i))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap_or_default())
            .collect::<Vec<_>>()
    });
    let settled = smol::block_on(join_all(settlements));

    // Assert
    let invoked = recorder.args();
    assert_eq!(settled.len(), (CALLERS * CALLS_PER_CALLER) as usize);
    for result in settled {
        assert!(invoked.contains(&result?));
    }

    Ok(())
}

#[test]
fn test_smol_throttle_concurrent_callers_respect_limit() -> anyhow::Result<()> {
    // Arrange
    let limit = Duration::from_millis(20);
    let recorder = CallRecorder::<u32>::new();
    let throttled = Throttled::<u32, SmolRuntime>::new(recorder.target(), limit)?;

    // Act
    thread::scope(|scope| {
        for caller in 0..CALLERS {
            let throttled = &throttled;
            scope.spawn(move || {
                for i in 0..200 {
                    throttled.call(caller * 1_000 + i);
                    thread::sleep(Duration::from_millis(1));
                }
            });
        }
    });
    smol::block_on(Timer::after(limit * 3));

    // Assert
    let calls = recorder.calls();
    assert!(calls.len() >= 2);
    for pair in calls.windows(2) {
        let gap = pair[1].at.duration_since(pair[0].at);
        assert!(gap >= limit - Duration::from_millis(2), "gap of {gap:?}");
    }

    Ok(())
}
