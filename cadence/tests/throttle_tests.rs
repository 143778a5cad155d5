// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(feature = "runtime-tokio")]

use cadence::{throttle, CadenceError, Throttled};
use cadence_test_utils::helpers::advance_ms;
use cadence_test_utils::test_data::widget;
use cadence_test_utils::{CallRecorder, Teardown, TestError, Widget};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_throttle_leading_call_runs_synchronously() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<u32>::new();
    let throttled = throttle(recorder.target(), Duration::from_millis(20))?;

    // Act
    throttled.call(1);

    // Assert - no yield in between
    assert_eq!(recorder.args(), vec![1]);
    assert!(!throttled.is_pending());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_single_call_invokes_once() -> anyhow::Result<()> {
    let recorder = CallRecorder::<u32>::new();
    let throttled = throttle(recorder.target(), Duration::from_millis(20))?;

    throttled.call(1);
    advance_ms(100).await;

    assert_eq!(recorder.args(), vec![1]);
    assert_eq!(recorder.offsets_ms(), vec![0]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_trailing_call_fires_at_window_end() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<u32>::new();
    let throttled = throttle(recorder.target(), Duration::from_millis(20))?;

    // Act
    throttled.call(1);
    advance_ms(5).await;
    throttled.call(2);

    // Assert
    assert_eq!(recorder.args(), vec![1]);
    assert!(throttled.is_pending());

    advance_ms(14).await;
    assert_eq!(recorder.count(), 1);

    advance_ms(1).await;
    assert_eq!(recorder.args(), vec![1, 2]);
    assert_eq!(recorder.offsets_ms(), vec![0, 20]);
    assert!(!throttled.is_pending());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_trailing_call_takes_latest_args() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<&'static str>::new();
    let throttled = throttle(recorder.target(), Duration::from_millis(30))?;

    // Act
    throttled.call("a");
    throttled.call("b");
    throttled.call("c");
    throttled.call("d");
    advance_ms(30).await;

    // Assert - "b" and "c" were superseded
    assert_eq!(recorder.args(), vec!["a", "d"]);
    assert_eq!(recorder.offsets_ms(), vec![0, 30]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_steady_stream_invokes_once_per_limit() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<u32>::new();
    let throttled = throttle(recorder.target(), Duration::from_millis(100))?;

    // Act - one call every 10ms from t=0 to t=250
    for i in 0..=25 {
        if i > 0 {
            advance_ms(10).await;
        }
        throttled.call(i);
    }
    advance_ms(50).await;

    // Assert - leading call, then the newest call of each window
    assert_eq!(recorder.args(), vec![0, 9, 19, 25]);
    assert_eq!(recorder.offsets_ms(), vec![0, 100, 200, 300]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_call_after_trailing_invocation_is_cooling() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<u32>::new();
    let throttled = throttle(recorder.target(), Duration::from_millis(20))?;
    throttled.call(1);
    throttled.call(2);
    advance_ms(20).await;

    // Act - the trailing invocation at t=20 started a new cooldown
    throttled.call(3);

    // Assert
    assert_eq!(recorder.args(), vec![1, 2]);
    advance_ms(20).await;
    assert_eq!(recorder.args(), vec![1, 2, 3]);
    assert_eq!(recorder.offsets_ms(), vec![0, 20, 40]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_calls_a_full_limit_apart_are_both_leading() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<u32>::new();
    let throttled = throttle(recorder.target(), Duration::from_millis(20))?;

    // Act
    throttled.call(1);
    advance_ms(20).await;
    throttled.call(2);

    // Assert - second call did not wait for a timer
    assert_eq!(recorder.args(), vec![1, 2]);
    assert_eq!(recorder.offsets_ms(), vec![0, 20]);
    assert!(!throttled.is_pending());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_zero_limit_passes_every_call() -> anyhow::Result<()> {
    let recorder = CallRecorder::<u32>::new();
    let throttled = throttle(recorder.target(), Duration::ZERO)?;

    throttled.call(1);
    throttled.call(2);
    throttled.call(3);

    assert_eq!(recorder.args(), vec![1, 2, 3]);
    assert!(!throttled.is_pending());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_cancel_keeps_cooldown() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<u32>::new();
    let throttled = throttle(recorder.target(), Duration::from_millis(20))?;
    throttled.call(1);
    advance_ms(5).await;
    throttled.call(2);

    // Act
    throttled.cancel();

    // Assert - the trailing call is gone
    assert!(!throttled.is_pending());
    advance_ms(5).await;
    assert_eq!(recorder.args(), vec![1]);

    // Still cooling from the invocation at t=0
    throttled.call(3);
    assert_eq!(recorder.args(), vec![1]);
    advance_ms(10).await;
    assert_eq!(recorder.args(), vec![1, 3]);
    assert_eq!(recorder.offsets_ms(), vec![0, 20]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_drop_cancels_trailing_call() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<u32>::new();
    let throttled = throttle(recorder.target(), Duration::from_millis(20))?;
    throttled.call(1);
    throttled.call(2);

    // Act
    drop(throttled);

    // Assert
    advance_ms(100).await;
    assert_eq!(recorder.args(), vec![1]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_preserves_receiver_on_both_edges() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<Arc<Widget>>::new();
    let throttled = throttle(recorder.target(), Duration::from_millis(20))?;
    let leading = widget("leading");
    let dropped = widget("dropped");
    let trailing = widget("trailing");

    // Act
    throttled.call(Arc::clone(&leading));
    throttled.call(Arc::clone(&dropped));
    throttled.call(Arc::clone(&trailing));
    advance_ms(20).await;

    // Assert
    let receivers = recorder.args();
    assert_eq!(receivers.len(), 2);
    assert!(Arc::ptr_eq(&receivers[0], &leading));
    assert!(Arc::ptr_eq(&receivers[1], &trailing));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_routes_failures_to_error_handler() -> anyhow::Result<()> {
    // Arrange
    let failures = Arc::new(Mutex::new(Vec::<CadenceError>::new()));
    let sink = Arc::clone(&failures);
    let throttled = throttle(
        |value: u32| -> Result<(), TestError> {
            if value == 2 {
                panic!("trailing edge blew up");
            }
            Err(TestError::new(format!("rejected {value}")))
        },
        Duration::from_millis(20),
    )?
    .with_error_handler(move |err| sink.lock().push(err));

    // Act - leading failure is reported inside `call`
    throttled.call(1);
    assert_eq!(failures.lock().len(), 1);

    throttled.call(2);
    advance_ms(20).await;

    // Assert
    let failures = failures.lock();
    assert_eq!(failures.len(), 2);
    assert!(
        matches!(&failures[0], CadenceError::UserError(err) if err.to_string() == "Test error: rejected 1")
    );
    assert!(
        matches!(&failures[1], CadenceError::CallbackPanic { context } if context == "trailing edge blew up")
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_discarded_args_may_reenter_wrapper_on_drop() -> anyhow::Result<()> {
    // Arrange - every receiver queries the wrapper from its Drop
    let wrapper: Arc<OnceLock<Weak<Throttled<Teardown>>>> = Arc::new(OnceLock::new());
    let torn_down = Arc::new(AtomicUsize::new(0));
    let component = |id: u32| {
        let wrapper = Arc::clone(&wrapper);
        let torn_down = Arc::clone(&torn_down);
        Teardown::new(
            id,
            Arc::new(move || {
                if let Some(throttled) = wrapper.get().and_then(Weak::upgrade) {
                    let _ = throttled.is_pending();
                }
                torn_down.fetch_add(1, Ordering::SeqCst);
            }),
        )
    };

    let recorder = CallRecorder::<u32>::new();
    let sink = recorder.clone();
    let throttled = Arc::new(throttle(
        move |component: Teardown| sink.record(component.id),
        Duration::from_millis(10),
    )?);
    let _ = wrapper.set(Arc::downgrade(&throttled));

    // Act - leading call, two replaced trailing calls, then a delivered one
    throttled.call(component(1));
    throttled.call(component(2));
    throttled.call(component(3));
    throttled.cancel();
    throttled.call(component(4));
    advance_ms(10).await;

    // Assert
    assert_eq!(recorder.args(), vec![1, 4]);
    assert_eq!(torn_down.load(Ordering::SeqCst), 4);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_panicking_error_handler_does_not_escape_call() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::<u32>::new();
    let sink = recorder.clone();
    let throttled = throttle(
        move |value: u32| {
            sink.record(value);
            Err::<(), _>(TestError::new("rejected"))
        },
        Duration::from_millis(10),
    )?
    .with_error_handler(|_| panic!("handler blew up"));

    // Act - both the leading and the trailing failure hit the handler
    throttled.call(1);
    throttled.call(2);
    advance_ms(10).await;
    throttled.call(3);
    advance_ms(10).await;

    // Assert
    assert_eq!(recorder.args(), vec![1, 2, 3]);

    Ok(())
}
