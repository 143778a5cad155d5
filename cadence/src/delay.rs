// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::window::IntoWindow;
use crate::DefaultRuntime;
use cadence_error::Result;
use cadence_runtime::runtime::Runtime;
use cadence_runtime::timer::Timer;

/// Resolves after `duration` on the default runtime.
///
/// # Errors
///
/// Returns [`CadenceError::InvalidDuration`](cadence_error::CadenceError::InvalidDuration)
/// before sleeping if `duration` is unusable.
///
/// # Example
///
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() -> cadence::Result<()> {
/// cadence::delay(25.0).await?;
/// # Ok(())
/// # }
/// ```
pub async fn delay(duration: impl IntoWindow) -> Result<()> {
    delay_on::<DefaultRuntime>(duration).await
}

/// Resolves after `duration` on runtime `R`.
///
/// # Errors
///
/// Returns [`CadenceError::InvalidDuration`](cadence_error::CadenceError::InvalidDuration)
/// before sleeping if `duration` is unusable.
pub async fn delay_on<R: Runtime>(duration: impl IntoWindow) -> Result<()> {
    let window = duration.into_window()?;
    R::Timer::default().sleep_future(window.duration()).await;
    Ok(())
}
