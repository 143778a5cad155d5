// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic call-coalescing wrappers.
//!
//! This crate wraps a caller-supplied function (the *target*) so that rapid
//! repeated calls are delayed and deduplicated. Each wrapper instance owns its
//! pending invocation and at most one live timer; nothing is shared between
//! instances.
//!
//! # Overview
//!
//! - **[`Debounced`]** - `debounce(target, delay)`: one invocation after the calls go quiet,
//!   with the latest arguments
//! - **[`DebouncedAsync`]** - `debounce_async(target, wait)`: like `debounce` for async targets;
//!   every call gets a [`Settlement`] that resolves with the shared outcome
//! - **[`Throttled`]** - `throttle(target, limit)`: leading-edge invocation, then at most one
//!   trailing invocation per `limit`
//! - **[`delay`]** - validated sleep
//!
//! Every wrapper has `cancel()` and cancels its pending work when dropped.
//! Durations are validated at construction through [`IntoWindow`].
//!
//! # Context
//!
//! Targets receive one argument value. A receiver travels inside it, so the
//! target always sees the context of the call that triggered it:
//!
//! ```rust,no_run
//! use cadence::throttle;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! struct Canvas;
//!
//! impl Canvas {
//!     fn redraw(&self, frame: u32) {
//!         println!("frame {frame}");
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> cadence::Result<()> {
//! let redraw = throttle(
//!     |(canvas, frame): (Arc<Canvas>, u32)| canvas.redraw(frame),
//!     Duration::from_millis(16),
//! )?;
//! redraw.call((Arc::new(Canvas), 1));
//! # Ok(())
//! # }
//! ```
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - timers from `tokio::time`, tasks from `tokio::spawn`
//! - `runtime-smol` - timers from `async-io`, tasks from `smol::spawn`
//!
//! Wrappers schedule timers on their runtime, so `call` must run inside it.

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
compile_error!("cadence needs a runtime: enable `runtime-tokio` or `runtime-smol`");

#[macro_use]
mod logging;

mod debounce;
mod debounce_async;
mod delay;
mod outcome;
mod scheduler;
mod throttle;
mod window;

pub mod prelude;

pub use cadence_error::{CadenceError, Result};
pub use debounce::{debounce, Debounced};
pub use debounce_async::{debounce_async, DebouncedAsync, Settlement};
pub use delay::{delay, delay_on};
pub use outcome::{ErrorHandler, Outcome};
pub use throttle::{throttle, Throttled};
pub use window::{IntoWindow, Window};

#[cfg(feature = "runtime-tokio")]
pub use cadence_runtime::impls::tokio::TokioRuntime;

#[cfg(feature = "runtime-smol")]
pub use cadence_runtime::impls::smol::SmolRuntime;

/// Runtime used by the free constructor functions.
#[cfg(feature = "runtime-tokio")]
pub type DefaultRuntime = cadence_runtime::impls::tokio::TokioRuntime;

/// Runtime used by the free constructor functions.
#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub type DefaultRuntime = cadence_runtime::impls::smol::SmolRuntime;
