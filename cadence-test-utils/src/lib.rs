// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the cadence workspace.
//!
//! Designed for development and testing only.
//!
//! # Key Types
//!
//! ## `CallRecorder<A>`
//!
//! Records every invocation of a wrapped target together with the (virtual)
//! instant it happened at:
//!
//! ```rust
//! use cadence_test_utils::CallRecorder;
//!
//! let recorder = CallRecorder::<u32>::new();
//! let target = recorder.target();
//! target(7);
//! assert_eq!(recorder.args(), vec![7]);
//! ```
//!
//! ## Fixtures
//!
//! - `test_data` - keystroke and component fixtures used as target arguments,
//!   including `Teardown`, whose drop hook may re-enter a wrapper
//! - `helpers::settle` - lets woken timer tasks run under a paused tokio clock

pub mod helpers;
pub mod recorder;
pub mod test_data;

pub use recorder::{Call, CallRecorder};
pub use test_data::{Keystroke, Teardown, TestError, Widget};
