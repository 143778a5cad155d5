// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Convenient re-exports for users of the call-coalescing wrappers.

pub use crate::{
    debounce, debounce_async, delay, throttle, CadenceError, Debounced, DebouncedAsync,
    IntoWindow, Outcome, Settlement, Throttled,
};
