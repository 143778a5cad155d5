// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime abstraction for the cadence wrappers.
//!
//! A [`runtime::Runtime`] bundles the three host facilities a call-coalescing
//! wrapper needs: a timer ("sleep for N" and "now"), a spawner for detached
//! timer tasks, and a mutex for the per-instance pending state.

pub mod impls;
pub mod mutex;
pub mod runtime;
pub mod timer;
