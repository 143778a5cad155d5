// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Cancellation and task primitives shared by the cadence runtimes and wrappers.

pub mod cadence_task;
pub mod cancellation_token;

pub use self::cadence_task::{CadenceTask, Spawn};
pub use self::cancellation_token::{CancellationToken, Cancelled};
