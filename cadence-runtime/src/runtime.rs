// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{mutex::MutexLike, timer::Timer};
use cadence_core::Spawn;
use core::fmt::Debug;

pub trait Runtime: Send + Sync + 'static {
    type Mutex<T: Send>: MutexLike<T> + Send + Sync;
    type Timer: Timer<Instant = Self::Instant> + Default;
    type Spawner: Spawn + Default;
    type Instant: Copy + Ord + Send + Sync + Debug;
}
