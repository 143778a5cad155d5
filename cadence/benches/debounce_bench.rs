// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence::debounce;
use criterion::{BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Builder;
use tokio::task::yield_now;
use tokio::time::advance;

pub fn bench_debounce(c: &mut Criterion) {
    let mut group = c.benchmark_group("debounce_burst");
    let burst_sizes = [1_u64, 10, 100];

    for &burst in &burst_sizes {
        group.throughput(Throughput::Elements(burst));
        group.bench_with_input(
            BenchmarkId::from_parameter(burst),
            &burst,
            |bencher, &burst| {
                bencher.iter(|| {
                    // 1. Setup a lightweight, paused runtime
                    let rt = Builder::new_current_thread()
                        .enable_time()
                        .start_paused(true)
                        .build()
                        .unwrap();

                    rt.block_on(async {
                        let delay = Duration::from_millis(50);
                        let total = Arc::new(AtomicU64::new(0));
                        let sink = Arc::clone(&total);

                        // 2. Wrap a trivial target
                        let debounced = debounce(
                            move |value: u64| {
                                sink.fetch_add(value, Ordering::Relaxed);
                            },
                            delay,
                        )
                        .unwrap();

                        // 3. Each call restarts the timer
                        for value in 0..burst {
                            debounced.call(black_box(value));
                        }

                        // 4. Let the single trailing invocation run
                        advance(delay).await;
                        yield_now().await;
                        black_box(total.load(Ordering::Relaxed));
                    });
                });
            },
        );
    }

    group.finish();
}
