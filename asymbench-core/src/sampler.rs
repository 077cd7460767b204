// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Concurrent CPU sampler scoped to one timed operation.
//!
//! The sampler thread is the only writer of its own sample vector; the
//! vector changes hands exactly once, on join. The stop flag is the only
//! shared state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::probe::ResourceProbe;

/// Periodically reads CPU utilization from the probe until told to stop.
pub struct CpuSampler {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Vec<f64>>,
}

impl CpuSampler {
    /// Spawn the sampler thread. Each iteration measures CPU over
    /// `interval` and then sleeps `interval`, matching the probe's
    /// windowed-measurement semantics.
    pub fn spawn(probe: Arc<dyn ResourceProbe>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = std::thread::spawn(move || {
            let mut samples = Vec::new();
            while !stop_flag.load(Ordering::Relaxed) {
                samples.push(probe.cpu_percent(interval));
                std::thread::sleep(interval);
            }
            samples
        });

        Self { stop, handle }
    }

    /// Signal the sampler to stop and wait for it to finish, returning
    /// every reading it took. Joining bounds the wait to at most one
    /// in-flight measurement window plus one sleep.
    pub fn stop(self) -> Vec<f64> {
        self.stop.store(true, Ordering::Relaxed);
        match self.handle.join() {
            Ok(samples) => samples,
            Err(_) => {
                warn!("CPU sampler thread panicked; discarding samples");
                Vec::new()
            }
        }
    }
}
