// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Process and system resource introspection.
//!
//! The measurement core only talks to the `ResourceProbe` trait; the
//! shipped implementation reads from `sysinfo`. A single point-in-time CPU
//! reading is meaningless for short operations, so `cpu_percent` measures
//! utilization over a caller-supplied window (two refreshes around a sleep).

use std::sync::Mutex;
use std::time::Duration;

use sysinfo::{Pid, System};

/// Supplies current process resident memory and instantaneous CPU
/// utilization, plus static machine facts used for configuration bounds
/// and export metadata.
pub trait ResourceProbe: Send + Sync {
    /// Resident set size of the current process, in MB.
    fn resident_memory_mb(&self) -> f64;

    /// Process CPU utilization measured over `window`. Blocks for the
    /// window duration. May exceed 100 on multi-core machines.
    fn cpu_percent(&self, window: Duration) -> f64;

    /// Number of logical cores on this machine.
    fn logical_core_count(&self) -> u32;

    /// Total system memory in MB.
    fn total_memory_mb(&self) -> f64;

    /// Currently available system memory in MB.
    fn available_memory_mb(&self) -> f64;
}

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// `ResourceProbe` backed by `sysinfo::System`.
pub struct SysinfoProbe {
    pid: Pid,
    system: Mutex<System>,
}

impl SysinfoProbe {
    pub fn new() -> Self {
        let pid = sysinfo::get_current_pid()
            .unwrap_or_else(|_| Pid::from_u32(std::process::id()));
        Self {
            pid,
            system: Mutex::new(System::new_all()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, System> {
        // A poisoned lock only means a panicking thread held it; the
        // System inside is still usable.
        self.system.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProbe for SysinfoProbe {
    fn resident_memory_mb(&self) -> f64 {
        let mut sys = self.lock();
        sys.refresh_process(self.pid);
        sys.process(self.pid)
            .map(|p| p.memory() as f64 / BYTES_PER_MB)
            .unwrap_or(0.0)
    }

    fn cpu_percent(&self, window: Duration) -> f64 {
        {
            let mut sys = self.lock();
            sys.refresh_process(self.pid);
        }
        // The lock is released while sleeping so concurrent memory reads
        // are not blocked for the whole window.
        std::thread::sleep(window);
        let mut sys = self.lock();
        sys.refresh_process(self.pid);
        sys.process(self.pid)
            .map(|p| p.cpu_usage() as f64)
            .unwrap_or(0.0)
    }

    fn logical_core_count(&self) -> u32 {
        let mut sys = self.lock();
        sys.refresh_cpu();
        sys.cpus().len() as u32
    }

    fn total_memory_mb(&self) -> f64 {
        let mut sys = self.lock();
        sys.refresh_memory();
        sys.total_memory() as f64 / BYTES_PER_MB
    }

    fn available_memory_mb(&self) -> f64 {
        let mut sys = self.lock();
        sys.refresh_memory();
        sys.available_memory() as f64 / BYTES_PER_MB
    }
}
