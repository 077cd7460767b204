// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Cooperative timeout watchdog scoped to one timed operation.
//!
//! The watchdog never interrupts in-flight work: the underlying
//! cryptographic calls are opaque library calls that cannot safely be
//! aborted mid-computation. It only sets a flag that the runner checks
//! before starting new work; an operation already executing when the
//! deadline fires runs to natural completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

/// One-shot deadline flag. State is per-invocation: each armed watchdog
/// owns its fired flag, so stale flags can never leak between runs.
pub struct Watchdog {
    fired: Arc<AtomicBool>,
    cancel: Sender<()>,
    handle: JoinHandle<()>,
}

impl Watchdog {
    /// Arm a watchdog for `timeout`. Returns `None` for a zero timeout:
    /// timeouts disabled, nothing is spawned.
    pub fn arm(timeout: Duration) -> Option<Self> {
        if timeout.is_zero() {
            return None;
        }

        let fired = Arc::new(AtomicBool::new(false));
        let fired_flag = Arc::clone(&fired);
        let (cancel, cancel_rx) = mpsc::channel::<()>();

        let handle = std::thread::spawn(move || {
            match cancel_rx.recv_timeout(timeout) {
                // Deadline passed without a cancel: flag the timeout.
                Err(RecvTimeoutError::Timeout) => {
                    fired_flag.store(true, Ordering::SeqCst);
                    warn!(timeout_secs = timeout.as_secs_f64(), "benchmark timeout reached");
                }
                // Cancelled, or the sender was dropped on an early exit
                // path; either way the deadline no longer applies.
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
            }
        });

        Some(Self {
            fired,
            cancel,
            handle,
        })
    }

    /// Whether the deadline has passed.
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Cancel the deadline if it has not fired yet and wait for the
    /// watchdog thread to exit.
    pub fn disarm(self) {
        // Send fails only if the thread already finished (deadline hit);
        // nothing to cancel in that case.
        let _ = self.cancel.send(());
        let _ = self.handle.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_arms_nothing() {
        assert!(Watchdog::arm(Duration::ZERO).is_none());
    }

    #[test]
    fn test_fires_after_deadline() {
        let watchdog = Watchdog::arm(Duration::from_millis(10)).unwrap();
        std::thread::sleep(Duration::from_millis(60));
        assert!(watchdog.fired());
        watchdog.disarm();
    }

    #[test]
    fn test_disarm_before_deadline_never_fires() {
        let watchdog = Watchdog::arm(Duration::from_secs(30)).unwrap();
        assert!(!watchdog.fired());
        let fired = Arc::clone(&watchdog.fired);
        watchdog.disarm();
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_disarm_after_fire_is_clean() {
        let watchdog = Watchdog::arm(Duration::from_millis(5)).unwrap();
        std::thread::sleep(Duration::from_millis(40));
        assert!(watchdog.fired());
        // Disarming an already-fired watchdog must not hang or panic.
        watchdog.disarm();
    }
}
