// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! The measurement core: executes one cryptographic operation under a
//! concurrent CPU sampler and a timeout watchdog, producing a fully
//! populated `BenchmarkResult`.
//!
//! The sampler and watchdog are scoped strictly to one `run` invocation
//! and are torn down on every exit path - success, timeout, or operation
//! failure - before the call returns or propagates.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::debug;

use crate::error::{BenchError, CryptoError};
use crate::probe::ResourceProbe;
use crate::result::{BenchmarkResult, OperationSpec};
use crate::sampler::CpuSampler;
use crate::watchdog::Watchdog;

/// Outcome of one timed operation.
#[derive(Debug)]
pub struct Outcome<T> {
    /// The measurement record, ready to append to the session.
    pub record: BenchmarkResult,
    /// Whatever the operation returned. `None` when the watchdog fired
    /// before the operation could start.
    pub output: Option<T>,
    /// Whether the deadline passed, before or during the operation.
    pub timed_out: bool,
}

/// Executes operations one at a time with per-invocation sampling and
/// timeout state.
pub struct TimedOperationRunner {
    probe: Arc<dyn ResourceProbe>,
    timeout: Duration,
    sample_interval: Duration,
}

impl TimedOperationRunner {
    /// `timeout` of zero disables the watchdog entirely.
    pub fn new(probe: Arc<dyn ResourceProbe>, timeout: Duration, sample_interval: Duration) -> Self {
        Self {
            probe,
            timeout,
            sample_interval,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `op` as the timed region described by `spec`.
    ///
    /// The operation is invoked only if the watchdog has not already
    /// fired at the moment of invocation; if it has, the operation is
    /// skipped entirely and a synthetic timeout record is produced. An
    /// operation already in flight when the deadline fires runs to
    /// completion, and its measured time is discarded in favor of the
    /// pinned timeout value.
    ///
    /// An `Err` from `op` propagates as `BenchError::OperationFailed`
    /// after the sampler and watchdog are shut down; no partial result is
    /// fabricated.
    pub fn run<T, F>(&self, spec: OperationSpec, op: F) -> Result<Outcome<T>, BenchError>
    where
        F: FnOnce() -> Result<T, CryptoError>,
    {
        let start_memory = self.probe.resident_memory_mb();
        let sampler = CpuSampler::spawn(Arc::clone(&self.probe), self.sample_interval);
        let watchdog = Watchdog::arm(self.timeout);

        let started = Instant::now();

        let output = if watchdog.as_ref().is_some_and(|w| w.fired()) {
            None
        } else {
            match op() {
                Ok(value) => Some(value),
                Err(source) => {
                    if let Some(w) = watchdog {
                        w.disarm();
                    }
                    let _ = sampler.stop();
                    return Err(BenchError::OperationFailed {
                        algorithm: spec.algorithm,
                        operation: spec.operation,
                        source,
                    });
                }
            }
        };

        let elapsed = started.elapsed();
        let timed_out = watchdog.as_ref().is_some_and(|w| w.fired());
        if let Some(w) = watchdog {
            w.disarm();
        }

        let samples = sampler.stop();
        let end_memory = self.probe.resident_memory_mb();

        let cpu_percent = if samples.is_empty() {
            0.0
        } else {
            samples.iter().sum::<f64>() / samples.len() as f64
        };

        let (execution_time_ms, notes) = if timed_out {
            (
                self.timeout.as_secs_f64() * 1000.0,
                format!("Timeout after {}s", self.timeout.as_secs()),
            )
        } else {
            (elapsed.as_secs_f64() * 1000.0, String::new())
        };

        debug!(
            algorithm = %spec.algorithm,
            operation = %spec.operation,
            time_ms = execution_time_ms,
            samples = samples.len(),
            timed_out,
            "timed operation complete"
        );

        let record = BenchmarkResult {
            algorithm: spec.algorithm,
            key_size_bits: spec.key_size_bits,
            operation: spec.operation,
            data_size_bytes: spec.data_size_bytes,
            execution_time_ms,
            memory_delta_mb: end_memory - start_memory,
            cpu_percent,
            timestamp: Utc::now(),
            notes,
        };

        Ok(Outcome {
            record,
            output,
            timed_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Operation;

    struct TestProbe;

    impl ResourceProbe for TestProbe {
        fn resident_memory_mb(&self) -> f64 {
            512.0
        }
        fn cpu_percent(&self, window: Duration) -> f64 {
            std::thread::sleep(window);
            25.0
        }
        fn logical_core_count(&self) -> u32 {
            8
        }
        fn total_memory_mb(&self) -> f64 {
            16384.0
        }
        fn available_memory_mb(&self) -> f64 {
            8192.0
        }
    }

    fn runner(timeout: Duration) -> TimedOperationRunner {
        TimedOperationRunner::new(Arc::new(TestProbe), timeout, Duration::from_millis(1))
    }

    fn spec() -> OperationSpec {
        OperationSpec::new("Ed25519", 256, Operation::Signing, 64)
    }

    #[test]
    fn test_successful_operation() {
        let outcome = runner(Duration::from_secs(60))
            .run(spec(), || {
                std::thread::sleep(Duration::from_millis(15));
                Ok::<_, CryptoError>(42u32)
            })
            .unwrap();

        assert_eq!(outcome.output, Some(42));
        assert!(!outcome.timed_out);
        assert!(outcome.record.execution_time_ms >= 15.0);
        assert!(outcome.record.notes.is_empty());
        assert_eq!(outcome.record.algorithm, "Ed25519");
        assert_eq!(outcome.record.operation, Operation::Signing);
    }

    #[test]
    fn test_timeout_pins_execution_time() {
        let timeout = Duration::from_millis(20);
        let outcome = runner(timeout)
            .run(spec(), || {
                // Outlives the deadline; runs to completion anyway.
                std::thread::sleep(Duration::from_millis(120));
                Ok::<_, CryptoError>(())
            })
            .unwrap();

        assert!(outcome.timed_out);
        assert!(outcome.output.is_some());
        assert_eq!(
            outcome.record.execution_time_ms,
            timeout.as_secs_f64() * 1000.0
        );
        assert!(!outcome.record.notes.is_empty());
    }

    #[test]
    fn test_zero_timeout_disables_watchdog() {
        let outcome = runner(Duration::ZERO)
            .run(spec(), || {
                std::thread::sleep(Duration::from_millis(30));
                Ok::<_, CryptoError>(())
            })
            .unwrap();

        assert!(!outcome.timed_out);
        assert!(outcome.record.notes.is_empty());
        assert!(outcome.record.execution_time_ms >= 30.0);
    }

    #[test]
    fn test_operation_error_propagates() {
        let err = runner(Duration::from_secs(60))
            .run(spec(), || {
                Err::<(), _>(CryptoError::Signing {
                    reason: "broken".to_string(),
                })
            })
            .unwrap_err();

        match err {
            BenchError::OperationFailed {
                algorithm,
                operation,
                ..
            } => {
                assert_eq!(algorithm, "Ed25519");
                assert_eq!(operation, Operation::Signing);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cpu_mean_of_samples() {
        let outcome = runner(Duration::ZERO)
            .run(spec(), || {
                std::thread::sleep(Duration::from_millis(20));
                Ok::<_, CryptoError>(())
            })
            .unwrap();

        // The test probe always reports 25.0, so any collected samples
        // average to exactly that; zero samples report 0.
        if outcome.record.cpu_percent != 0.0 {
            assert!((outcome.record.cpu_percent - 25.0).abs() < f64::EPSILON);
        }
    }
}
