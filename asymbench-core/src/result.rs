// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Benchmark result records and per-algorithm summary statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Operation;

/// Descriptive fields of one timed operation, fixed before it runs.
#[derive(Debug, Clone)]
pub struct OperationSpec {
    pub algorithm: String,
    pub key_size_bits: u32,
    pub operation: Operation,
    pub data_size_bytes: usize,
}

impl OperationSpec {
    pub fn new(
        algorithm: impl Into<String>,
        key_size_bits: u32,
        operation: Operation,
        data_size_bytes: usize,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            key_size_bits,
            operation,
            data_size_bytes,
        }
    }
}

/// Measurements of one timed operation. Immutable once returned by the
/// runner; the session's result sequence is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Algorithm identifier, e.g. "RSA", "NIST_P384_ECDH", "Ed25519"
    pub algorithm: String,
    /// Key size in bits
    pub key_size_bits: u32,
    /// Kind of operation measured
    pub operation: Operation,
    /// Payload size processed (0 for key generation)
    pub data_size_bytes: usize,
    /// Wall-clock duration of the timed region; pinned to the configured
    /// timeout when the watchdog fired
    pub execution_time_ms: f64,
    /// Resident memory delta (end - start). Negative values are expected
    /// allocator noise, not an error.
    pub memory_delta_mb: f64,
    /// Mean of the sampler readings taken during the timed region, or 0
    /// when the operation finished before the first sample
    pub cpu_percent: f64,
    /// Capture time, set after the timed region completes
    pub timestamp: DateTime<Utc>,
    /// Timeout annotation when applicable, otherwise empty
    pub notes: String,
}

impl BenchmarkResult {
    /// Payload size in megabytes, as exported.
    pub fn data_size_mb(&self) -> f64 {
        self.data_size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Aggregate statistics for one algorithm label across a result sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmSummary {
    pub algorithm: String,
    pub count: usize,
    pub mean_time_ms: f64,
    pub min_time_ms: f64,
    pub max_time_ms: f64,
    pub mean_memory_mb: f64,
    pub mean_cpu_percent: f64,
}

impl AlgorithmSummary {
    /// Collect per-algorithm summaries, in first-appearance order so the
    /// summary block is as stable as the result sequence itself.
    pub fn collect(results: &[BenchmarkResult]) -> Vec<AlgorithmSummary> {
        let mut order: Vec<&str> = Vec::new();
        for result in results {
            if !order.contains(&result.algorithm.as_str()) {
                order.push(&result.algorithm);
            }
        }

        order
            .into_iter()
            .map(|algorithm| {
                let rows: Vec<&BenchmarkResult> = results
                    .iter()
                    .filter(|r| r.algorithm == algorithm)
                    .collect();
                let count = rows.len();
                let total_time: f64 = rows.iter().map(|r| r.execution_time_ms).sum();
                let min_time = rows
                    .iter()
                    .map(|r| r.execution_time_ms)
                    .fold(f64::INFINITY, f64::min);
                let max_time = rows
                    .iter()
                    .map(|r| r.execution_time_ms)
                    .fold(0.0_f64, f64::max);
                let total_memory: f64 = rows.iter().map(|r| r.memory_delta_mb).sum();
                let total_cpu: f64 = rows.iter().map(|r| r.cpu_percent).sum();

                AlgorithmSummary {
                    algorithm: algorithm.to_string(),
                    count,
                    mean_time_ms: total_time / count as f64,
                    min_time_ms: min_time,
                    max_time_ms: max_time,
                    mean_memory_mb: total_memory / count as f64,
                    mean_cpu_percent: total_cpu / count as f64,
                }
            })
            .collect()
    }
}
