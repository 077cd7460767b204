// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Top-level session state and orchestration.
//!
//! Owns the append-only result sequence, the resource budget, the
//! baseline measurements, the fixed test payload, and the key material
//! cache. Suites run strictly one operation at a time through the
//! session's `TimedOperationRunner`.

use std::sync::Arc;
use std::time::Duration;

use rand::RngCore;
use tracing::{debug, info};

use crate::cache::KeyMaterialCache;
use crate::capability::CryptoCapability;
use crate::config::BenchSettings;
use crate::error::{BenchResult, ConfigError, ExportError};
use crate::export::{ResultSink, SessionMetadata};
use crate::probe::ResourceProbe;
use crate::result::BenchmarkResult;
use crate::runner::TimedOperationRunner;
use crate::suite::AlgorithmSuiteRunner;
use crate::types::{AlgorithmGroup, CoreCount};

/// CPU window used when capturing the baseline.
const BASELINE_CPU_WINDOW: Duration = Duration::from_millis(500);

/// Owns all benchmark state for one operator session.
pub struct BenchmarkSession<C: CryptoCapability> {
    capability: C,
    probe: Arc<dyn ResourceProbe>,
    settings: BenchSettings,
    use_cores: CoreCount,
    memory_limit_mb: Option<u64>,
    baseline_memory_mb: f64,
    baseline_cpu_percent: f64,
    test_payload: Vec<u8>,
    cache: KeyMaterialCache<C::KeyPair>,
    results: Vec<BenchmarkResult>,
}

impl<C: CryptoCapability> BenchmarkSession<C> {
    /// Create a session: generates the test payload once and captures the
    /// resource baseline. Defaults to all available cores and no memory
    /// limit.
    pub fn new(capability: C, probe: Arc<dyn ResourceProbe>, settings: BenchSettings) -> Self {
        let available = probe.logical_core_count().max(1);
        let use_cores = CoreCount::new(available, available)
            .expect("available core count is within its own bound");

        info!(
            payload_mb = settings.test_data_size_mb,
            "initializing test payload"
        );
        let mut test_payload = vec![0u8; settings.payload_bytes()];
        rand::thread_rng().fill_bytes(&mut test_payload);

        let mut session = Self {
            capability,
            probe,
            settings,
            use_cores,
            memory_limit_mb: None,
            baseline_memory_mb: 0.0,
            baseline_cpu_percent: 0.0,
            test_payload,
            cache: KeyMaterialCache::new(),
            results: Vec::new(),
        };
        session.update_baseline();
        session
    }

    /// Re-capture the memory/CPU figures used as a reference point.
    pub fn update_baseline(&mut self) {
        self.baseline_memory_mb = self.probe.resident_memory_mb();
        self.baseline_cpu_percent = self.probe.cpu_percent(BASELINE_CPU_WINDOW);
        debug!(
            baseline_memory_mb = self.baseline_memory_mb,
            baseline_cpu_percent = self.baseline_cpu_percent,
            "baseline captured"
        );
    }

    /// Apply a new resource budget. Out-of-range values are rejected and
    /// the previous configuration is retained; on success the baseline is
    /// re-captured.
    pub fn configure(&mut self, cores: u32, memory_limit_mb: Option<u64>) -> BenchResult<()> {
        let available = self.probe.logical_core_count();
        let use_cores = CoreCount::new(cores, available)?;

        if let Some(limit) = memory_limit_mb {
            if limit == 0 {
                return Err(ConfigError::InvalidMemoryLimit {
                    value_mb: limit,
                    reason: "limit must be greater than zero".to_string(),
                }
                .into());
            }
            let total = self.probe.total_memory_mb();
            if limit as f64 > total {
                return Err(ConfigError::InvalidMemoryLimit {
                    value_mb: limit,
                    reason: format!("exceeds total system memory ({:.0} MB)", total),
                }
                .into());
            }
        }

        self.use_cores = use_cores;
        self.memory_limit_mb = memory_limit_mb;
        info!(cores = %self.use_cores, limit_mb = ?self.memory_limit_mb, "resource budget updated");
        self.update_baseline();
        Ok(())
    }

    /// Run one algorithm group's suite, appending its results.
    pub fn run_group(&mut self, group: AlgorithmGroup) -> usize {
        let runner = TimedOperationRunner::new(
            Arc::clone(&self.probe),
            self.settings.timeout(),
            self.settings.sample_interval(),
        );
        let suite = AlgorithmSuiteRunner::new(
            &self.capability,
            &self.cache,
            &runner,
            &self.test_payload,
            &self.settings.rsa_key_sizes,
        );
        let produced = suite.run_group(group);
        let count = produced.len();
        self.results.extend(produced);
        count
    }

    /// Run every group in the fixed deterministic order.
    pub fn run_all(&mut self) -> usize {
        AlgorithmGroup::all()
            .into_iter()
            .map(|group| self.run_group(group))
            .sum()
    }

    /// Empty the result sequence. The key material cache is deliberately
    /// left intact: operation chaining survives a results wipe.
    pub fn clear_results(&mut self) {
        self.results.clear();
        debug!(cached_keys = self.cache.len(), "results cleared; key cache retained");
    }

    /// Hand the ordered result sequence and session metadata to a sink.
    /// Empty results are rejected before the sink is touched, so nothing
    /// is ever written for an empty session.
    pub fn export(&self, sink: &mut dyn ResultSink) -> BenchResult<()> {
        if self.results.is_empty() {
            return Err(ExportError::NoResults.into());
        }
        let metadata = self.metadata();
        sink.export(&metadata, &self.results)?;
        Ok(())
    }

    pub fn metadata(&self) -> SessionMetadata {
        SessionMetadata {
            use_cores: self.use_cores.value(),
            effective_memory_mb: self
                .memory_limit_mb
                .map(|mb| mb as f64)
                .unwrap_or_else(|| self.probe.available_memory_mb()),
            payload_size_bytes: self.test_payload.len(),
        }
    }

    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    pub fn use_cores(&self) -> u32 {
        self.use_cores.value()
    }

    pub fn memory_limit_mb(&self) -> Option<u64> {
        self.memory_limit_mb
    }

    pub fn baseline_memory_mb(&self) -> f64 {
        self.baseline_memory_mb
    }

    pub fn baseline_cpu_percent(&self) -> f64 {
        self.baseline_cpu_percent
    }

    pub fn settings(&self) -> &BenchSettings {
        &self.settings
    }

    pub fn cached_key_count(&self) -> usize {
        self.cache.len()
    }
}
