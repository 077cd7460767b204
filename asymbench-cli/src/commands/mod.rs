// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Command handlers.

pub mod info;
pub mod menu;
pub mod run;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use asymbench_core::{
    AlgorithmSummary, BenchSettings, BenchmarkResult, BenchmarkSession, SettingsLoader,
    SysinfoProbe,
};
use asymbench_crypto::CryptoProvider;

/// The session type every command operates on.
pub type Session = BenchmarkSession<CryptoProvider>;

/// Load settings from the given file, or fall back to defaults.
pub fn load_settings(config: Option<&Path>) -> anyhow::Result<BenchSettings> {
    match config {
        Some(path) => Ok(SettingsLoader::load_file(path)?),
        None => Ok(BenchSettings::default()),
    }
}

/// Build a session against the live probe and the RustCrypto provider.
pub fn build_session(config: Option<&Path>) -> anyhow::Result<Session> {
    let settings = load_settings(config)?;
    tracing::debug!(?settings, "building session");
    let probe = Arc::new(SysinfoProbe::new());
    let provider = CryptoProvider::new();
    Ok(BenchmarkSession::new(provider, probe, settings))
}

/// Print one result block, mirroring the layout operators see per step.
pub fn print_result(result: &BenchmarkResult) {
    println!();
    println!("Benchmark result:");
    println!("  Algorithm:      {}", result.algorithm);
    println!("  Key size:       {} bits", result.key_size_bits);
    println!("  Operation:      {}", result.operation);
    println!("  Data size:      {:.4} MB", result.data_size_mb());
    println!("  Execution time: {:.4} ms", result.execution_time_ms);
    println!("  Memory delta:   {:.4} MB", result.memory_delta_mb);
    println!("  CPU usage:      {:.4}%", result.cpu_percent);
    if !result.notes.is_empty() {
        println!("  Notes:          {}", result.notes);
    }
}

/// Print the per-algorithm summary table for a result sequence.
pub fn print_summary(results: &[BenchmarkResult]) {
    if results.is_empty() {
        return;
    }
    println!();
    println!("Summary");
    println!("-------");
    for summary in AlgorithmSummary::collect(results) {
        println!(
            "{}: {} results, mean={:.4}ms min={:.4}ms max={:.4}ms mem={:.4}MB cpu={:.3}%",
            summary.algorithm,
            summary.count,
            summary.mean_time_ms,
            summary.min_time_ms,
            summary.max_time_ms,
            summary.mean_memory_mb,
            summary.mean_cpu_percent,
        );
    }
}
