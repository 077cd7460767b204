// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! The export seam: the core defines the exported shape, sinks define the
//! file format.

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::result::BenchmarkResult;

/// Session facts handed to a sink alongside the result rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Requested CPU core count.
    pub use_cores: u32,
    /// Configured memory limit, or the probe's available memory when no
    /// limit is set.
    pub effective_memory_mb: f64,
    /// Size of the random test payload used across the session.
    pub payload_size_bytes: usize,
}

/// Receives the full ordered result sequence plus session metadata.
///
/// Sinks are only invoked with a non-empty result slice; the session
/// reports `ExportError::NoResults` itself without touching the sink, so
/// an empty run never creates a file.
pub trait ResultSink {
    fn export(
        &mut self,
        metadata: &SessionMetadata,
        results: &[BenchmarkResult],
    ) -> Result<(), ExportError>;
}
