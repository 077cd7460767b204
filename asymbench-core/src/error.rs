//! Custom error types for asymbench.
//!
//! This module defines explicit enum error types as per coding guidelines.
//! No `Box<dyn Error>`, no `anyhow::Result` - all errors are strongly typed.
//!
//! A benchmark timeout is deliberately NOT represented here: a timed-out
//! operation still produces a valid `BenchmarkResult` with a pinned duration
//! and an annotation in `notes`.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{AlgorithmFamily, Operation};

/// Top-level error type for the benchmark harness.
/// All errors are explicit variants - no catch-all or generic handling.
#[derive(Debug, Error)]
pub enum BenchError {
    // =========================================================================
    // Algorithm Availability - Skip, Warn, Continue
    // =========================================================================
    #[error("Algorithm family {family} is not available on this platform")]
    Unavailable { family: AlgorithmFamily },

    // =========================================================================
    // Operation Failures - Abort One Operation, Continue the Batch
    // =========================================================================
    #[error("{operation} failed for {algorithm}: {source}")]
    OperationFailed {
        algorithm: String,
        operation: Operation,
        #[source]
        source: CryptoError,
    },

    // =========================================================================
    // Configuration Errors - Reject, Retain Previous Value
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    // =========================================================================
    // Export Errors - Reported, In-Memory Results Are Kept
    // =========================================================================
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// Errors crossing the `CryptoCapability` boundary.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Key generation failed for {family} ({key_size_bits} bits): {reason}")]
    KeyGeneration {
        family: AlgorithmFamily,
        key_size_bits: u32,
        reason: String,
    },

    #[error("Signing failed: {reason}")]
    Signing { reason: String },

    #[error("Signature verification failed")]
    VerificationFailed,

    #[error("Shared secret derivation failed: {reason}")]
    KeyExchange { reason: String },

    #[error("Encryption failed: {reason}")]
    Encryption { reason: String },

    #[error("Decryption failed: {reason}")]
    Decryption { reason: String },

    #[error("Malformed key material: {reason}")]
    MalformedKey { reason: String },

    #[error("Hash {requested} is not supported by {family}")]
    UnsupportedHash {
        family: AlgorithmFamily,
        requested: String,
    },

    #[error("Operation {operation} is not defined for {family}")]
    UnsupportedOperation {
        family: AlgorithmFamily,
        operation: Operation,
    },
}

/// Configuration validation errors. The previous configuration is always
/// retained when one of these is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Core count {requested} out of range (1-{available} available)")]
    CoreCountOutOfRange { requested: u32, available: u32 },

    #[error("Invalid memory limit: {value_mb} MB - {reason}")]
    InvalidMemoryLimit { value_mb: u64, reason: String },

    #[error("Invalid timeout: {seconds}s (max {max}s)")]
    InvalidTimeout { seconds: u64, max: u64 },

    #[error("Invalid sample interval: {millis}ms (must be {min}-{max}ms)")]
    InvalidSampleInterval { millis: u64, min: u64, max: u64 },

    #[error("Invalid test payload size: {megabytes} MB (must be {min}-{max} MB)")]
    InvalidPayloadSize {
        megabytes: usize,
        min: usize,
        max: usize,
    },

    #[error("Invalid RSA key sizes: {reason}")]
    InvalidRsaKeySizes { reason: String },

    #[error("Settings file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Settings parse error: {message}")]
    Parse { message: String },
}

/// Errors writing benchmark results to an export sink.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No results to export")]
    NoResults,

    #[error("Export I/O error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Export serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using BenchError.
pub type BenchResult<T> = Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_failed_display() {
        let err = BenchError::OperationFailed {
            algorithm: "NIST_P256".to_string(),
            operation: Operation::Signing,
            source: CryptoError::Signing {
                reason: "bad scalar".to_string(),
            },
        };
        assert!(err.to_string().contains("NIST_P256"));
        assert!(err.to_string().contains("Signing"));
    }

    #[test]
    fn test_config_error_chain() {
        let config_err = ConfigError::CoreCountOutOfRange {
            requested: 99,
            available: 8,
        };
        let bench_err: BenchError = config_err.into();
        assert!(matches!(bench_err, BenchError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_export_error_chain() {
        let bench_err: BenchError = ExportError::NoResults.into();
        assert!(bench_err.to_string().contains("No results"));
    }
}
