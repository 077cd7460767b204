//! Asymbench Core Library
//!
//! Measurement core for the asymbench benchmark harness. Provides the
//! timed operation runner (concurrent CPU sampler + cooperative timeout
//! watchdog), per-family key material caching, algorithm suite
//! sequencing, session state, and the capability/probe/sink interfaces
//! the core consumes its collaborators through.

pub mod cache;
pub mod capability;
pub mod config;
pub mod error;
pub mod export;
pub mod probe;
pub mod result;
pub mod runner;
pub mod sampler;
pub mod session;
pub mod suite;
pub mod types;
pub mod watchdog;

// Re-export commonly used types
pub use cache::{KeyMaterial, KeyMaterialCache};
pub use capability::CryptoCapability;
pub use config::{BenchSettings, SettingsLoader};
pub use error::{BenchError, BenchResult, ConfigError, CryptoError, ExportError};
pub use export::{ResultSink, SessionMetadata};
pub use probe::{ResourceProbe, SysinfoProbe};
pub use result::{AlgorithmSummary, BenchmarkResult, OperationSpec};
pub use runner::{Outcome, TimedOperationRunner};
pub use session::BenchmarkSession;
pub use suite::AlgorithmSuiteRunner;
pub use types::{AlgorithmFamily, AlgorithmGroup, CoreCount, HashSpec, Operation};
