// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! CSV and JSON result sinks.
//!
//! The core defines the exported shape (column set, ordering, summary
//! statistics); these sinks only decide the bytes on disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use asymbench_core::{
    AlgorithmSummary, BenchmarkResult, ExportError, ResultSink, SessionMetadata,
};

const CSV_HEADER: &str =
    "Algorithm,KeySizeBits,Operation,DataSizeMB,ExecutionTimeMs,MemoryUsageMB,CpuPercent,Timestamp,Notes";

const SUMMARY_HEADER: &str =
    "Algorithm,Count,MeanTimeMs,MinTimeMs,MaxTimeMs,MeanMemoryMB,MeanCpuPercent";

/// Writes one CSV file: a header, one row per result in session order,
/// then a per-algorithm summary block.
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Filename embedding the session's resource budget, in the style
    /// `results_4cores_7.82GB_20250807_153000.csv`.
    pub fn default_filename(metadata: &SessionMetadata) -> String {
        format!(
            "results_{}cores_{:.2}GB_{}.csv",
            metadata.use_cores,
            metadata.effective_memory_mb / 1024.0,
            Local::now().format("%Y%m%d_%H%M%S"),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Quote a CSV field if it contains a delimiter or quote.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

impl ResultSink for CsvExporter {
    fn export(
        &mut self,
        _metadata: &SessionMetadata,
        results: &[BenchmarkResult],
    ) -> Result<(), ExportError> {
        let file = File::create(&self.path).map_err(|e| ExportError::Io {
            context: "creating CSV file",
            source: e,
        })?;
        let mut writer = BufWriter::new(file);

        let io_err = |source| ExportError::Io {
            context: "writing CSV rows",
            source,
        };

        writeln!(writer, "{}", CSV_HEADER).map_err(io_err)?;
        for result in results {
            writeln!(
                writer,
                "{},{},{},{:.4},{:.4},{:.4},{:.4},{},{}",
                csv_field(&result.algorithm),
                result.key_size_bits,
                result.operation,
                result.data_size_mb(),
                result.execution_time_ms,
                result.memory_delta_mb,
                result.cpu_percent,
                result.timestamp.format("%Y-%m-%d %H:%M:%S"),
                csv_field(&result.notes),
            )
            .map_err(io_err)?;
        }

        writeln!(writer).map_err(io_err)?;
        writeln!(writer, "{}", SUMMARY_HEADER).map_err(io_err)?;
        for summary in AlgorithmSummary::collect(results) {
            writeln!(
                writer,
                "{},{},{:.4},{:.4},{:.4},{:.4},{:.3}",
                csv_field(&summary.algorithm),
                summary.count,
                summary.mean_time_ms,
                summary.min_time_ms,
                summary.max_time_ms,
                summary.mean_memory_mb,
                summary.mean_cpu_percent,
            )
            .map_err(io_err)?;
        }

        writer.flush().map_err(|source| ExportError::Io {
            context: "flushing CSV file",
            source,
        })
    }
}

/// Full report payload written by the JSON sink.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub metadata: SessionMetadata,
    pub results: Vec<BenchmarkResult>,
    pub summaries: Vec<AlgorithmSummary>,
}

/// Writes a timestamped JSON report file into an output directory.
pub struct JsonExporter {
    output_dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl JsonExporter {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ExportError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir).map_err(|e| ExportError::Io {
            context: "creating output directory",
            source: e,
        })?;
        Ok(Self {
            output_dir,
            last_written: None,
        })
    }

    /// Path of the most recent report, if any.
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }

    /// Load a previously written report.
    pub fn load(path: impl AsRef<Path>) -> Result<JsonReport, ExportError> {
        let file = File::open(path.as_ref()).map_err(|e| ExportError::Io {
            context: "opening JSON report",
            source: e,
        })?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}

impl ResultSink for JsonExporter {
    fn export(
        &mut self,
        metadata: &SessionMetadata,
        results: &[BenchmarkResult],
    ) -> Result<(), ExportError> {
        let timestamp = Local::now().format("%Y-%m-%dT%H-%M-%S");
        let filename = format!("results_{}.json", timestamp);
        let filepath = self.output_dir.join(filename);

        let report = JsonReport {
            metadata: metadata.clone(),
            results: results.to_vec(),
            summaries: AlgorithmSummary::collect(results),
        };

        let file = File::create(&filepath).map_err(|e| ExportError::Io {
            context: "creating JSON report",
            source: e,
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &report)?;

        self.last_written = Some(filepath);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asymbench_core::Operation;
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample_results() -> Vec<BenchmarkResult> {
        vec![
            BenchmarkResult {
                algorithm: "Ed25519".to_string(),
                key_size_bits: 256,
                operation: Operation::Signing,
                data_size_bytes: 1024 * 1024,
                execution_time_ms: 3.5,
                memory_delta_mb: 0.25,
                cpu_percent: 55.0,
                timestamp: Utc::now(),
                notes: String::new(),
            },
            BenchmarkResult {
                algorithm: "RSA".to_string(),
                key_size_bits: 2048,
                operation: Operation::KeyGeneration,
                data_size_bytes: 0,
                execution_time_ms: 250.0,
                memory_delta_mb: 1.5,
                cpu_percent: 90.0,
                timestamp: Utc::now(),
                notes: "Timeout after 60s".to_string(),
            },
        ]
    }

    fn metadata() -> SessionMetadata {
        SessionMetadata {
            use_cores: 4,
            effective_memory_mb: 8192.0,
            payload_size_bytes: 1024 * 1024,
        }
    }

    #[test]
    fn test_csv_header_rows_and_summary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let mut exporter = CsvExporter::new(&path);

        exporter.export(&metadata(), &sample_results()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("Ed25519,256,Signing,1.0000,3.5000"));
        assert!(lines[2].contains("Timeout after 60s"));
        // Blank separator, summary header, one summary row per algorithm.
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], SUMMARY_HEADER);
        assert!(lines[5].starts_with("Ed25519,1,"));
        assert!(lines[6].starts_with("RSA,1,"));
    }

    #[test]
    fn test_csv_quotes_fields_with_commas() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut exporter = JsonExporter::new(dir.path()).unwrap();

        exporter.export(&metadata(), &sample_results()).unwrap();
        let path = exporter.last_written().unwrap().to_path_buf();
        assert!(path.exists());

        let report = JsonExporter::load(&path).unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.metadata.use_cores, 4);
        assert_eq!(report.summaries.len(), 2);
        assert_eq!(report.results[1].notes, "Timeout after 60s");
    }

    #[test]
    fn test_default_filename_embeds_budget() {
        let name = CsvExporter::default_filename(&metadata());
        assert!(name.starts_with("results_4cores_8.00GB_"));
        assert!(name.ends_with(".csv"));
    }
}
